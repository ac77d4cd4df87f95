//! Identifier file discovery, counting, and batch slicing
//!
//! Input files are CSVs carrying one post id per row, in two layouts:
//! a header row with an `id` column, or headerless with the id in the
//! first column (sentiment-export style). Discovery order is a
//! lexicographic sort by file name and must stay stable across restarts;
//! the checkpoint's file indices are only meaningful against that order.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// One discovered identifier file.
#[derive(Debug, Clone)]
pub struct IdFile {
    /// File name without directory (checkpoint key).
    pub name: String,
    path: PathBuf,
    count: usize,
}

impl IdFile {
    /// Total identifiers in this file.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of batches needed to cover this file.
    pub fn total_batches(&self, batch_size: usize) -> u64 {
        self.count.div_ceil(batch_size) as u64
    }
}

/// Sorted collection of identifier files for one run.
#[derive(Debug)]
pub struct IdentifierSource {
    files: Vec<IdFile>,
    batch_size: usize,
}

impl IdentifierSource {
    /// Discover `*.csv` files under `dir`, sorted by file name.
    ///
    /// Counts identifiers in each file up front; batch counts derived from
    /// these feed the fresh-checkpoint initialization.
    pub fn discover(dir: &Path, batch_size: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(batch_size > 0, "batch size must be positive");

        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("cannot read identifier dir {}", dir.display()))?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "csv"))
            .collect();
        paths.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(String::from)
                .with_context(|| format!("non-UTF8 file name: {}", path.display()))?;
            let count = read_ids(&path)?.len();
            log::debug!("{name}: {count} identifiers");
            files.push(IdFile { name, path, count });
        }

        Ok(Self { files, batch_size })
    }

    pub fn files(&self) -> &[IdFile] {
        &self.files
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Largest batch count across all files — the natural round limit.
    pub fn max_total_batches(&self) -> u64 {
        self.files
            .iter()
            .map(|f| f.total_batches(self.batch_size))
            .max()
            .unwrap_or(0)
    }

    /// Identifier slice for one work unit:
    /// `[round * batch_size, round * batch_size + batch_size)`, clamped.
    pub fn slice(&self, file_index: usize, round_index: u32) -> anyhow::Result<Vec<u64>> {
        let file = self
            .files
            .get(file_index)
            .with_context(|| format!("file index {file_index} out of range"))?;
        let ids = read_ids(&file.path)?;
        let start = (round_index as usize).saturating_mul(self.batch_size);
        let end = start.saturating_add(self.batch_size).min(ids.len());
        if start >= ids.len() {
            return Ok(Vec::new());
        }
        Ok(ids[start..end].to_vec())
    }
}

/// Read all identifiers from one CSV file, handling both layouts.
fn read_ids(path: &Path) -> anyhow::Result<Vec<u64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("cannot open {}", path.display()))?;

    let mut ids = Vec::new();
    let mut id_col: Option<usize> = None;
    let mut first = true;

    for result in reader.records() {
        let record = result.with_context(|| format!("cannot parse {}", path.display()))?;
        if first {
            first = false;
            // Header row with an `id` column, or headerless with id first
            if let Some(col) = record.iter().position(|f| f == "id") {
                id_col = Some(col);
                continue;
            }
            id_col = Some(0);
        }
        let col = id_col.unwrap_or(0);
        let field = match record.get(col) {
            Some(f) if !f.is_empty() => f,
            _ => continue,
        };
        let id: u64 = field
            .trim()
            .parse()
            .with_context(|| format!("bad identifier {field:?} in {}", path.display()))?;
        ids.push(id);
    }

    Ok(ids)
}
