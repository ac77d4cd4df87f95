//! Batch output artifacts
//!
//! Each completed work unit produces three co-indexed artifacts:
//! metadata JSON, text corpus (`id<TAB>text` per line), and a lengths
//! CSV under `lengths/`. Artifact names embed the source file's stem and
//! a zero-padded round index; the mapping lives here and nowhere else.
//! All three are written tmp→rename and are full overwrites, so redoing
//! a unit after a crash is idempotent.

use std::io;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use postline_core::atomic_write;

use crate::cursor::WorkUnit;
use crate::record::{LengthRow, ProcessedPost};

/// Zero-padded width of the round index in artifact names.
const ROUND_WIDTH: usize = 2;

/// The three artifact paths for one work unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardPaths {
    pub metadata: PathBuf,
    pub corpus: PathBuf,
    pub lengths: PathBuf,
}

/// `"2020-03-01_tweets.csv"`, round 3 → `"2020-03-01_tweets_03"`.
pub fn artifact_stem(file_name: &str, round_index: u32) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    format!("{stem}_{round_index:0ROUND_WIDTH$}")
}

/// Recover `(file_stem, round_index)` from an artifact stem.
pub fn parse_artifact_stem(stem: &str) -> Option<(&str, u32)> {
    let (name, index) = stem.rsplit_once('_')?;
    if name.is_empty() || index.len() < ROUND_WIDTH {
        return None;
    }
    if !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((name, index.parse().ok()?))
}

/// Writes the three per-unit artifacts under one output directory.
#[derive(Debug)]
pub struct ShardWriter {
    output_dir: PathBuf,
}

impl ShardWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(output_dir.join("lengths"))?;
        Ok(Self { output_dir })
    }

    pub fn paths(&self, unit: &WorkUnit) -> ShardPaths {
        let stem = artifact_stem(&unit.file_name, unit.round_index);
        ShardPaths {
            metadata: self.output_dir.join(format!("{stem}.json")),
            corpus: self.output_dir.join(format!("{stem}.txt")),
            lengths: self.output_dir.join("lengths").join(format!("{stem}.csv")),
        }
    }

    /// Write all three artifacts. The caller must not checkpoint the unit
    /// until this returns.
    pub fn write(
        &self,
        unit: &WorkUnit,
        posts: &[ProcessedPost],
        texts: &[String],
        lengths: &[LengthRow],
    ) -> anyhow::Result<ShardPaths> {
        debug_assert_eq!(posts.len(), texts.len());
        let paths = self.paths(unit);

        let metadata = serde_json::to_vec_pretty(posts).context("cannot serialize metadata")?;
        atomic_write(&paths.metadata, &metadata)
            .with_context(|| format!("cannot write {}", paths.metadata.display()))?;

        let mut corpus = Vec::new();
        for (post, text) in posts.iter().zip(texts) {
            writeln!(corpus, "{}\t{}", post.id, text)?;
        }
        atomic_write(&paths.corpus, &corpus)
            .with_context(|| format!("cannot write {}", paths.corpus.display()))?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in lengths {
            writer.serialize(row).context("cannot serialize length row")?;
        }
        let buf = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("cannot flush lengths buffer: {e}"))?;
        atomic_write(&paths.lengths, &buf)
            .with_context(|| format!("cannot write {}", paths.lengths.display()))?;

        Ok(paths)
    }
}

/// Run-wide append-only list of ids skipped as reposts.
///
/// Append-only by design: a unit redone after a crash may append the same
/// ids again, and downstream consumers dedupe.
#[derive(Debug)]
pub struct SkippedLog {
    path: PathBuf,
}

impl SkippedLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, ids: &[u64]) -> io::Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut buf = String::new();
        for id in ids {
            buf.push_str(&id.to_string());
            buf.push('\n');
        }
        file.write_all(buf.as_bytes())
    }
}
