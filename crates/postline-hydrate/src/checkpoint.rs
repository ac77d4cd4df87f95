//! Durable pipeline checkpoint
//!
//! The checkpoint is the single source of truth for resumption. It is
//! rewritten (atomically, tmp→rename) only after a work unit's outputs
//! are fully on disk, so it never claims a batch that does not exist.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::source::IdFile;

/// Per-file batch bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileProgress {
    /// Highest completed batch index, -1 if none. Monotonically
    /// non-decreasing, never exceeds `total_batches - 1`.
    pub last_batch: i64,
    pub total_batches: u64,
}

/// Append-only audit record for one completed work unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEntry {
    pub round_index: u32,
    pub file_name: String,
    pub records_written: usize,
}

/// The persisted checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressState {
    /// Per-file progress, keyed by file name (BTreeMap for stable JSON).
    pub files: BTreeMap<String, FileProgress>,
    /// Which pass over all files is in progress (0-based).
    pub round_index: u32,
    /// Index into the sorted file list where the current round's scan
    /// resumes; -1 conceptually precedes index 0.
    pub resume_file_index: i64,
    pub completion_log: Vec<CompletionEntry>,
}

impl ProgressState {
    /// Fresh state for a set of discovered identifier files.
    pub fn init(files: &[IdFile], batch_size: usize) -> Self {
        let files = files
            .iter()
            .map(|f| {
                (
                    f.name.clone(),
                    FileProgress {
                        last_batch: -1,
                        total_batches: f.total_batches(batch_size),
                    },
                )
            })
            .collect();
        Self {
            files,
            round_index: 0,
            resume_file_index: -1,
            completion_log: Vec::new(),
        }
    }

    /// Add entries for files that appeared after the checkpoint was created.
    pub fn reconcile(&mut self, files: &[IdFile], batch_size: usize) {
        for f in files {
            if !self.files.contains_key(&f.name) {
                log::warn!("{}: new identifier file, adding to checkpoint", f.name);
                self.files.insert(
                    f.name.clone(),
                    FileProgress {
                        last_batch: -1,
                        total_batches: f.total_batches(batch_size),
                    },
                );
            }
        }
    }

    /// Record a completed unit: bump `last_batch` and append to the log.
    pub fn mark_done(&mut self, file_name: &str, round_index: u32, records_written: usize) {
        if let Some(fp) = self.files.get_mut(file_name) {
            debug_assert!((round_index as u64) < fp.total_batches);
            if round_index as i64 > fp.last_batch {
                fp.last_batch = round_index as i64;
            }
        }
        self.completion_log.push(CompletionEntry {
            round_index,
            file_name: file_name.to_string(),
            records_written,
        });
    }

    /// Files whose `last_batch` does not yet cover `total_batches - 1`.
    pub fn incomplete_files(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|(_, fp)| fp.last_batch + 1 < fp.total_batches as i64)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Human-readable pointer to the most recently completed unit.
    pub fn last_durable_unit(&self) -> Option<String> {
        self.completion_log
            .last()
            .map(|e| format!("{} round {}", e.file_name, e.round_index))
    }
}

/// Checkpoint persistence failures.
#[derive(Debug)]
pub enum CheckpointError {
    /// Persisted state exists but cannot be parsed. Fatal at startup:
    /// silently rebuilding would risk re-processing or skipping work.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    Io(std::io::Error),
}

impl std::fmt::Display for CheckpointError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Corrupt { path, source } => write!(
                f,
                "corrupt checkpoint {}: {source} (delete it to rebuild from scratch)",
                path.display()
            ),
            Self::Io(e) => write!(f, "checkpoint IO: {e}"),
        }
    }
}

impl std::error::Error for CheckpointError {}

impl From<std::io::Error> for CheckpointError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Loads and atomically rewrites the on-disk checkpoint.
#[derive(Debug)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the existing checkpoint. `Corrupt` if it exists but does not parse.
    pub fn load(&self) -> Result<ProgressState, CheckpointError> {
        let bytes = std::fs::read(&self.path)?;
        serde_json::from_slice(&bytes).map_err(|source| CheckpointError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Load if present, otherwise initialize from the discovered files and
    /// persist the fresh state immediately.
    pub fn load_or_init(
        &self,
        files: &[IdFile],
        batch_size: usize,
    ) -> Result<ProgressState, CheckpointError> {
        if self.path.exists() {
            return self.load();
        }
        log::info!(
            "no checkpoint at {}, initializing from {} identifier files",
            self.path.display(),
            files.len()
        );
        let state = ProgressState::init(files, batch_size);
        self.save(&state)?;
        Ok(state)
    }

    /// Serialize the full state and atomically replace the previous version.
    ///
    /// Sole mutation point of on-disk checkpoint state; call only after the
    /// unit's batch outputs are durable.
    pub fn save(&self, state: &ProgressState) -> Result<(), CheckpointError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(state).map_err(|source| CheckpointError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        postline_core::atomic_write(&self.path, &json)?;
        Ok(())
    }
}
