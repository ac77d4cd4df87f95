//! Pipeline configuration

use std::path::PathBuf;

/// Identifiers per batch (one work unit's slice).
pub const DEFAULT_BATCH_SIZE: usize = 45_000;

/// Concurrent lookup chunk calls inside one work unit.
pub const DEFAULT_CHUNK_CONCURRENCY: usize = 4;

/// File name of the repost side channel, under the output directory.
pub const SKIPPED_REPOSTS_FILE: &str = "skipped-reposts.txt";

/// File name of the checkpoint, under the output directory.
pub const CHECKPOINT_FILE: &str = "hydration-progress.json";

/// Runtime configuration for one hydration run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of identifier CSV files.
    pub ids_dir: PathBuf,
    /// Directory for batch artifacts and the side channel.
    pub output_dir: PathBuf,
    /// Checkpoint path.
    pub checkpoint_path: PathBuf,
    pub batch_size: usize,
    /// Round limit override; `None` means max batch count across files.
    pub round_limit: Option<u32>,
    pub chunk_concurrency: usize,
}

impl Config {
    /// Defaults for everything derived: checkpoint lives next to the
    /// artifacts so one directory holds the whole resumable run.
    pub fn new(ids_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        Self {
            ids_dir: ids_dir.into(),
            checkpoint_path: output_dir.join(CHECKPOINT_FILE),
            output_dir,
            batch_size: DEFAULT_BATCH_SIZE,
            round_limit: None,
            chunk_concurrency: DEFAULT_CHUNK_CONCURRENCY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new("ids", "out");
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.round_limit, None);
        assert_eq!(
            config.checkpoint_path,
            PathBuf::from("out/hydration-progress.json")
        );
    }
}
