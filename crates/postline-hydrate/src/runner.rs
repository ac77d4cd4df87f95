//! Pipeline orchestration
//!
//! One call to [`run`] drives the whole pipeline: discover identifier
//! files, load or initialize the checkpoint, then loop over work units
//! from the cursor. A unit is hydrated, processed, and written before the
//! checkpoint is advanced, so an interruption at any point costs at most
//! one unit of redone work.

use anyhow::Context;
use postline_core::{ProgressContext, cleanup_tmp_files, fmt_num, is_shutdown_requested};

use crate::checkpoint::ProgressStore;
use crate::client::{Hydrator, chunk_count};
use crate::config::{Config, SKIPPED_REPOSTS_FILE};
use crate::cursor::BatchCursor;
use crate::processor::RecordProcessor;
use crate::shard::{ShardWriter, SkippedLog};
use crate::source::IdentifierSource;
use crate::stats::RunSummary;

/// Run the hydration pipeline to completion (or until shutdown).
pub fn run(
    config: &Config,
    hydrator: &dyn Hydrator,
    progress: &ProgressContext,
) -> anyhow::Result<RunSummary> {
    let source = IdentifierSource::discover(&config.ids_dir, config.batch_size)?;
    anyhow::ensure!(
        !source.files().is_empty(),
        "no identifier files (*.csv) in {}",
        config.ids_dir.display()
    );
    log::info!(
        "{} identifier files, {} ids total",
        source.files().len(),
        fmt_num(source.files().iter().map(|f| f.count()).sum::<usize>())
    );

    let writer = ShardWriter::new(&config.output_dir)
        .with_context(|| format!("cannot create {}", config.output_dir.display()))?;
    // Leftover tmp files mean a previous run died mid-write; the unit that
    // produced them was never checkpointed and will be redone in full.
    cleanup_tmp_files(&config.output_dir)?;
    cleanup_tmp_files(&config.output_dir.join("lengths"))?;

    let store = ProgressStore::new(&config.checkpoint_path);
    let mut state = store.load_or_init(source.files(), config.batch_size)?;
    state.reconcile(source.files(), config.batch_size);
    if let Some(last) = state.last_durable_unit() {
        log::info!("resuming after {last}");
    }

    let round_limit = config
        .round_limit
        .unwrap_or_else(|| source.max_total_batches().min(u32::MAX as u64) as u32);
    let cursor = BatchCursor::new(&source, round_limit);

    let skipped = SkippedLog::new(config.output_dir.join(SKIPPED_REPOSTS_FILE));
    let processor = RecordProcessor::default();

    let bar = progress.unit_line("hydrate");
    let mut summary = RunSummary {
        files_total: source.files().len(),
        ..RunSummary::default()
    };

    loop {
        if is_shutdown_requested() {
            log::info!("shutdown requested, stopping between units");
            summary.interrupted = true;
            break;
        }
        let Some(unit) = cursor.next(&mut state) else {
            break;
        };

        let ids = source.slice(unit.file_index, unit.round_index)?;
        bar.set_message(format!(
            "{} round {} ({} ids, {} calls)",
            unit.file_name,
            unit.round_index,
            fmt_num(ids.len()),
            chunk_count(ids.len())
        ));

        let records = hydrator
            .hydrate(&ids)
            .with_context(|| format!("hydrating {} round {}", unit.file_name, unit.round_index))?;
        let batch = processor.process_batch(&records);

        writer.write(&unit, &batch.posts, &batch.texts, &batch.lengths)?;
        skipped
            .append(&batch.reposts)
            .with_context(|| format!("cannot append {}", skipped.path().display()))?;

        // Outputs are durable; only now may the checkpoint claim the unit
        state.mark_done(&unit.file_name, unit.round_index, batch.posts.len());
        store.save(&state)?;

        log::info!(
            "{} round {}: {} kept, {} reposts, {} malformed",
            unit.file_name,
            unit.round_index,
            fmt_num(batch.posts.len()),
            batch.reposts.len(),
            batch.malformed
        );
        summary.units_completed += 1;
        summary.posts_written += batch.posts.len();
        summary.reposts_skipped += batch.reposts.len();
        summary.malformed_dropped += batch.malformed;
    }
    bar.finish_and_clear();

    // Checkpoint entries can outlive their identifier files; only files
    // still present count against coverage
    let incomplete: Vec<&str> = state
        .incomplete_files()
        .into_iter()
        .filter(|name| source.files().iter().any(|f| f.name == *name))
        .collect();
    summary.files_complete = summary.files_total - incomplete.len();
    if !summary.interrupted && !incomplete.is_empty() {
        for name in &incomplete {
            log::warn!("{name}: not fully covered within round limit {round_limit}");
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HydrateError;
    use crate::record::RawPost;
    use std::fmt::Write as _;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Synthesizes a full record for every requested id.
    struct FakeHydrator {
        calls: Mutex<Vec<usize>>,
    }

    impl FakeHydrator {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl Hydrator for FakeHydrator {
        fn hydrate(&self, ids: &[u64]) -> Result<Vec<RawPost>, HydrateError> {
            self.calls.lock().unwrap().push(ids.len());
            Ok(ids
                .iter()
                .map(|id| {
                    serde_json::from_str(&format!(
                        r#"{{
                            "id": {id},
                            "text": "post number {id}",
                            "created_at": "2020-03-15T10:30:00+00:00",
                            "author": {{"id": 1, "name": "author"}}
                        }}"#
                    ))
                    .unwrap()
                })
                .collect())
        }
    }

    fn write_ids(dir: &std::path::Path, name: &str, range: std::ops::Range<u64>) {
        let mut body = String::from("id\n");
        for id in range {
            writeln!(body, "{id}").unwrap();
        }
        std::fs::write(dir.join(name), body).unwrap();
    }

    fn test_config(ids: &TempDir, out: &TempDir) -> Config {
        let mut config = Config::new(ids.path(), out.path());
        config.batch_size = 60;
        config
    }

    #[test]
    fn full_run_covers_every_batch() {
        let ids = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_ids(ids.path(), "a.csv", 0..50);
        write_ids(ids.path(), "b.csv", 100..200);

        let config = test_config(&ids, &out);
        let hydrator = FakeHydrator::new();
        let progress = ProgressContext::new();

        let summary = run(&config, &hydrator, &progress).unwrap();
        assert_eq!(summary.units_completed, 3); // a:1 batch + b:2 batches
        assert_eq!(summary.posts_written, 150);
        assert_eq!(summary.files_complete, 2);
        assert!(!summary.interrupted);

        // a_00, b_00, b_01 metadata shards exist
        assert!(out.path().join("a_00.json").exists());
        assert!(out.path().join("b_00.json").exists());
        assert!(out.path().join("b_01.json").exists());
        assert!(!out.path().join("a_01.json").exists());
    }

    #[test]
    fn rerun_after_completion_does_nothing() {
        let ids = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_ids(ids.path(), "a.csv", 0..10);

        let config = test_config(&ids, &out);
        let progress = ProgressContext::new();

        let summary = run(&config, &FakeHydrator::new(), &progress).unwrap();
        assert_eq!(summary.units_completed, 1);

        let again = FakeHydrator::new();
        let summary = run(&config, &again, &progress).unwrap();
        assert_eq!(summary.units_completed, 0);
        assert!(again.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_unit_is_redone_on_next_run() {
        let ids = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_ids(ids.path(), "a.csv", 0..50);
        write_ids(ids.path(), "b.csv", 100..200);

        struct FailSecond {
            inner: FakeHydrator,
        }
        impl Hydrator for FailSecond {
            fn hydrate(&self, ids: &[u64]) -> Result<Vec<RawPost>, HydrateError> {
                if self.inner.calls.lock().unwrap().len() == 1 {
                    return Err(HydrateError::Decode("truncated".to_string()));
                }
                self.inner.hydrate(ids)
            }
        }

        let config = test_config(&ids, &out);
        let progress = ProgressContext::new();
        let failing = FailSecond {
            inner: FakeHydrator::new(),
        };
        assert!(run(&config, &failing, &progress).is_err());
        assert!(out.path().join("a_00.json").exists());
        assert!(!out.path().join("b_00.json").exists());

        // Restart picks up at b.csv round 0, never re-hydrates a.csv
        let second = FakeHydrator::new();
        let summary = run(&config, &second, &progress).unwrap();
        assert_eq!(summary.units_completed, 2);
        assert_eq!(*second.calls.lock().unwrap(), vec![60, 40]);
    }

    #[test]
    fn removed_files_do_not_skew_coverage() {
        let ids = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_ids(ids.path(), "a.csv", 0..10);
        write_ids(ids.path(), "b.csv", 0..20);
        write_ids(ids.path(), "c.csv", 0..20);

        let progress = ProgressContext::new();
        let mut config = test_config(&ids, &out);
        config.batch_size = 10;
        config.round_limit = Some(1);
        let summary = run(&config, &FakeHydrator::new(), &progress).unwrap();
        assert_eq!(summary.files_complete, 1); // b and c each need 2 batches

        // b and c keep checkpoint entries but vanish from the input dir
        std::fs::remove_file(ids.path().join("b.csv")).unwrap();
        std::fs::remove_file(ids.path().join("c.csv")).unwrap();

        let mut config = test_config(&ids, &out);
        config.batch_size = 10;
        let summary = run(&config, &FakeHydrator::new(), &progress).unwrap();
        assert_eq!(summary.units_completed, 0);
        assert_eq!(summary.files_total, 1);
        assert_eq!(summary.files_complete, 1);
    }

    #[test]
    fn round_limit_override_limits_coverage() {
        let ids = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_ids(ids.path(), "a.csv", 0..50);
        write_ids(ids.path(), "b.csv", 100..200);

        let mut config = test_config(&ids, &out);
        config.round_limit = Some(1);
        let progress = ProgressContext::new();

        let summary = run(&config, &FakeHydrator::new(), &progress).unwrap();
        assert_eq!(summary.units_completed, 2); // one round: a_00, b_00
        assert_eq!(summary.files_complete, 1);
    }

    #[test]
    fn empty_ids_dir_is_an_error() {
        let ids = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let config = test_config(&ids, &out);
        let progress = ProgressContext::new();
        assert!(run(&config, &FakeHydrator::new(), &progress).is_err());
    }
}
