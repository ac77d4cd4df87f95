//! End-to-end pipeline tests against a fake lookup service.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Mutex;

use postline_core::ProgressContext;
use postline_hydrate::{
    Config, Hydrator, HydrateError, ProcessedPost, ProgressStore, RawPost, SKIPPED_REPOSTS_FILE,
    run,
};
use tempfile::TempDir;

/// Fake lookup service: every third id is a repost, id 13 is malformed
/// (no text), everything else hydrates to a full record.
struct FakeService {
    calls: Mutex<usize>,
}

impl FakeService {
    fn new() -> Self {
        Self {
            calls: Mutex::new(0),
        }
    }

    fn record_json(id: u64) -> String {
        if id % 3 == 0 {
            return format!(r#"{{"id": {id}, "repost_of": 1}}"#);
        }
        if id == 13 {
            return format!(r#"{{"id": {id}}}"#);
        }
        format!(
            r#"{{
                "id": {id},
                "text": "post {id}\nsecond line",
                "created_at": "2020-03-15T10:30:00+00:00",
                "lang": "en",
                "like_count": 2,
                "author": {{
                    "id": 7,
                    "name": "author",
                    "location": "London, UK",
                    "followers_count": 10
                }}
            }}"#
        )
    }
}

impl Hydrator for FakeService {
    fn hydrate(&self, ids: &[u64]) -> Result<Vec<RawPost>, HydrateError> {
        *self.calls.lock().unwrap() += 1;
        ids.iter()
            .map(|id| {
                serde_json::from_str(&Self::record_json(*id))
                    .map_err(|e| HydrateError::Decode(e.to_string()))
            })
            .collect()
    }
}

fn write_ids(dir: &Path, name: &str, range: std::ops::Range<u64>) {
    let mut body = String::from("id\n");
    for id in range {
        writeln!(body, "{id}").unwrap();
    }
    std::fs::write(dir.join(name), body).unwrap();
}

fn small_config(ids: &TempDir, out: &TempDir) -> Config {
    let mut config = Config::new(ids.path(), out.path());
    config.batch_size = 10;
    config
}

#[test]
fn end_to_end_artifacts_and_side_channel() {
    let ids = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_ids(ids.path(), "march.csv", 1..26); // 25 ids, 3 batches of 10

    let config = small_config(&ids, &out);
    let summary = run(&config, &FakeService::new(), &ProgressContext::new()).unwrap();

    assert_eq!(summary.units_completed, 3);
    // 25 ids: 8 reposts (3,6,...,24), 1 malformed (13), 16 kept
    assert_eq!(summary.posts_written, 16);
    assert_eq!(summary.reposts_skipped, 8);
    assert_eq!(summary.malformed_dropped, 1);
    assert_eq!(summary.files_complete, 1);

    // Metadata shard carries enriched records
    let posts: Vec<ProcessedPost> =
        serde_json::from_slice(&std::fs::read(out.path().join("march_00.json")).unwrap()).unwrap();
    let first = &posts[0];
    assert_eq!(first.id, 1);
    assert_eq!(first.date, "2020-03-15");
    assert_eq!(first.location.as_deref(), Some("United Kingdom"));
    assert_eq!(first.author, 7);

    // Corpus lines are tab-separated with normalized text
    let corpus = std::fs::read_to_string(out.path().join("march_00.txt")).unwrap();
    assert!(corpus.starts_with("1\tpost 1 <p> second line\n"));

    // Lengths CSV counts raw-text words (id 1: "post 1\nsecond line" = 4)
    let lengths = std::fs::read_to_string(out.path().join("lengths/march_00.csv")).unwrap();
    assert!(lengths.starts_with("id,word_count\n1,4\n"));

    // Side channel holds every repost id across all batches
    let skipped = std::fs::read_to_string(out.path().join(SKIPPED_REPOSTS_FILE)).unwrap();
    let skipped_ids: Vec<u64> = skipped.lines().map(|l| l.parse().unwrap()).collect();
    assert_eq!(skipped_ids, vec![3, 6, 9, 12, 15, 18, 21, 24]);
}

#[test]
fn interrupted_run_resumes_without_rework() {
    let ids = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_ids(ids.path(), "a.csv", 1..11);
    write_ids(ids.path(), "b.csv", 11..31);

    // Dies on its second call, after a.csv's only batch is durable
    struct DiesSecond {
        inner: FakeService,
    }
    impl Hydrator for DiesSecond {
        fn hydrate(&self, ids: &[u64]) -> Result<Vec<RawPost>, HydrateError> {
            if *self.inner.calls.lock().unwrap() >= 1 {
                return Err(HydrateError::Decode("connection reset".to_string()));
            }
            self.inner.hydrate(ids)
        }
    }

    let config = small_config(&ids, &out);
    let progress = ProgressContext::new();
    let err = run(
        &config,
        &DiesSecond {
            inner: FakeService::new(),
        },
        &progress,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("b.csv round 0"));

    let a_shard = std::fs::read(out.path().join("a_00.json")).unwrap();

    // The restart completes only b.csv's two batches
    let service = FakeService::new();
    let summary = run(&config, &service, &progress).unwrap();
    assert_eq!(summary.units_completed, 2);
    assert_eq!(*service.calls.lock().unwrap(), 2);

    // a.csv's shard was not touched
    assert_eq!(std::fs::read(out.path().join("a_00.json")).unwrap(), a_shard);
    assert!(out.path().join("b_00.json").exists());
    assert!(out.path().join("b_01.json").exists());

    // Checkpoint audit log covers all three units exactly once
    let state = ProgressStore::new(&config.checkpoint_path).load().unwrap();
    assert_eq!(state.completion_log.len(), 3);
    assert!(state.incomplete_files().is_empty());
}

#[test]
fn restart_output_is_identical_to_uninterrupted_run() {
    let ids = TempDir::new().unwrap();
    write_ids(ids.path(), "a.csv", 1..31);

    let run_once = |out: &TempDir, interrupt_after: Option<usize>| {
        struct Limited {
            inner: FakeService,
            limit: Option<usize>,
        }
        impl Hydrator for Limited {
            fn hydrate(&self, ids: &[u64]) -> Result<Vec<RawPost>, HydrateError> {
                if let Some(limit) = self.limit {
                    if *self.inner.calls.lock().unwrap() >= limit {
                        return Err(HydrateError::Decode("cut".to_string()));
                    }
                }
                self.inner.hydrate(ids)
            }
        }
        let config = small_config(&ids, out);
        let service = Limited {
            inner: FakeService::new(),
            limit: interrupt_after,
        };
        let _ = run(&config, &service, &ProgressContext::new());
    };

    let clean = TempDir::new().unwrap();
    run_once(&clean, None);

    let resumed = TempDir::new().unwrap();
    run_once(&resumed, Some(2)); // dies mid-run
    run_once(&resumed, None); // resumes to completion

    for name in ["a_00.json", "a_01.json", "a_02.json", SKIPPED_REPOSTS_FILE] {
        assert_eq!(
            std::fs::read(clean.path().join(name)).unwrap(),
            std::fs::read(resumed.path().join(name)).unwrap(),
            "artifact {name} differs after resumption"
        );
    }
}
