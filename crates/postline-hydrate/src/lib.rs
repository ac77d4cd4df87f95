//! Resumable post hydration pipeline
//!
//! Ingests identifier files (CSV, one post id per row), resolves each id
//! to a full post record via the external lookup service, filters reposts,
//! normalizes and enriches the survivors, and writes per-batch output
//! shards. A durable checkpoint makes an interrupted run resume exactly
//! where it left off without re-processing completed batches.

pub mod checkpoint;
pub mod client;
pub mod config;
pub mod countries;
pub mod cursor;
pub mod location;
pub mod processor;
pub mod record;
pub mod runner;
pub mod shard;
pub mod source;
pub mod stats;

pub use checkpoint::{CheckpointError, CompletionEntry, FileProgress, ProgressState, ProgressStore};
pub use client::{CHUNK_SIZE, Hydrator, HttpHydrator, HydrateError, chunk_count};
pub use config::{
    CHECKPOINT_FILE, Config, DEFAULT_BATCH_SIZE, DEFAULT_CHUNK_CONCURRENCY, SKIPPED_REPOSTS_FILE,
};
pub use cursor::{BatchCursor, WorkUnit};
pub use location::{CityGazetteer, PlaceResolver, infer_location};
pub use processor::{Outcome, ProcessedBatch, RecordProcessor, normalize_text};
pub use record::{Author, Entities, LengthRow, Place, ProcessedPost, RawPost};
pub use runner::run;
pub use shard::{ShardPaths, ShardWriter, SkippedLog, artifact_stem, parse_artifact_stem};
pub use source::{IdFile, IdentifierSource};
pub use stats::{RunSummary, coverage_table};
