//! Postline Core - shared infrastructure for the post hydration pipeline
//!
//! This crate provides the pieces that are not specific to any one
//! pipeline stage: HTTP client plumbing, logging, progress reporting,
//! atomic file writes, and the shutdown flag.

pub mod fsutil;
pub mod http;
pub mod logging;
pub mod progress;
pub mod shutdown;

// Re-exports for convenience
pub use fsutil::{atomic_write, cleanup_tmp_files};
pub use http::{HttpError, SHARED_RUNTIME, http_client};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};
pub use shutdown::{is_shutdown_requested, shutdown_flag};
