//! Graceful shutdown support via atomic flag
//!
//! The signal handler (installed by the CLI) only flips the flag; the
//! pipeline loop checks it between work units so the in-flight unit is
//! always checkpointed before exit.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global shutdown flag — set by SIGTERM/SIGINT handler
pub fn shutdown_flag() -> &'static AtomicBool {
    static FLAG: AtomicBool = AtomicBool::new(false);
    &FLAG
}

/// Check if shutdown was requested
pub fn is_shutdown_requested() -> bool {
    shutdown_flag().load(Ordering::Relaxed)
}
