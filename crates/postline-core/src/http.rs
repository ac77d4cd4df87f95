//! Shared HTTP client and runtime for the hydration service.
//!
//! The pipeline loop is synchronous; HTTP requests run on a shared tokio
//! runtime via async reqwest, and callers `block_on` through
//! [`SHARED_RUNTIME`]. Connection pooling lives in the shared client.

use std::sync::LazyLock;
use std::time::Duration;

/// Connect timeout for the hydration service
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Total per-request timeout (a lookup of 100 ids is small; 60s is generous)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP-level error with optional status code.
#[derive(Debug)]
pub struct HttpError {
    pub status: Option<u16>,
    pub message: String,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(s) => write!(f, "HTTP {s}: {}", self.message),
            None => write!(f, "HTTP error: {}", self.message),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Build from a reqwest error, capturing the status if one exists.
    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        Self {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }

    /// Rate limiting by the lookup service (HTTP 429).
    pub fn is_rate_limited(&self) -> bool {
        self.status == Some(429)
    }
}

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .pool_max_idle_per_host(8)
        .build()
        .expect("failed to build HTTP client")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// Shared tokio runtime for HTTP operations.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_status() {
        let err = HttpError {
            status: Some(503),
            message: "unavailable".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP 503: unavailable");
    }

    #[test]
    fn display_without_status() {
        let err = HttpError {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP error: connection refused");
    }

    #[test]
    fn rate_limited_429_only() {
        let rl = HttpError {
            status: Some(429),
            message: "slow down".to_string(),
        };
        assert!(rl.is_rate_limited());

        let other = HttpError {
            status: Some(500),
            message: "boom".to_string(),
        };
        assert!(!other.is_rate_limited());

        let none = HttpError {
            status: None,
            message: "reset".to_string(),
        };
        assert!(!none.is_rate_limited());
    }
}
