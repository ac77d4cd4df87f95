//! Hydration client — chunked lookups against the external service
//!
//! The service resolves at most 100 identifiers per call. Chunk calls may
//! return fewer records than requested (deleted or inaccessible posts);
//! that is silently absorbed. A transport or HTTP fault on any chunk is
//! not retried here — it surfaces as [`HydrateError::Unavailable`] and
//! terminates the run, which is safe because the checkpoint only reflects
//! completed units.

use futures_util::StreamExt;
use postline_core::{HttpError, SHARED_RUNTIME, http_client};

use crate::record::RawPost;

/// Lookup service batching limit: identifiers per external call.
pub const CHUNK_SIZE: usize = 100;

/// Hydration failures. Both variants are fatal for the current run.
#[derive(Debug)]
pub enum HydrateError {
    /// Service unreachable or erroring for a chunk.
    Unavailable(HttpError),
    /// Chunk response body is not the expected JSON shape.
    Decode(String),
}

impl std::fmt::Display for HydrateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(e) => write!(f, "lookup service unavailable: {e}"),
            Self::Decode(msg) => write!(f, "cannot decode lookup response: {msg}"),
        }
    }
}

impl std::error::Error for HydrateError {}

/// Resolves identifier lists to raw post records.
///
/// Injected into the runner so tests drive the pipeline with a fake.
pub trait Hydrator {
    fn hydrate(&self, ids: &[u64]) -> Result<Vec<RawPost>, HydrateError>;
}

/// HTTP client for the lookup service.
///
/// One GET per chunk: `{base_url}?ids=1,2,3`, optional bearer token.
/// Chunks are issued concurrently up to `concurrency`; batch-internal
/// record order is not a correctness invariant, so completion order is
/// whatever the service delivers.
#[derive(Debug, Clone)]
pub struct HttpHydrator {
    base_url: String,
    bearer_token: Option<String>,
    concurrency: usize,
}

impl HttpHydrator {
    pub fn new(base_url: String, bearer_token: Option<String>, concurrency: usize) -> Self {
        Self {
            base_url,
            bearer_token,
            concurrency: concurrency.max(1),
        }
    }

    async fn fetch_chunk(&self, ids: &[u64]) -> Result<Vec<RawPost>, HydrateError> {
        let ids_param = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let mut request = http_client()
            .get(&self.base_url)
            .query(&[("ids", ids_param.as_str())]);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| HydrateError::Unavailable(HttpError::from_reqwest(&e)))?;
        let body = response
            .text()
            .await
            .map_err(|e| HydrateError::Unavailable(HttpError::from_reqwest(&e)))?;

        decode_chunk(&body)
    }
}

impl Hydrator for HttpHydrator {
    fn hydrate(&self, ids: &[u64]) -> Result<Vec<RawPost>, HydrateError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        log::debug!(
            "hydrating {} ids in {} chunks",
            ids.len(),
            chunk_count(ids.len())
        );

        SHARED_RUNTIME
            .handle()
            .block_on(hydrate_chunked(ids, self.concurrency, |chunk| {
                self.fetch_chunk(chunk)
            }))
    }
}

/// Chunked dispatch shared by the HTTP client and tests: one `fetch` call
/// per [`CHUNK_SIZE`] identifiers, concurrent up to `concurrency`.
async fn hydrate_chunked<'a, F, Fut>(
    ids: &'a [u64],
    concurrency: usize,
    fetch: F,
) -> Result<Vec<RawPost>, HydrateError>
where
    F: Fn(&'a [u64]) -> Fut,
    Fut: std::future::Future<Output = Result<Vec<RawPost>, HydrateError>>,
{
    let results: Vec<Result<Vec<RawPost>, HydrateError>> =
        futures_util::stream::iter(ids.chunks(CHUNK_SIZE).map(fetch))
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

    let mut posts = Vec::with_capacity(ids.len());
    for result in results {
        match result {
            Ok(records) => posts.extend(records),
            Err(e) => {
                if matches!(&e, HydrateError::Unavailable(http) if http.is_rate_limited()) {
                    log::warn!("lookup service rate limit hit; rerun after the window resets");
                }
                return Err(e);
            }
        }
    }
    Ok(posts)
}

/// Decode one chunk response. A body that is not a JSON array is fatal;
/// an individual element that does not fit [`RawPost`] is skipped with a
/// warning, like any other malformed record.
fn decode_chunk(body: &str) -> Result<Vec<RawPost>, HydrateError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| HydrateError::Decode(e.to_string()))?;
    let mut posts = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<RawPost>(value) {
            Ok(post) => posts.push(post),
            Err(e) => log::warn!("skipping undecodable record: {e}"),
        }
    }
    Ok(posts)
}

/// External calls needed to hydrate `n` identifiers.
pub fn chunk_count(n: usize) -> usize {
    n.div_ceil(CHUNK_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_posts(ids: &[u64]) -> Vec<RawPost> {
        ids.iter()
            .map(|id| serde_json::from_str(&format!(r#"{{"id": {id}}}"#)).unwrap())
            .collect()
    }

    #[test]
    fn dispatch_issues_one_call_per_chunk() {
        let ids: Vec<u64> = (0..250).collect();
        let calls = std::sync::Mutex::new(Vec::new());

        let posts = SHARED_RUNTIME
            .handle()
            .block_on(hydrate_chunked(&ids, 4, |chunk| {
                calls.lock().unwrap().push(chunk.len());
                async move { Ok(minimal_posts(chunk)) }
            }))
            .unwrap();

        assert_eq!(posts.len(), 250);
        let mut sizes = calls.into_inner().unwrap();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![50, 100, 100]);
        assert_eq!(chunk_count(250), 3);
    }

    #[test]
    fn rate_limited_chunk_aborts_dispatch() {
        let ids: Vec<u64> = (0..150).collect();
        let err = SHARED_RUNTIME
            .handle()
            .block_on(hydrate_chunked(&ids, 2, |chunk| async move {
                if chunk.len() == CHUNK_SIZE {
                    Ok(minimal_posts(chunk))
                } else {
                    Err(HydrateError::Unavailable(HttpError {
                        status: Some(429),
                        message: "too many requests".to_string(),
                    }))
                }
            }))
            .unwrap_err();

        match err {
            HydrateError::Unavailable(http) => assert!(http.is_rate_limited()),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn chunk_count_boundaries() {
        assert_eq!(chunk_count(0), 0);
        assert_eq!(chunk_count(1), 1);
        assert_eq!(chunk_count(100), 1);
        assert_eq!(chunk_count(101), 2);
    }

    #[test]
    fn decode_skips_bad_elements() {
        let body = r#"[{"id": 1, "text": "ok"}, {"text": "no id"}, {"id": 2}]"#;
        let posts = decode_chunk(body).unwrap();
        assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn decode_rejects_non_array_body() {
        assert!(matches!(
            decode_chunk(r#"{"error": "rate limited"}"#),
            Err(HydrateError::Decode(_))
        ));
    }

    #[test]
    fn error_display() {
        let err = HydrateError::Unavailable(HttpError {
            status: Some(503),
            message: "down".to_string(),
        });
        assert_eq!(
            format!("{err}"),
            "lookup service unavailable: HTTP 503: down"
        );

        let err = HydrateError::Decode("expected array".to_string());
        assert!(format!("{err}").contains("expected array"));
    }
}
