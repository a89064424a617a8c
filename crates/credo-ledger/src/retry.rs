//! Transport retry for gateway requests.
//!
//! Retries connect-level failures only. A response that arrived — any
//! status — is returned as-is; retrying non-idempotent interpretations of
//! a 5xx is the caller's decision, not the transport's.

use std::future::Future;
use std::time::Duration;

const MAX_ATTEMPTS: u32 = 3;
const BASE_BACKOFF_MS: u64 = 100;

/// Send a request, retrying transport errors with capped backoff.
pub(crate) async fn retry_send<F, Fut>(send: F) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match send().await {
            Ok(resp) => return Ok(resp),
            Err(err) if attempt < MAX_ATTEMPTS && (err.is_connect() || err.is_timeout()) => {
                let backoff = Duration::from_millis(BASE_BACKOFF_MS * u64::from(attempt));
                tracing::debug!(attempt, error = %err, "retrying ledger request");
                tokio::time::sleep(backoff).await;
            }
            Err(err) => return Err(err),
        }
    }
}
