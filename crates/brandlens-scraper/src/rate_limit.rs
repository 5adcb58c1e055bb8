//! Retry with capped, jittered exponential backoff for transient fetch errors.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Upper bound on any single backoff sleep.
const MAX_DELAY_MS: u64 = 30_000;

/// Transient conditions worth another attempt: 429, 5xx, and network-level
/// failures. 404s, other 4xx, unsupported content and bad URLs are final.
fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Delay before retry number `attempt` (1-based): `base * 2^(attempt-1)`,
/// raised to any server-requested `Retry-After`, capped at [`MAX_DELAY_MS`],
/// then jittered into `[0.75, 1.25)` of that value.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn backoff_delay_ms(backoff_base_ms: u64, attempt: u32, err: &ScraperError) -> u64 {
    let exponential = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(20));
    let requested = match err {
        ScraperError::RateLimited {
            retry_after_secs, ..
        } => retry_after_secs.saturating_mul(1000),
        _ => 0,
    };
    let capped = exponential.max(requested).min(MAX_DELAY_MS);
    (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64
}

/// Run `operation`, retrying transient failures up to `max_retries` extra
/// times. Non-retriable errors and the error from the final attempt are
/// returned as-is.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = backoff_delay_ms(backoff_base_ms, attempt, &err);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient fetch error, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
