//! Linear-backoff retry around a [`JsonFetcher`].
//!
//! After failed attempt `n` the caller waits `base_delay * n` before the next
//! one. There is no jitter and no cap: with the defaults a request that never
//! succeeds costs 1s + 2s + 3s of waiting before the last error is returned.

use std::time::Duration;

use newsdesk_logging::{news_debug, news_warn};
use serde_json::Value;

use crate::{FetchError, JsonFetcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts allowed after the first one.
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(retry)
    }
}

/// Fetches `url`, retrying every kind of failure until `policy` is exhausted.
///
/// Returns the last error when all `1 + max_retries` attempts fail.
pub async fn fetch_with_retry(
    fetcher: &dyn JsonFetcher,
    url: &str,
    policy: &RetryPolicy,
) -> Result<Value, FetchError> {
    let mut retry = 0u32;
    loop {
        match fetcher.fetch_json(url).await {
            Ok(value) => {
                if retry > 0 {
                    news_debug!("fetch succeeded after {} retries", retry);
                }
                return Ok(value);
            }
            Err(err) if retry < policy.max_retries => {
                retry += 1;
                let delay = policy.delay_for(retry);
                news_warn!(
                    "fetch failed ({}); retry {}/{} in {:?}",
                    err,
                    retry,
                    policy.max_retries,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => {
                news_warn!("fetch failed after {} attempts: {}", retry + 1, err);
                return Err(err);
            }
        }
    }
}
