use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode, header::HeaderMap};
use tokio::time::sleep;
use tracing::warn;

use crate::{config::RetryConfig, error::ApiError};

/// Bounded, server-directed backoff for HTTP 429 responses.
///
/// The policy itself is stateless; the attempt counter lives inside a single
/// [`RetryPolicy::send`] call, so every logical upstream call gets its own
/// budget.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Number of requests one logical call may issue against 429s. Never below one.
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts.max(1)
    }

    /// How long to wait before retrying, given the 429 response headers.
    ///
    /// A positive integer `Retry-After` is honoured up to the configured
    /// ceiling. Missing, unparseable, zero or negative values fall back to the
    /// default delay, which is capped by the same ceiling.
    pub fn delay_for(&self, headers: &HeaderMap) -> Duration {
        let ceiling = self.config.max_delay_seconds;

        let requested = headers
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|seconds| *seconds > 0)
            .map(|seconds| seconds as u64);

        let seconds = match requested {
            Some(seconds) => seconds,
            None => {
                if headers.contains_key(reqwest::header::RETRY_AFTER) {
                    warn!(
                        value = ?headers.get(reqwest::header::RETRY_AFTER),
                        "unusable Retry-After header, using default delay"
                    );
                }
                self.config.default_delay_seconds
            }
        };

        Duration::from_secs(seconds.min(ceiling))
    }

    /// Sends the request built by `build`, retrying while the upstream answers 429.
    ///
    /// `build` is called once per attempt since a sent request cannot be reused.
    /// Any non-429 response is handed back to the caller to classify.
    ///
    /// # Errors
    ///
    /// - [`ApiError::RateLimited`] once the attempt budget is spent
    /// - [`ApiError::Internal`] on transport failures (including timeouts), which are not retried
    pub async fn send<F>(&self, label: &str, mut build: F) -> Result<Response, ApiError>
    where
        F: FnMut() -> RequestBuilder,
    {
        let max_attempts = self.max_attempts();
        let mut attempts = 0;

        loop {
            let response = build().send().await.map_err(|e| {
                warn!(target_path = label, error = %e, "upstream request failed");
                ApiError::from(e)
            })?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Ok(response);
            }

            attempts += 1;
            if attempts >= max_attempts {
                warn!(
                    target_path = label,
                    attempts, "max retry attempts reached, giving up"
                );
                return Err(ApiError::RateLimited);
            }

            let delay = self.delay_for(response.headers());
            warn!(
                target_path = label,
                attempt = attempts,
                delay_secs = delay.as_secs(),
                "(429) rate limited, retrying"
            );
            sleep(delay).await;
        }
    }
}
