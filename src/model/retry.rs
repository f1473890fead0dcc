//! Bounded exponential-backoff retry around a single model call.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use super::client::ModelError;

/// Default number of attempts for a model call (including the first one).
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay before the first retry, in milliseconds.
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 800;

/// Retry settings for model calls.
///
/// `max_retries` counts total attempts, so the default of 3 means one call
/// plus at most two retries. Only transient failures (429 / 503) are
/// retried; the delay doubles after every retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_millis(DEFAULT_INITIAL_BACKOFF_MS),
        }
    }
}

impl RetryPolicy {
    /// Set the maximum number of attempts.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the delay before the first retry in milliseconds.
    pub fn with_initial_backoff_ms(mut self, backoff_ms: u64) -> Self {
        self.initial_backoff = Duration::from_millis(backoff_ms);
        self
    }

    /// Total attempts allowed. Never less than one.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// Run `operation` until it succeeds, fails permanently, or the attempt
    /// budget is spent.
    ///
    /// The returned error is the one from the last attempt, so its
    /// [`ModelError::status`] is what the caller should map to a response.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, ModelError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ModelError>>,
    {
        let max_attempts = self.max_attempts();
        let mut backoff = self.initial_backoff;

        for attempt in 1..max_attempts {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        status = ?e.status(),
                        backoff_ms = backoff.as_millis() as u64,
                        "Transient model error, retrying"
                    );
                    sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                Err(e) => return Err(e),
            }
        }

        // Last attempt: whatever happens is final.
        operation().await
    }
}
