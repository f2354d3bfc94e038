//! Bounded retry with linearly increasing delay.
//!
//! Delay before retry `i` (1-based) is `i * base_delay`. After
//! `max_retries` retries the last error is handed back together with the
//! attempt count so callers can surface a distinct "gave up" error.

use std::future::Future;
use std::time::Duration;

use paperbrain_core::config::SearchConfig;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

/// Why [`RetryPolicy::run`] stopped without a value.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryFailure<E> {
    /// The error was not eligible for retry. Returned after the first attempt
    /// that produced it.
    Fatal(E),
    /// Every attempt failed with a retryable error.
    Exhausted { attempts: u32, last: E },
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for RetryPolicy {
    fn from(config: &SearchConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// No retries at all.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before the given 1-based retry.
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(retry)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// retry ceiling is reached.
    pub async fn run<T, E, F, Fut>(
        &self,
        mut op: F,
        is_retryable: impl Fn(&E) -> bool,
    ) -> Result<T, RetryFailure<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if !is_retryable(&e) => return Err(RetryFailure::Fatal(e)),
                Err(e) if attempt > self.max_retries => {
                    warn!(attempts = attempt, error = %e, "retry ceiling reached");
                    return Err(RetryFailure::Exhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
                Err(e) => {
                    let delay = self.delay_for(attempt);
                    debug!(attempt, delay_ms = delay.as_millis() as u64, error = %e, "retrying");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
