use crate::{Result, ScoutlistError};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first call
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds)
    pub base_delay_ms: u64,
    /// Maximum delay cap (in milliseconds)
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1_000,
            max_delay_ms: 60_000,
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `retries` (0-based).
    ///
    /// Exponential in `retries`, raised to the server's `retry_after` hint when
    /// one was given, and never above `max_delay_ms`.
    pub fn delay_for(&self, retries: u32, retry_after: Option<u64>) -> Duration {
        let backoff = self
            .base_delay_ms
            .saturating_mul(2_u64.saturating_pow(retries));
        let hinted = retry_after
            .map(|secs| secs.saturating_mul(1_000))
            .unwrap_or(0);
        Duration::from_millis(std::cmp::min(
            std::cmp::max(backoff, hinted),
            self.max_delay_ms,
        ))
    }
}

/// Result of a retry operation with context
#[derive(Debug)]
pub struct RetryResult<T> {
    /// The successful result
    pub result: T,
    /// Number of retry attempts made
    pub attempts_made: u32,
    /// Total time spent waiting between attempts
    pub total_retry_time: Duration,
}

/// Execute an async operation, retrying throttling and transient failures.
///
/// Errors for which [`ScoutlistError::is_retryable`] is false are returned
/// immediately. Retryable errors are retried up to `config.max_retries`
/// times with exponential backoff; once retries run out the last error is
/// returned as-is.
///
/// # Arguments
/// * `config` - Retry configuration
/// * `operation_name` - Name of the operation for logging
/// * `operation` - Async function that returns a Result
/// * `on_retry` - Callback invoked before each wait with the delay and the error
pub async fn retry_with_backoff<T, F, Fut, OnRetry>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    mut on_retry: OnRetry,
) -> Result<RetryResult<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    OnRetry: FnMut(Duration, &ScoutlistError),
{
    let mut retries = 0;
    let mut total_retry_time = Duration::ZERO;

    loop {
        match operation().await {
            Ok(result) => {
                return Ok(RetryResult {
                    result,
                    attempts_made: retries,
                    total_retry_time,
                });
            }
            Err(err) if err.is_retryable() => {
                if retries >= config.max_retries {
                    log::warn!(
                        "Max retries ({}) exceeded for {}: {}",
                        config.max_retries,
                        operation_name,
                        err
                    );
                    return Err(err);
                }

                let delay = config.delay_for(retries, err.retry_after());

                log::info!(
                    "{} failed ({}). Waiting {:?} before retry {} of {}",
                    operation_name,
                    err,
                    delay,
                    retries + 1,
                    config.max_retries
                );

                on_retry(delay, &err);

                tokio::time::sleep(delay).await;
                retries += 1;
                total_retry_time += delay;
            }
            Err(other_error) => {
                return Err(other_error);
            }
        }
    }
}

/// Retry with the default logging callback, returning only the value.
pub async fn retry_operation<T, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    retry_with_backoff(config, operation_name, operation, |delay, err| {
        log::debug!("Retrying {operation_name} in {delay:?} after: {err}");
    })
    .await
    .map(|retried| retried.result)
}
