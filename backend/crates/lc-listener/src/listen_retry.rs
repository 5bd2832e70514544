use std::io;
use std::time::Duration;

use tokio::time::sleep;

// Bind retry defaults:
// - 1 initial attempt + 5 retries
// - Fixed 1 second between attempts, long enough for a previous
//   process on the same port to finish closing
const DEFAULT_MAX_RETRIES: u32 = 5;
const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Bind retry budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenRetry {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Fixed delay between attempts
    pub delay: Duration,
}

impl Default for ListenRetry {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl ListenRetry {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// No retries at all
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Last error of an operation that gave up, and how many attempts it took
#[derive(Debug)]
pub struct RetryFailure<E> {
    pub error: E,
    pub attempts: u32,
}

/// Execute an async operation, retrying transient failures with a fixed delay
pub async fn with_retry<F, Fut, T, E>(
    retry: &ListenRetry,
    operation_name: &str,
    mut operation: F,
) -> Result<T, RetryFailure<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + IsRetryable,
{
    let max_attempts = retry.max_attempts();
    let mut attempts = 0;

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => {
                if attempts > 1 {
                    log::info!("{} succeeded after {} attempts", operation_name, attempts);
                }
                return Ok(result);
            }
            Err(e) => {
                if !e.is_retryable() || attempts >= max_attempts {
                    log::warn!(
                        "{} failed after {} attempts: {}",
                        operation_name,
                        attempts,
                        e
                    );
                    return Err(RetryFailure { error: e, attempts });
                }

                log::debug!(
                    "{} attempt {}/{} failed: {}. Retrying in {:?}",
                    operation_name,
                    attempts,
                    max_attempts,
                    e,
                    retry.delay
                );

                sleep(retry.delay).await;
            }
        }
    }
}

/// Trait for errors that can indicate retryability
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for io::Error {
    /// Port busy or resources temporarily exhausted. Permission and
    /// address-format errors will not fix themselves.
    fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            io::ErrorKind::AddrInUse | io::ErrorKind::WouldBlock | io::ErrorKind::AddrNotAvailable
        )
    }
}
