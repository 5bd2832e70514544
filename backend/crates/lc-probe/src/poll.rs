use crate::{ProbeError, Result};

use std::time::Duration;

use log::debug;
use tokio::time::sleep;

/// Call `attempt` until it succeeds, at most `max_attempts` times.
///
/// Attempts are numbered from 1 and spaced `interval` apart; there is no
/// sleep before the first or after the last. The error string of the final
/// attempt ends up in `ProbeError::Unreachable`.
pub async fn poll_until_up<F, Fut, T>(
    target: &str,
    max_attempts: u32,
    interval: Duration,
    mut attempt: F,
) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = std::result::Result<T, String>>,
{
    let max_attempts = max_attempts.max(1);
    let mut last_error = String::new();

    for n in 1..=max_attempts {
        match attempt(n).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!("{} not up (attempt {}/{}): {}", target, n, max_attempts, e);
                last_error = e;
            }
        }

        if n < max_attempts {
            sleep(interval).await;
        }
    }

    Err(ProbeError::unreachable(target, max_attempts, last_error))
}
