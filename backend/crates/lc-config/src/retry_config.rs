use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Listen retry constraints
pub const MAX_RETRIES: u32 = 50;
pub const DEFAULT_RETRIES: u32 = 5;

pub const MIN_RETRY_DELAY_MS: u64 = 10;
pub const MAX_RETRY_DELAY_MS: u64 = 60_000;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Bind retry budget for a listener.
///
/// `retries` counts attempts after the first one; the delay between
/// attempts is fixed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl RetryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.retries > MAX_RETRIES {
            return Err(ConfigError::config(format!(
                "retry.retries must be 0-{}, got {}",
                MAX_RETRIES, self.retries
            )));
        }

        if self.retry_delay_ms < MIN_RETRY_DELAY_MS || self.retry_delay_ms > MAX_RETRY_DELAY_MS {
            return Err(ConfigError::config(format!(
                "retry.retry_delay_ms must be {}-{}, got {}",
                MIN_RETRY_DELAY_MS, MAX_RETRY_DELAY_MS, self.retry_delay_ms
            )));
        }

        Ok(())
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
