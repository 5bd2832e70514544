use crate::{ConfigError, ConfigErrorResult, DEFAULT_SERVICE_NAME};

use std::time::Duration;

use serde::Deserialize;

pub const MIN_POLL_ATTEMPTS: u32 = 1;
pub const MAX_POLL_ATTEMPTS: u32 = 120;
pub const DEFAULT_POLL_ATTEMPTS: u32 = 10;

pub const MIN_POLL_INTERVAL_MS: u64 = 10;
pub const MAX_POLL_INTERVAL_MS: u64 = 10_000;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

pub const MIN_COMMAND_TIMEOUT_SECS: u64 = 1;
pub const MAX_COMMAND_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;

/// The OS-managed database service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub service_name: String,
    /// Start the service before listening and stop it after teardown
    pub manage: bool,
    /// Status re-queries after issuing start/stop
    pub poll_attempts: u32,
    pub poll_interval_ms: u64,
    /// Upper bound on a single service-control command
    pub command_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            service_name: String::from(DEFAULT_SERVICE_NAME),
            manage: false,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let name = self.service_name.trim();
        if name.is_empty() {
            return Err(ConfigError::database("database.service_name cannot be empty"));
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
        {
            return Err(ConfigError::database(format!(
                "database.service_name contains invalid characters: {}",
                name
            )));
        }

        if self.poll_attempts < MIN_POLL_ATTEMPTS || self.poll_attempts > MAX_POLL_ATTEMPTS {
            return Err(ConfigError::database(format!(
                "database.poll_attempts must be {}-{}, got {}",
                MIN_POLL_ATTEMPTS, MAX_POLL_ATTEMPTS, self.poll_attempts
            )));
        }

        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS
            || self.poll_interval_ms > MAX_POLL_INTERVAL_MS
        {
            return Err(ConfigError::database(format!(
                "database.poll_interval_ms must be {}-{}, got {}",
                MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS, self.poll_interval_ms
            )));
        }

        if self.command_timeout_secs < MIN_COMMAND_TIMEOUT_SECS
            || self.command_timeout_secs > MAX_COMMAND_TIMEOUT_SECS
        {
            return Err(ConfigError::database(format!(
                "database.command_timeout_secs must be {}-{}, got {}",
                MIN_COMMAND_TIMEOUT_SECS, MAX_COMMAND_TIMEOUT_SECS, self.command_timeout_secs
            )));
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}
