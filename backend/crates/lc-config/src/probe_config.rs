use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const MIN_PROBE_ATTEMPTS: u32 = 1;
pub const MAX_PROBE_ATTEMPTS: u32 = 600;
pub const DEFAULT_PROBE_ATTEMPTS: u32 = 20;

pub const MIN_PROBE_INTERVAL_MS: u64 = 10;
pub const MAX_PROBE_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_PROBE_INTERVAL_MS: u64 = 1_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub max_attempts: u32,
    pub interval_ms: u64,
    /// PEM trust anchor for the probed endpoint, relative to the config directory
    pub ca_cert_path: Option<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_PROBE_ATTEMPTS,
            interval_ms: DEFAULT_PROBE_INTERVAL_MS,
            ca_cert_path: None,
        }
    }
}

impl ProbeConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_attempts < MIN_PROBE_ATTEMPTS || self.max_attempts > MAX_PROBE_ATTEMPTS {
            return Err(ConfigError::probe(format!(
                "probe.max_attempts must be {}-{}, got {}",
                MIN_PROBE_ATTEMPTS, MAX_PROBE_ATTEMPTS, self.max_attempts
            )));
        }

        if self.interval_ms < MIN_PROBE_INTERVAL_MS || self.interval_ms > MAX_PROBE_INTERVAL_MS {
            return Err(ConfigError::probe(format!(
                "probe.interval_ms must be {}-{}, got {}",
                MIN_PROBE_INTERVAL_MS, MAX_PROBE_INTERVAL_MS, self.interval_ms
            )));
        }

        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
