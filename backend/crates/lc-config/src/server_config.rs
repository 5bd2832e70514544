use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DRAIN_GRACE_SECS, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_REDIRECT_PORT, DEFAULT_TLS_PORT, MAX_DRAIN_GRACE_SECS,
};

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Serve the app over TLS and redirect plaintext traffic to it
    pub https_on: bool,
    pub host: String,
    /// Plaintext app port (https_on = false). 0 = OS-assigned
    pub port: u16,
    /// TLS app port (https_on = true). Must be non-zero
    pub https_port: u16,
    /// Plaintext redirect port (https_on = true)
    pub redirect_port: u16,
    /// Upper bound on draining in-flight connections at stop
    pub drain_grace_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            https_on: false,
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            https_port: DEFAULT_TLS_PORT,
            redirect_port: DEFAULT_REDIRECT_PORT,
            drain_grace_secs: DEFAULT_DRAIN_GRACE_SECS,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::server("server.host cannot be empty"));
        }

        if self.https_on && self.https_port == 0 {
            return Err(ConfigError::server(
                "server.https_port cannot be 0 with https_on, the redirect needs a fixed target",
            ));
        }

        if self.https_on && self.https_port == self.redirect_port {
            return Err(ConfigError::server(format!(
                "server.https_port and server.redirect_port must differ, both are {}",
                self.https_port
            )));
        }

        if self.drain_grace_secs == 0 || self.drain_grace_secs > MAX_DRAIN_GRACE_SECS {
            return Err(ConfigError::server(format!(
                "server.drain_grace_secs must be 1-{}, got {}",
                MAX_DRAIN_GRACE_SECS, self.drain_grace_secs
            )));
        }

        Ok(())
    }

    /// Port the application router is served on.
    pub fn app_port(&self) -> u16 {
        if self.https_on {
            self.https_port
        } else {
            self.port
        }
    }

    pub fn drain_grace(&self) -> Duration {
        Duration::from_secs(self.drain_grace_secs)
    }
}
