use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIRECTORY,
    DatabaseConfig, LoggingConfig, ProbeConfig, RetryConfig, ServerConfig, TlsConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub retry: RetryConfig,
    pub tls: TlsConfig,
    pub database: DatabaseConfig,
    pub probe: ProbeConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Read `.env` from the working directory if present
    /// 2. Check for LC_CONFIG_DIR env var, else use ./.lc/
    /// 3. Auto-create config directory if it doesn't exist
    /// 4. Load config.toml if it exists, else use defaults
    /// 5. Apply LC_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let _ = dotenvy::dotenv();

        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: LC_CONFIG_DIR env var > ./.lc/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIRECTORY))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.retry.validate()?;
        self.tls.validate(self.server.https_on)?;
        self.database.validate()?;
        self.probe.validate()?;

        Ok(())
    }

    /// Absolute (certificate, key) paths for the TLS listener.
    pub fn tls_paths(&self) -> ConfigErrorResult<Option<(PathBuf, PathBuf)>> {
        let config_dir = Self::config_dir()?;
        Ok(self.tls.resolve(&config_dir))
    }

    /// Absolute path to the probe trust anchor, if configured.
    pub fn probe_ca_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let config_dir = Self::config_dir()?;
        Ok(self
            .probe
            .ca_cert_path
            .as_ref()
            .map(|path| config_dir.join(path)))
    }

    /// Absolute log file path, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let Some(ref filename) = self.logging.file else {
            return Ok(None);
        };
        let config_dir = Self::config_dir()?;
        Ok(Some(config_dir.join(&self.logging.dir).join(filename)))
    }

    /// Log configuration summary (never logs key material).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");

        if self.server.https_on {
            info!(
                "  server: https on {}:{} (redirect from :{})",
                self.server.host, self.server.https_port, self.server.redirect_port
            );
        } else {
            info!("  server: http on {}:{}", self.server.host, self.server.port);
        }

        info!("  server: drain grace={}s", self.server.drain_grace_secs);

        info!(
            "  retry: retries={}, delay={}ms",
            self.retry.retries, self.retry.retry_delay_ms
        );

        info!(
            "  database: service={} (managed: {}), poll={}x{}ms, timeout={}s",
            self.database.service_name,
            self.database.manage,
            self.database.poll_attempts,
            self.database.poll_interval_ms,
            self.database.command_timeout_secs
        );

        info!(
            "  probe: attempts={}, interval={}ms",
            self.probe.max_attempts, self.probe.interval_ms
        );

        info!(
            "  logging: {} (colored: {})",
            self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_bool("LC_SERVER_HTTPS_ON", &mut self.server.https_on);
        Self::apply_env_string("LC_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("LC_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse("LC_SERVER_HTTPS_PORT", &mut self.server.https_port);
        Self::apply_env_parse("LC_SERVER_REDIRECT_PORT", &mut self.server.redirect_port);
        Self::apply_env_parse(
            "LC_SERVER_DRAIN_GRACE_SECS",
            &mut self.server.drain_grace_secs,
        );

        // Retry
        Self::apply_env_parse("LC_RETRY_RETRIES", &mut self.retry.retries);
        Self::apply_env_parse("LC_RETRY_DELAY_MS", &mut self.retry.retry_delay_ms);

        // TLS
        Self::apply_env_option_string("LC_TLS_CERT_PATH", &mut self.tls.cert_path);
        Self::apply_env_option_string("LC_TLS_KEY_PATH", &mut self.tls.key_path);

        // Database service
        Self::apply_env_string("LC_DATABASE_SERVICE_NAME", &mut self.database.service_name);
        Self::apply_env_bool("LC_DATABASE_MANAGE", &mut self.database.manage);
        Self::apply_env_parse(
            "LC_DATABASE_POLL_ATTEMPTS",
            &mut self.database.poll_attempts,
        );
        Self::apply_env_parse(
            "LC_DATABASE_POLL_INTERVAL_MS",
            &mut self.database.poll_interval_ms,
        );
        Self::apply_env_parse(
            "LC_DATABASE_COMMAND_TIMEOUT_SECS",
            &mut self.database.command_timeout_secs,
        );

        // Probe
        Self::apply_env_parse("LC_PROBE_MAX_ATTEMPTS", &mut self.probe.max_attempts);
        Self::apply_env_parse("LC_PROBE_INTERVAL_MS", &mut self.probe.interval_ms);
        Self::apply_env_option_string("LC_PROBE_CA_CERT_PATH", &mut self.probe.ca_cert_path);

        // Logging
        Self::apply_env_parse("LC_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("LC_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("LC_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
