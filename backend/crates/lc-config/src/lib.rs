mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod probe_config;
mod retry_config;
mod server_config;
mod tls_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use probe_config::ProbeConfig;
pub use retry_config::RetryConfig;
pub use server_config::ServerConfig;
pub use tls_config::TlsConfig;

pub const CONFIG_DIR_ENV: &str = "LC_CONFIG_DIR";
pub const CONFIG_FILENAME: &str = "config.toml";
const DEFAULT_CONFIG_DIRECTORY: &str = ".lc";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TLS_PORT: u16 = 443;
const DEFAULT_REDIRECT_PORT: u16 = 80;
const DEFAULT_DRAIN_GRACE_SECS: u64 = 5;
const MAX_DRAIN_GRACE_SECS: u64 = 60;

const DEFAULT_SERVICE_NAME: &str = "mongod";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
