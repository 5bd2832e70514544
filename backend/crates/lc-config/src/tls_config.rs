use crate::{ConfigError, ConfigErrorResult};

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Paths to the PEM certificate chain and private key.
///
/// Relative paths resolve against the config directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

impl TlsConfig {
    /// Only checks presence; readability is checked when the listener loads them.
    pub fn validate(&self, https_on: bool) -> ConfigErrorResult<()> {
        if !https_on {
            return Ok(());
        }

        match (&self.cert_path, &self.key_path) {
            (Some(cert), Some(key)) if !cert.trim().is_empty() && !key.trim().is_empty() => Ok(()),
            _ => Err(ConfigError::tls(
                "server.https_on requires tls.cert_path and tls.key_path",
            )),
        }
    }

    /// Resolved (certificate, key) paths, if both are configured.
    pub fn resolve(&self, config_dir: &Path) -> Option<(PathBuf, PathBuf)> {
        let cert = self.cert_path.as_deref()?;
        let key = self.key_path.as_deref()?;
        Some((config_dir.join(cert), config_dir.join(key)))
    }
}
