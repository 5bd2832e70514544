use crate::{DEFAULT_REDIRECT_PORT, ListenRetry, TlsCredentials};

/// Input to `ServerLifecycleManager::start`
#[derive(Debug, Clone)]
pub struct StartConfig {
    /// Serve the app over TLS on `port` and redirect `redirect_port` to it
    pub https_on: bool,
    pub host: String,
    /// App port: plaintext when `https_on` is false, TLS otherwise
    pub port: u16,
    /// Plaintext redirect port, only bound when `https_on`
    pub redirect_port: u16,
    pub retry: ListenRetry,
    /// Required when `https_on`
    pub credentials: Option<TlsCredentials>,
}

impl StartConfig {
    pub fn plain(host: impl Into<String>, port: u16) -> Self {
        Self {
            https_on: false,
            host: host.into(),
            port,
            redirect_port: DEFAULT_REDIRECT_PORT,
            retry: ListenRetry::default(),
            credentials: None,
        }
    }

    pub fn https(host: impl Into<String>, port: u16, credentials: Option<TlsCredentials>) -> Self {
        Self {
            https_on: true,
            host: host.into(),
            port,
            redirect_port: DEFAULT_REDIRECT_PORT,
            retry: ListenRetry::default(),
            credentials,
        }
    }

    pub fn with_retry(mut self, retry: ListenRetry) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_redirect_port(mut self, redirect_port: u16) -> Self {
        self.redirect_port = redirect_port;
        self
    }
}
