use crate::{ListenerError, Result as ListenerResult};

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use rustls::ServerConfig;
use rustls_pki_types::pem::PemObject;
use rustls_pki_types::{CertificateDer, PrivateKeyDer};

/// PEM-encoded certificate chain and private key
#[derive(Clone, PartialEq, Eq)]
pub struct TlsCredentials {
    pub certificate: Vec<u8>,
    pub private_key: Vec<u8>,
}

impl TlsCredentials {
    pub fn new(certificate: impl Into<Vec<u8>>, private_key: impl Into<Vec<u8>>) -> Self {
        Self {
            certificate: certificate.into(),
            private_key: private_key.into(),
        }
    }

    /// Read both PEM files. An unreadable file is a configuration error.
    pub async fn load(cert_path: &Path, key_path: &Path) -> ListenerResult<Self> {
        let certificate = tokio::fs::read(cert_path).await.map_err(|e| {
            ListenerError::config_with_source(
                format!("certificate unreadable: {}", cert_path.display()),
                e,
            )
        })?;

        let private_key = tokio::fs::read(key_path).await.map_err(|e| {
            ListenerError::config_with_source(
                format!("private key unreadable: {}", key_path.display()),
                e,
            )
        })?;

        Ok(Self {
            certificate,
            private_key,
        })
    }

    pub fn is_complete(&self) -> bool {
        !self.certificate.is_empty() && !self.private_key.is_empty()
    }

    /// Parse into a rustls server config advertising h2 and http/1.1.
    pub fn server_config(&self) -> ListenerResult<Arc<ServerConfig>> {
        let certs = CertificateDer::pem_slice_iter(&self.certificate)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ListenerError::config_with_source("certificate is not valid PEM", e))?;

        if certs.is_empty() {
            return Err(ListenerError::config("no certificate found in PEM"));
        }

        let key = PrivateKeyDer::from_pem_slice(&self.private_key)
            .map_err(|e| ListenerError::config_with_source("private key is not valid PEM", e))?;

        let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
        let mut config = ServerConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| ListenerError::config_with_source("TLS protocol setup failed", e))?
            .with_no_client_auth()
            .with_single_cert(certs, key)
            .map_err(|e| {
                ListenerError::config_with_source("certificate and private key do not match", e)
            })?;

        config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

        Ok(Arc::new(config))
    }
}

// Never print key material.
impl fmt::Debug for TlsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsCredentials")
            .field("certificate", &format_args!("{} bytes", self.certificate.len()))
            .field("private_key", &format_args!("{} bytes", self.private_key.len()))
            .finish()
    }
}
