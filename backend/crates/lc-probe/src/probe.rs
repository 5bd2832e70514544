use crate::{
    DEFAULT_INTERVAL, DEFAULT_MAX_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT, ProbeError, Result,
    poll_until_up,
};

use std::time::Duration;

use log::info;
use reqwest::{Certificate, Client, Url};
use rustls_pki_types::CertificateDer;
use rustls_pki_types::pem::PemObject;

/// First non-5xx answer from the probed endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    /// Attempt on which the endpoint answered
    pub attempts: u32,
}

/// Waits for an HTTP(S) endpoint to start answering
#[derive(Debug, Clone)]
pub struct ReachabilityProbe {
    client: Client,
    max_attempts: u32,
    interval: Duration,
    request_timeout: Duration,
}

impl ReachabilityProbe {
    /// `trust_anchor` is a PEM CA bundle added to the system roots, for
    /// servers with self-signed certificates.
    pub fn new(trust_anchor: Option<&[u8]>) -> Result<Self> {
        let mut builder = Client::builder();

        if let Some(pem) = trust_anchor {
            for certificate in parse_trust_anchor(pem)? {
                builder = builder.add_root_certificate(certificate);
            }
        }

        Ok(Self {
            client: builder.build()?,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// GET `target` until it answers with anything but a 5xx.
    ///
    /// Connection errors, timeouts and 5xx responses count as failed
    /// attempts.
    pub async fn wait_until_up(&self, target: &str) -> Result<ProbeResponse> {
        let url = Url::parse(target).map_err(|e| ProbeError::invalid_target(target, e))?;

        let response = poll_until_up(target, self.max_attempts, self.interval, |attempt| {
            let request = self
                .client
                .get(url.clone())
                .timeout(self.request_timeout);

            async move {
                let response = request.send().await.map_err(|e| e.to_string())?;
                let status = response.status();
                if status.is_server_error() {
                    return Err(format!("server answered {status}"));
                }
                Ok(ProbeResponse {
                    status: status.as_u16(),
                    attempts: attempt,
                })
            }
        })
        .await?;

        info!(
            "{} is up (HTTP {}, attempt {})",
            target, response.status, response.attempts
        );

        Ok(response)
    }
}

fn parse_trust_anchor(pem: &[u8]) -> Result<Vec<Certificate>> {
    let ders = CertificateDer::pem_slice_iter(pem)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ProbeError::trust_anchor("CA bundle is not valid PEM", Some(e.into())))?;

    if ders.is_empty() {
        return Err(ProbeError::trust_anchor("no certificate found in CA bundle", None));
    }

    ders.iter()
        .map(|der| {
            Certificate::from_der(der.as_ref())
                .map_err(|e| ProbeError::trust_anchor("CA certificate rejected", Some(e.into())))
        })
        .collect()
}
