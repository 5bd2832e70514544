use crate::{
    DEFAULT_DRAIN_GRACE, ListenRetry, ListenerError, ListenerKind, ListenerState, ListenerSummary,
    Result as ListenerResult, STOP_MARGIN, TlsCredentials, with_retry,
};

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::{RustlsConfig, from_tcp_rustls};
use lc_core::ErrorReporter;
use log::{info, warn};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// A single bindable HTTP or HTTPS endpoint.
///
/// configure -> listen (with bounded retry) -> stop. The bound socket is
/// owned by the accept task; the listener owns that task and releases it on
/// `stop`, on a failed `listen`, and on drop.
pub struct NetworkListener {
    app: Router,
    reporter: Arc<ErrorReporter>,
    drain_grace: Duration,
    settings: Option<ListenerSettings>,
    state: ListenerState,
    bound: Option<BoundSocket>,
}

#[derive(Clone)]
struct ListenerSettings {
    kind: ListenerKind,
    name: String,
    credentials: Option<TlsCredentials>,
}

struct BoundSocket {
    local_addr: SocketAddr,
    server: Handle,
    task: JoinHandle<io::Result<()>>,
}

impl NetworkListener {
    pub fn new(app: Router, reporter: Arc<ErrorReporter>) -> Self {
        Self {
            app,
            reporter,
            drain_grace: DEFAULT_DRAIN_GRACE,
            settings: None,
            state: ListenerState::Idle,
            bound: None,
        }
    }

    pub fn with_drain_grace(mut self, drain_grace: Duration) -> Self {
        self.drain_grace = drain_grace;
        self
    }

    /// Assign kind, name and TLS material. No I/O.
    ///
    /// Credentials must be present with both buffers non-empty iff `kind`
    /// is `Encrypted`.
    pub fn configure(
        &mut self,
        kind: ListenerKind,
        name: impl Into<String>,
        credentials: Option<TlsCredentials>,
    ) -> ListenerResult<()> {
        let name = name.into();

        if self.state == ListenerState::Listening {
            return Err(ListenerError::invalid_state(
                &name,
                "configure",
                self.state,
            ));
        }

        if name.trim().is_empty() {
            return Err(ListenerError::config("listener name cannot be empty"));
        }

        match (kind, &credentials) {
            (ListenerKind::Plain, Some(_)) => {
                return Err(ListenerError::config(format!(
                    "plaintext listener '{name}' must not carry TLS credentials"
                )));
            }
            (ListenerKind::Encrypted, None) => {
                return Err(ListenerError::config(format!(
                    "encrypted listener '{name}' requires TLS credentials"
                )));
            }
            (ListenerKind::Encrypted, Some(creds)) if !creds.is_complete() => {
                return Err(ListenerError::config(format!(
                    "encrypted listener '{name}' has an empty certificate or private key"
                )));
            }
            _ => {}
        }

        self.settings = Some(ListenerSettings {
            kind,
            name,
            credentials,
        });

        Ok(())
    }

    /// Bind `host:port` and start accepting.
    ///
    /// Transient bind failures (port busy, EAGAIN) are retried per `retry`;
    /// anything else fails on the first attempt. Unusable TLS material fails
    /// before any bind is attempted. Port 0 asks the OS for a free port.
    pub async fn listen(
        &mut self,
        host: &str,
        port: u16,
        retry: &ListenRetry,
    ) -> ListenerResult<SocketAddr> {
        let Some(settings) = self.settings.clone() else {
            return Err(ListenerError::invalid_state(
                "<unconfigured>",
                "listen",
                self.state,
            ));
        };

        if self.state == ListenerState::Listening {
            return Err(ListenerError::invalid_state(
                &settings.name,
                "listen",
                self.state,
            ));
        }

        let tls = match (&settings.kind, &settings.credentials) {
            (ListenerKind::Encrypted, Some(credentials)) => match credentials.server_config() {
                Ok(config) => Some(RustlsConfig::from_config(config)),
                Err(e) => {
                    self.state = ListenerState::Failed;
                    return Err(e);
                }
            },
            _ => None,
        };

        let host_owned = host.to_string();
        let operation = format!("{} listen on {}:{}", settings.name, host, port);
        let bound = with_retry(retry, &operation, || {
            TcpListener::bind((host_owned.clone(), port))
        })
        .await;

        let listener = match bound {
            Ok(listener) => listener,
            Err(failure) => {
                self.state = ListenerState::Failed;
                return Err(ListenerError::listen(
                    &settings.name,
                    port,
                    failure.attempts,
                    failure.error,
                ));
            }
        };

        let (local_addr, std_listener) = match listener
            .local_addr()
            .and_then(|addr| listener.into_std().map(|std_listener| (addr, std_listener)))
        {
            Ok(pair) => pair,
            Err(e) => {
                self.state = ListenerState::Failed;
                return Err(ListenerError::listen(&settings.name, port, 1, e));
            }
        };

        let server = Handle::new();
        let make_service = self.app.clone().into_make_service();

        let task = match tls {
            Some(config) => tokio::spawn(
                from_tcp_rustls(std_listener, config)
                    .handle(server.clone())
                    .serve(make_service),
            ),
            None => tokio::spawn(
                axum_server::from_tcp(std_listener)
                    .handle(server.clone())
                    .serve(make_service),
            ),
        };

        self.bound = Some(BoundSocket {
            local_addr,
            server,
            task,
        });
        self.state = ListenerState::Listening;

        info!(
            "{} listener '{}' listening on {}://{}",
            settings.kind,
            settings.name,
            settings.kind.scheme(),
            local_addr
        );

        Ok(local_addr)
    }

    /// Stop accepting and drain in-flight connections, bounded by the
    /// drain grace period. No-op unless `Listening`.
    ///
    /// The socket is always released and the state always becomes
    /// `Stopped`; a failing accept loop is reported, not returned.
    pub async fn stop(&mut self) {
        if self.state != ListenerState::Listening {
            return;
        }

        let name = self.name().to_string();

        let Some(bound) = self.bound.take() else {
            self.state = ListenerState::Stopped;
            return;
        };

        bound.server.graceful_shutdown(Some(self.drain_grace));

        let mut task = bound.task;
        match timeout(self.drain_grace + STOP_MARGIN, &mut task).await {
            Ok(Ok(Ok(()))) => {}
            Ok(Ok(Err(e))) => {
                self.reporter.report_now(ListenerError::serve(&name, e));
            }
            Ok(Err(join_error)) => {
                self.reporter
                    .report_now(ListenerError::serve(&name, join_error));
            }
            Err(_) => {
                warn!(
                    "Listener '{}' did not drain within {:?}, aborting accept loop",
                    name, self.drain_grace
                );
                task.abort();
                let _ = task.await;
            }
        }

        self.state = ListenerState::Stopped;
        info!("Listener '{}' stopped ({})", name, bound.local_addr);
    }

    pub fn name(&self) -> &str {
        self.settings
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("<unconfigured>")
    }

    pub fn kind(&self) -> Option<ListenerKind> {
        self.settings.as_ref().map(|s| s.kind)
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    /// Bound address while `Listening`.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.bound.as_ref().map(|b| b.local_addr)
    }

    pub fn port(&self) -> Option<u16> {
        self.local_addr().map(|addr| addr.port())
    }

    pub fn summary(&self) -> ListenerSummary {
        ListenerSummary {
            name: self.name().to_string(),
            kind: self.kind().unwrap_or(ListenerKind::Plain),
            state: self.state,
            local_addr: self.local_addr(),
        }
    }
}

impl Drop for NetworkListener {
    fn drop(&mut self) {
        if let Some(bound) = self.bound.take() {
            warn!(
                "Listener '{}' dropped while listening on {}, closing",
                self.name(),
                bound.local_addr
            );
            bound.server.shutdown();
            bound.task.abort();
        }
    }
}
