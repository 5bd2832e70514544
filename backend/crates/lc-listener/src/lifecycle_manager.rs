use crate::{
    DEFAULT_DRAIN_GRACE, ListenerError, ListenerKind, ListenerSummary, NetworkListener,
    Result as ListenerResult, ServerRegistry, StartConfig, redirect_router,
};

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use lc_core::ErrorReporter;
use log::info;

const HTTP_LISTENER_NAME: &str = "http";
const HTTPS_LISTENER_NAME: &str = "https";

/// Brings up the http (and optionally https) listeners for a process and
/// tears every registered listener down again.
pub struct ServerLifecycleManager {
    reporter: Arc<ErrorReporter>,
    drain_grace: Duration,
}

impl ServerLifecycleManager {
    pub fn new(reporter: Arc<ErrorReporter>) -> Self {
        Self {
            reporter,
            drain_grace: DEFAULT_DRAIN_GRACE,
        }
    }

    pub fn with_drain_grace(mut self, drain_grace: Duration) -> Self {
        self.drain_grace = drain_grace;
        self
    }

    /// Create, listen on and register the listeners `config` calls for.
    ///
    /// The plaintext listener is always bound first. With `https_on` it
    /// binds `redirect_port` and only redirects to the TLS port, then the
    /// encrypted listener binds `port` and serves `app`. Both listeners are
    /// configured before either binds, so missing TLS material fails without
    /// touching a socket. The TLS port must be fixed (non-zero) since the
    /// redirect rule is built before it binds. A listener is registered once it is listening; if
    /// a later one fails, earlier ones stay registered for `stop_all`.
    pub async fn start(
        &self,
        config: &StartConfig,
        app: Router,
        registry: &ServerRegistry,
    ) -> ListenerResult<()> {
        if !config.https_on {
            let mut http = self.listener(app);
            http.configure(ListenerKind::Plain, HTTP_LISTENER_NAME, None)?;
            http.listen(&config.host, config.port, &config.retry).await?;
            registry.append(http).await;
            return Ok(());
        }

        if config.port == 0 {
            return Err(ListenerError::config(
                "TLS port cannot be 0 with https on, the redirect needs a fixed target",
            ));
        }

        let mut http = self.listener(redirect_router(config.port));
        http.configure(ListenerKind::Plain, HTTP_LISTENER_NAME, None)?;

        let mut https = self.listener(app);
        https.configure(
            ListenerKind::Encrypted,
            HTTPS_LISTENER_NAME,
            config.credentials.clone(),
        )?;

        http.listen(&config.host, config.redirect_port, &config.retry)
            .await?;
        registry.append(http).await;

        https
            .listen(&config.host, config.port, &config.retry)
            .await?;
        registry.append(https).await;

        Ok(())
    }

    /// Stop every registered listener in order, then empty the registry.
    ///
    /// Never fails: listeners already stopped or failed are skipped, and
    /// stop faults are reported by the listener itself. Returns the final
    /// state of each listener that was drained.
    pub async fn stop_all(&self, registry: &ServerRegistry) -> Vec<ListenerSummary> {
        let mut members = registry.drain().await;
        if members.is_empty() {
            return Vec::new();
        }

        info!("Stopping {} listener(s)", members.len());

        let mut stopped = Vec::with_capacity(members.len());
        for listener in members.iter_mut() {
            listener.stop().await;
            stopped.push(listener.summary());
        }

        info!("Registry drained ({} listener(s))", stopped.len());

        stopped
    }

    fn listener(&self, app: Router) -> NetworkListener {
        NetworkListener::new(app, Arc::clone(&self.reporter)).with_drain_grace(self.drain_grace)
    }
}
