use crate::{HealthState, Result as ServerResult, build_router};

use lc_config::Config;
use lc_core::ErrorReporter;
use lc_listener::{
    ListenRetry, ListenerError, ServerLifecycleManager, ServerRegistry, ShutdownCoordinator,
    StartConfig, TlsCredentials,
};
use lc_service::ExternalServiceController;

use std::sync::Arc;

use log::info;

/// Brings the process up (database, then listeners) and takes it down again.
pub struct Launcher {
    config: Config,
    reporter: Arc<ErrorReporter>,
    coordinator: ShutdownCoordinator,
    manager: ServerLifecycleManager,
    registry: ServerRegistry,
    database: Option<ExternalServiceController>,
}

impl Launcher {
    pub fn new(
        config: Config,
        reporter: Arc<ErrorReporter>,
        coordinator: ShutdownCoordinator,
    ) -> Self {
        let manager = ServerLifecycleManager::new(Arc::clone(&reporter))
            .with_drain_grace(config.server.drain_grace());

        Self {
            config,
            reporter,
            coordinator,
            manager,
            registry: ServerRegistry::new(),
            database: None,
        }
    }

    /// Manage `database.service_name` around the listeners' lifetime
    pub fn with_database(mut self, controller: Option<ExternalServiceController>) -> Self {
        self.database = controller;
        self
    }

    pub fn registry(&self) -> &ServerRegistry {
        &self.registry
    }

    /// Start the database (if managed) and every listener.
    ///
    /// Listeners that did come up before a failure stay registered so
    /// `teardown` can stop them.
    pub async fn start(&self) -> ServerResult<()> {
        self.coordinator.track(&self.registry).await;

        if let Some(ref database) = self.database {
            let action = database
                .start_db(&self.config.database.service_name)
                .await?;
            info!(
                "Database '{}' ready (action {})",
                self.config.database.service_name,
                action.code()
            );
        }

        let start_config = self.start_config().await?;
        let app = build_router(HealthState {
            shutdown: self.coordinator.clone(),
            https_on: start_config.https_on,
            database: self
                .database
                .as_ref()
                .map(|_| self.config.database.service_name.clone()),
        });

        self.manager
            .start(&start_config, app, &self.registry)
            .await?;

        info!(
            "Server ready, {} listener(s) up",
            self.registry.listening_count().await
        );

        Ok(())
    }

    /// `start`, then block until the shutdown coordinator fires.
    pub async fn run_until_shutdown(&self) -> ServerResult<()> {
        let mut guard = self.coordinator.subscribe_guard();
        self.start().await?;
        guard.wait().await;
        Ok(())
    }

    /// Stop every listener, then the managed database. Never fails; faults
    /// go to the error reporter.
    pub async fn teardown(&self) {
        let drained = self.coordinator.drain_all(&self.manager).await;
        info!("Teardown: {} listener(s) stopped", drained);

        if let Some(ref database) = self.database {
            if let Err(failure) = database
                .shutdown_db(&self.config.database.service_name)
                .await
            {
                self.reporter.report_now(failure);
            }
        }
    }

    async fn start_config(&self) -> ServerResult<StartConfig> {
        let server = &self.config.server;
        let retry = ListenRetry::new(self.config.retry.retries, self.config.retry.retry_delay());

        let start_config = if server.https_on {
            let credentials = match self.config.tls_paths()? {
                Some((cert_path, key_path)) => {
                    Some(TlsCredentials::load(&cert_path, &key_path).await?)
                }
                None => {
                    return Err(ListenerError::config(
                        "https_on requires tls.cert_path and tls.key_path",
                    )
                    .into());
                }
            };
            StartConfig::https(server.host.clone(), server.https_port, credentials)
        } else {
            StartConfig::plain(server.host.clone(), server.port)
        };

        Ok(start_config
            .with_redirect_port(server.redirect_port)
            .with_retry(retry))
    }
}
