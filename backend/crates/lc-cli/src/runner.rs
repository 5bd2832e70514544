use crate::{CliError, CliResult, Commands, DbCommands};

use lc_config::Config;
use lc_probe::ReachabilityProbe;
use lc_service::{ExternalServiceController, ServiceControl, StatusPoll};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Executes one parsed command and returns the line to print on success
pub struct Runner {
    config: Config,
    control: Arc<dyn ServiceControl>,
}

impl Runner {
    pub fn new(config: Config, control: Arc<dyn ServiceControl>) -> Self {
        Self { config, control }
    }

    pub async fn run(&self, command: Commands) -> CliResult<String> {
        match command {
            Commands::Db { action } => self.db(action).await,
            Commands::Wait {
                url,
                ca_cert,
                attempts,
                interval_ms,
            } => self.wait(&url, ca_cert, attempts, interval_ms).await,
        }
    }

    async fn db(&self, action: DbCommands) -> CliResult<String> {
        let controller = ExternalServiceController::new(
            Arc::clone(&self.control),
            StatusPoll {
                attempts: self.config.database.poll_attempts,
                interval: self.config.database.poll_interval(),
            },
        );

        let action = match action {
            DbCommands::Start { service } => {
                let name = service.unwrap_or_else(|| self.config.database.service_name.clone());
                controller.start_db(&name).await?
            }
            DbCommands::Stop { service } => {
                let name = service.unwrap_or_else(|| self.config.database.service_name.clone());
                controller.shutdown_db(&name).await?
            }
        };

        Ok(action.code().to_string())
    }

    async fn wait(
        &self,
        url: &str,
        ca_cert: Option<PathBuf>,
        attempts: Option<u32>,
        interval_ms: Option<u64>,
    ) -> CliResult<String> {
        let ca_path = match ca_cert {
            Some(path) => Some(path),
            None => self.config.probe_ca_path()?,
        };

        let trust_anchor = match ca_path {
            Some(path) => Some(
                tokio::fs::read(&path)
                    .await
                    .map_err(|e| CliError::io(path.clone(), e))?,
            ),
            None => None,
        };

        let probe = ReachabilityProbe::new(trust_anchor.as_deref())?
            .with_max_attempts(attempts.unwrap_or(self.config.probe.max_attempts))
            .with_interval(
                interval_ms
                    .map(Duration::from_millis)
                    .unwrap_or_else(|| self.config.probe.interval()),
            );

        let response = probe.wait_until_up(url).await?;

        Ok(format!("{} is up (HTTP {})", url, response.status))
    }
}
