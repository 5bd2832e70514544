use crate::{
    ControlApiError, Result as ControlResult, ServiceAction, ServiceControl,
    ServiceControlFailure, ServiceOperation, ServiceStatus, is_valid_service_name,
};

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::time::sleep;

const DEFAULT_POLL_ATTEMPTS: u32 = 10;
const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// How long to wait for a service to settle after a start/stop request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPoll {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for StatusPoll {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_POLL_ATTEMPTS,
            interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// Idempotent start/stop of an OS-managed service (the database).
///
/// Holds no service state of its own: every call queries first, so it is
/// safe to share and to call repeatedly.
#[derive(Clone)]
pub struct ExternalServiceController {
    control: Arc<dyn ServiceControl>,
    poll: StatusPoll,
}

impl ExternalServiceController {
    pub fn new(control: Arc<dyn ServiceControl>, poll: StatusPoll) -> Self {
        Self { control, poll }
    }

    /// Ensure `service_name` is running.
    ///
    /// `Noop` if it already was, `Performed` once a start was confirmed.
    pub async fn start_db(
        &self,
        service_name: &str,
    ) -> Result<ServiceAction, ServiceControlFailure> {
        self.ensure(service_name, ServiceOperation::Start).await
    }

    /// Ensure `service_name` is stopped.
    pub async fn shutdown_db(
        &self,
        service_name: &str,
    ) -> Result<ServiceAction, ServiceControlFailure> {
        self.ensure(service_name, ServiceOperation::Shutdown).await
    }

    async fn ensure(
        &self,
        service_name: &str,
        operation: ServiceOperation,
    ) -> Result<ServiceAction, ServiceControlFailure> {
        match self.transition(service_name, operation).await {
            Ok(action) => Ok(action),
            Err(source) => Err(ServiceControlFailure::new(service_name, operation, source)),
        }
    }

    async fn transition(
        &self,
        service_name: &str,
        operation: ServiceOperation,
    ) -> ControlResult<ServiceAction> {
        if !is_valid_service_name(service_name) {
            return Err(ControlApiError::invalid_name(service_name));
        }

        let desired = operation.desired_status();
        let current = self.control.query(service_name).await?;

        if current == desired {
            info!("Service '{}' already {}", service_name, desired);
            return Ok(ServiceAction::Noop);
        }

        info!(
            "Service '{}' is {}, requesting {} via {}",
            service_name,
            current,
            operation,
            self.control.backend()
        );

        match operation {
            ServiceOperation::Start => self.control.start(service_name).await?,
            ServiceOperation::Shutdown => self.control.stop(service_name).await?,
        }

        self.await_status(service_name, desired).await?;

        info!("Service '{}' is now {}", service_name, desired);
        Ok(ServiceAction::Performed)
    }

    async fn await_status(&self, service_name: &str, desired: ServiceStatus) -> ControlResult<()> {
        let attempts = self.poll.attempts.max(1);
        let mut last = ServiceStatus::Unknown;

        for attempt in 1..=attempts {
            last = self.control.query(service_name).await?;
            if last == desired {
                return Ok(());
            }

            debug!(
                "Service '{}' is {} (check {}/{}), waiting for {}",
                service_name, last, attempt, attempts, desired
            );

            if attempt < attempts {
                sleep(self.poll.interval).await;
            }
        }

        Err(ControlApiError::poll_exhausted(
            service_name,
            desired,
            last,
            attempts,
        ))
    }
}
