use crate::{Result, ScControl, ServiceStatus, SystemctlControl};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

/// Platform service manager seam
#[async_trait]
pub trait ServiceControl: Send + Sync {
    /// Short backend name for logs
    fn backend(&self) -> &'static str;

    async fn query(&self, service_name: &str) -> Result<ServiceStatus>;

    /// Ask the manager to start the service. Does not wait for it.
    async fn start(&self, service_name: &str) -> Result<()>;

    /// Ask the manager to stop the service. Does not wait for it.
    async fn stop(&self, service_name: &str) -> Result<()>;
}

/// Windows SCM on Windows, systemd everywhere else
pub fn default_control(command_timeout: Duration) -> Arc<dyn ServiceControl> {
    if cfg!(windows) {
        Arc::new(ScControl::new(command_timeout))
    } else {
        Arc::new(SystemctlControl::new(command_timeout))
    }
}
