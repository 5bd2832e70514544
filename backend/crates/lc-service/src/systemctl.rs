use crate::command::run;
use crate::{DEFAULT_COMMAND_TIMEOUT, Result, ServiceControl, ServiceStatus};

use std::time::Duration;

use async_trait::async_trait;

const PROGRAM: &str = "systemctl";

/// systemd units via `systemctl`
#[derive(Debug, Clone)]
pub struct SystemctlControl {
    command_timeout: Duration,
}

impl SystemctlControl {
    pub fn new(command_timeout: Duration) -> Self {
        Self { command_timeout }
    }
}

impl Default for SystemctlControl {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

#[async_trait]
impl ServiceControl for SystemctlControl {
    fn backend(&self) -> &'static str {
        PROGRAM
    }

    async fn query(&self, service_name: &str) -> Result<ServiceStatus> {
        // is-active exits non-zero for anything but active; stdout is what counts
        let output = run(PROGRAM, &["is-active", service_name], self.command_timeout).await?;
        Ok(parse_is_active(&output.stdout))
    }

    async fn start(&self, service_name: &str) -> Result<()> {
        run(PROGRAM, &["start", service_name], self.command_timeout)
            .await?
            .check()?;
        Ok(())
    }

    async fn stop(&self, service_name: &str) -> Result<()> {
        run(PROGRAM, &["stop", service_name], self.command_timeout)
            .await?
            .check()?;
        Ok(())
    }
}

/// Map `systemctl is-active` output to a status
pub fn parse_is_active(stdout: &str) -> ServiceStatus {
    match stdout.lines().next().map(str::trim) {
        Some("active") | Some("reloading") => ServiceStatus::Running,
        Some("inactive") | Some("failed") => ServiceStatus::Stopped,
        _ => ServiceStatus::Unknown,
    }
}
