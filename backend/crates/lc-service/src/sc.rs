use crate::command::run;
use crate::command::CommandOutput;
use crate::{DEFAULT_COMMAND_TIMEOUT, Result, ServiceControl, ServiceOperation, ServiceStatus};

use std::time::Duration;

use async_trait::async_trait;

const PROGRAM: &str = "sc";

// SERVICE_STATUS.dwCurrentState
const SERVICE_STOPPED: u32 = 1;
const SERVICE_RUNNING: u32 = 4;

// Win32 errors `sc` exits with when the service is already where it is headed
const ERROR_SERVICE_ALREADY_RUNNING: i32 = 1056;
const ERROR_SERVICE_NOT_ACTIVE: i32 = 1062;

/// Windows services via the Service Control Manager CLI
#[derive(Debug, Clone)]
pub struct ScControl {
    command_timeout: Duration,
}

impl ScControl {
    pub fn new(command_timeout: Duration) -> Self {
        Self { command_timeout }
    }
}

impl Default for ScControl {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

#[async_trait]
impl ServiceControl for ScControl {
    fn backend(&self) -> &'static str {
        PROGRAM
    }

    async fn query(&self, service_name: &str) -> Result<ServiceStatus> {
        let output = run(PROGRAM, &["query", service_name], self.command_timeout)
            .await?
            .check()?;
        Ok(parse_query(&output.stdout))
    }

    async fn start(&self, service_name: &str) -> Result<()> {
        let output = run(PROGRAM, &["start", service_name], self.command_timeout).await?;
        accept(output, ServiceOperation::Start)
    }

    async fn stop(&self, service_name: &str) -> Result<()> {
        let output = run(PROGRAM, &["stop", service_name], self.command_timeout).await?;
        accept(output, ServiceOperation::Shutdown)
    }
}

pub(crate) fn accept(output: CommandOutput, operation: ServiceOperation) -> Result<()> {
    if !output.success && is_request_in_flight(operation, output.code) {
        log::debug!(
            "`{}` exited {:?}, service already heading to {}",
            output.command,
            output.code,
            operation.desired_status()
        );
        return Ok(());
    }
    output.check()?;
    Ok(())
}

/// Whether a failed `sc start`/`sc stop` exit code only says the service
/// is already running (or no longer active). The caller still polls the
/// status afterwards.
pub fn is_request_in_flight(operation: ServiceOperation, code: Option<i32>) -> bool {
    matches!(
        (operation, code),
        (ServiceOperation::Start, Some(ERROR_SERVICE_ALREADY_RUNNING))
            | (ServiceOperation::Shutdown, Some(ERROR_SERVICE_NOT_ACTIVE))
    )
}

/// Extract the `STATE : <n> <NAME>` line of `sc query` output
pub fn parse_query(stdout: &str) -> ServiceStatus {
    let state = stdout
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("STATE"))
        .and_then(|line| line.split_once(':'))
        .and_then(|(_, value)| value.split_whitespace().next())
        .and_then(|code| code.parse::<u32>().ok());

    match state {
        Some(SERVICE_RUNNING) => ServiceStatus::Running,
        Some(SERVICE_STOPPED) => ServiceStatus::Stopped,
        _ => ServiceStatus::Unknown,
    }
}
