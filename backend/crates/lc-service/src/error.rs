use crate::ServiceStatus;

use std::fmt;
use std::io;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use thiserror::Error;

/// Which half of the lifecycle a `ServiceControlFailure` came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceOperation {
    Start,
    Shutdown,
}

impl ServiceOperation {
    pub fn desired_status(self) -> ServiceStatus {
        match self {
            ServiceOperation::Start => ServiceStatus::Running,
            ServiceOperation::Shutdown => ServiceStatus::Stopped,
        }
    }
}

impl fmt::Display for ServiceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceOperation::Start => write!(f, "start up"),
            ServiceOperation::Shutdown => write!(f, "shutdown"),
        }
    }
}

/// A start or shutdown request that did not reach the requested state.
///
/// Displays as `"<service> start up failure"` / `"<service> shutdown failure"`;
/// the underlying cause is available through `source()`.
#[derive(Error, Debug)]
#[error("{service_name} {operation} failure")]
pub struct ServiceControlFailure {
    pub service_name: String,
    pub operation: ServiceOperation,
    #[source]
    pub source: ControlApiError,
    pub location: ErrorLocation,
}

impl ServiceControlFailure {
    #[track_caller]
    pub fn new(service_name: &str, operation: ServiceOperation, source: ControlApiError) -> Self {
        Self {
            service_name: service_name.to_string(),
            operation,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Fault talking to the platform service manager
#[derive(Error, Debug)]
pub enum ControlApiError {
    #[error("Invalid service name '{name}' {location}")]
    InvalidName {
        name: String,
        location: ErrorLocation,
    },

    #[error("Failed to execute {program}: {source} {location}")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
        location: ErrorLocation,
    },

    #[error("{command} timed out after {}s {location}", .timeout.as_secs())]
    Timeout {
        command: String,
        timeout: Duration,
        location: ErrorLocation,
    },

    #[error("{command} exited with {code:?}: {stderr} {location}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
        location: ErrorLocation,
    },

    #[error(
        "'{service_name}' still {last} after {attempts} status check(s), expected {desired} {location}"
    )]
    PollExhausted {
        service_name: String,
        desired: ServiceStatus,
        last: ServiceStatus,
        attempts: u32,
        location: ErrorLocation,
    },
}

impl ControlApiError {
    #[track_caller]
    pub fn invalid_name(name: &str) -> Self {
        Self::InvalidName {
            name: name.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn spawn(program: &'static str, source: io::Error) -> Self {
        Self::Spawn {
            program,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn timeout(command: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            command: command.into(),
            timeout,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn command_failed(command: impl Into<String>, code: Option<i32>, stderr: &str) -> Self {
        Self::CommandFailed {
            command: command.into(),
            code,
            stderr: stderr.trim().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn poll_exhausted(
        service_name: &str,
        desired: ServiceStatus,
        last: ServiceStatus,
        attempts: u32,
    ) -> Self {
        Self::PollExhausted {
            service_name: service_name.to_string(),
            desired,
            last,
            attempts,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ControlApiError>;
