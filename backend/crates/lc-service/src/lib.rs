mod command;
pub mod controller;
pub mod error;
pub mod sc;
pub mod service_action;
pub mod service_control;
pub mod service_status;
pub mod systemctl;

#[cfg(test)]
mod tests;

pub use controller::{ExternalServiceController, StatusPoll};
pub use error::{ControlApiError, Result, ServiceControlFailure, ServiceOperation};
pub use sc::ScControl;
pub use service_action::ServiceAction;
pub use service_control::{ServiceControl, default_control};
pub use service_status::ServiceStatus;
pub use systemctl::SystemctlControl;

use std::time::Duration;

/// Upper bound on a single `systemctl`/`sc` invocation.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Service names are passed straight to the platform tool as an argument.
pub fn is_valid_service_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 256
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
}
