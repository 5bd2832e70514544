use std::fmt;

/// Outcome of a successful start/shutdown request.
///
/// Failures are reported as `ServiceControlFailure`, never as an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    /// Service was already in the requested state
    Noop = 0,
    /// A state transition was performed and confirmed
    Performed = 1,
}

impl ServiceAction {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
