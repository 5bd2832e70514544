use std::fmt;

/// Listener lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    /// Created or configured, never bound
    Idle,
    /// Holds exactly one bound socket
    Listening,
    /// Socket released by `stop`
    Stopped,
    /// Last `listen` failed; nothing is held
    Failed,
}

impl fmt::Display for ListenerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Listening => "listening",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
        };
        write!(f, "{label}")
    }
}
