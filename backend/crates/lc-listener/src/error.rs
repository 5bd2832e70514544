use crate::ListenerState;

use std::error::Error as StdError;
use std::io;
use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ListenerError {
    /// Malformed or incomplete listener configuration. Never retried.
    #[error("Listener config error: {message} {location}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedError>,
        location: ErrorLocation,
    },

    /// Bind failed. Carries the OS error code of the last attempt.
    #[error(
        "Listener '{name}' failed to listen on port {port} after {attempts} attempt(s): {source} {location}"
    )]
    Listen {
        name: String,
        port: u16,
        attempts: u32,
        os_code: Option<i32>,
        #[source]
        source: io::Error,
        location: ErrorLocation,
    },

    /// Caller misuse of the listener state machine.
    #[error("Listener '{name}' cannot {operation} while {state} {location}")]
    InvalidState {
        name: String,
        operation: &'static str,
        state: ListenerState,
        location: ErrorLocation,
    },

    /// The accept loop ended with an error. Only ever reported, never returned by `listen`.
    #[error("Listener '{name}' accept loop failed: {source} {location}")]
    Serve {
        name: String,
        #[source]
        source: BoxedError,
        location: ErrorLocation,
    },
}

impl ListenerError {
    #[track_caller]
    pub fn config<S: Into<String>>(message: S) -> Self {
        ListenerError::Config {
            message: message.into(),
            source: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn config_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<BoxedError>,
    {
        ListenerError::Config {
            message: message.into(),
            source: Some(source.into()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn listen(name: &str, port: u16, attempts: u32, source: io::Error) -> Self {
        ListenerError::Listen {
            name: name.to_string(),
            port,
            attempts,
            os_code: source.raw_os_error(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_state(name: &str, operation: &'static str, state: ListenerState) -> Self {
        ListenerError::InvalidState {
            name: name.to_string(),
            operation,
            state,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn serve<E: Into<BoxedError>>(name: &str, source: E) -> Self {
        ListenerError::Serve {
            name: name.to_string(),
            source: source.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// OS error code of a bind failure (e.g. EADDRINUSE).
    pub fn os_code(&self) -> Option<i32> {
        match self {
            Self::Listen { os_code, .. } => *os_code,
            _ => None,
        }
    }

    /// `io::ErrorKind` of a bind failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Listen { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    pub fn is_addr_in_use(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::AddrInUse)
    }

    /// Number of bind attempts made before giving up (0 for non-bind errors).
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Listen { attempts, .. } => *attempts,
            _ => 0,
        }
    }
}

pub type Result<T> = std::result::Result<T, ListenerError>;
