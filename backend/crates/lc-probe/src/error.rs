use std::error::Error as StdError;
use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ProbeError {
    /// Every attempt failed.
    #[error("{target} unreachable after {attempts} attempt(s): {last_error} {location}")]
    Unreachable {
        target: String,
        attempts: u32,
        last_error: String,
        location: ErrorLocation,
    },

    #[error("Invalid trust anchor: {message} {location}")]
    TrustAnchor {
        message: String,
        #[source]
        source: Option<BoxedError>,
        location: ErrorLocation,
    },

    #[error("Invalid probe target '{target}': {source} {location}")]
    InvalidTarget {
        target: String,
        #[source]
        source: BoxedError,
        location: ErrorLocation,
    },

    #[error("HTTP client setup failed: {source} {location}")]
    Client {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },
}

impl ProbeError {
    #[track_caller]
    pub fn unreachable(target: &str, attempts: u32, last_error: impl Into<String>) -> Self {
        Self::Unreachable {
            target: target.to_string(),
            attempts,
            last_error: last_error.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn trust_anchor(message: impl Into<String>, source: Option<BoxedError>) -> Self {
        Self::TrustAnchor {
            message: message.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_target<E: Into<BoxedError>>(target: &str, source: E) -> Self {
        Self::InvalidTarget {
            target: target.to_string(),
            source: source.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Attempts made before giving up (0 when no attempt was made)
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Unreachable { attempts, .. } => *attempts,
            _ => 0,
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::Client {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
