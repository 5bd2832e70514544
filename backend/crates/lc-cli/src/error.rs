use lc_config::ConfigError;
use lc_probe::ProbeError;
use lc_service::ServiceControlFailure;

use std::error::Error as StdError;
use std::fmt::Write;
use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Headline is "<service> start up failure" / "<service> shutdown failure"
    #[error(transparent)]
    Service(#[from] ServiceControlFailure),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("Cannot read {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },
}

impl CliError {
    #[track_caller]
    pub fn io(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The message followed by one `caused by:` line per `source()` link.
    pub fn with_causes(&self) -> String {
        let mut rendered = self.to_string();
        let mut source: Option<&(dyn StdError + 'static)> = self.source();
        while let Some(cause) = source {
            let _ = write!(rendered, "\n  caused by: {cause}");
            source = cause.source();
        }
        rendered
    }
}

pub type CliResult<T> = std::result::Result<T, CliError>;
