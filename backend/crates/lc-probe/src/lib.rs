pub mod error;
pub mod poll;
pub mod probe;


pub use error::{ProbeError, Result};
pub use poll::poll_until_up;
pub use probe::{ProbeResponse, ReachabilityProbe};

use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
/// Per-request bound, so a hung endpoint still counts as one failed attempt
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
