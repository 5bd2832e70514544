pub mod error;
pub mod lifecycle_manager;
pub mod listen_retry;
pub mod listener_kind;
pub mod listener_state;
pub mod listener_summary;
pub mod network_listener;
pub mod redirect;
pub mod server_registry;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod start_config;
pub mod tls_credentials;

#[cfg(test)]
mod tests;

pub use error::{ListenerError, Result};
pub use lifecycle_manager::ServerLifecycleManager;
pub use listen_retry::{IsRetryable, ListenRetry, RetryFailure, with_retry};
pub use listener_kind::ListenerKind;
pub use listener_state::ListenerState;
pub use listener_summary::ListenerSummary;
pub use network_listener::NetworkListener;
pub use redirect::{https_location, redirect_router};
pub use server_registry::ServerRegistry;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use start_config::StartConfig;
pub use tls_credentials::TlsCredentials;

use std::time::Duration;

/// Default upper bound on draining in-flight connections at stop.
pub const DEFAULT_DRAIN_GRACE: Duration = Duration::from_secs(5);

/// Extra wait on top of the drain grace before the accept task is aborted.
const STOP_MARGIN: Duration = Duration::from_millis(500);

/// Port the plaintext listener redirects from when https is on.
pub const DEFAULT_REDIRECT_PORT: u16 = 80;
