use crate::FORCED_EXIT_CODE;

use lc_listener::ShutdownCoordinator;

use log::{error, info, warn};
use tokio::task::JoinHandle;

/// Spawn the SIGINT handler.
///
/// The first interrupt triggers a graceful shutdown. A second one while the
/// drain is still running exits the process immediately.
pub fn install(coordinator: ShutdownCoordinator) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for SIGINT: {}", e);
            return;
        }

        info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
        coordinator.shutdown();

        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Second SIGINT during shutdown, exiting immediately");
            std::process::exit(FORCED_EXIT_CODE);
        }
    })
}
