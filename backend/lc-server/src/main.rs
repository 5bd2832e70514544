use lc_config::Config;
use lc_core::ErrorReporter;
use lc_listener::ShutdownCoordinator;
use lc_server::{Launcher, logger, signals};
use lc_service::{ExternalServiceController, StatusPoll, default_control};

use std::process::ExitCode;
use std::sync::Arc;

use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load and validate configuration
    let config = match Config::load().and_then(|config| config.validate().map(|()| config)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("lc-server: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_file = match config.log_file_path() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("lc-server: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logger (before any other logging)
    if let Err(e) = logger::initialize(config.logging.level, log_file, config.logging.colored) {
        eprintln!("lc-server: {e}");
        return ExitCode::FAILURE;
    }

    info!("Starting lc-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let reporter = Arc::new(ErrorReporter::new("lc-server"));
    let coordinator = ShutdownCoordinator::new();
    signals::install(coordinator.clone());

    let database = config.database.manage.then(|| {
        ExternalServiceController::new(
            default_control(config.database.command_timeout()),
            StatusPoll {
                attempts: config.database.poll_attempts,
                interval: config.database.poll_interval(),
            },
        )
    });

    let launcher = Launcher::new(config, Arc::clone(&reporter), coordinator).with_database(database);

    let outcome = launcher.run_until_shutdown().await;

    // Partial registries are drained on the failure path too
    launcher.teardown().await;

    match outcome {
        Ok(()) => {
            info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            reporter.report_now(e);
            ExitCode::FAILURE
        }
    }
}
