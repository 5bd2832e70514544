//! lc - lifecycle launch tooling
//!
//! ```bash
//! # Ensure the database is running (prints 1 if it was started, 0 if it already ran)
//! lc db start --service mongod
//!
//! # Block until the server answers
//! lc wait https://localhost:3000/health --ca-cert .lc/ca.pem
//! ```

use lc_cli::{Cli, Runner, logger};
use lc_config::Config;
use lc_service::default_control;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        if let Err(e) = logger::init_stderr(log::LevelFilter::Debug) {
            eprintln!("Failed to initialize logger: {}", e);
        }
    }

    let config = match Config::load().and_then(|config| config.validate().map(|()| config)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let control = default_control(config.database.command_timeout());

    match Runner::new(config, control).run(cli.command).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.with_causes());
            ExitCode::FAILURE
        }
    }
}
