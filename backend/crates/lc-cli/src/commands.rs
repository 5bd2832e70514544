use crate::DbCommands;

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Managed database service
    Db {
        #[command(subcommand)]
        action: DbCommands,
    },

    /// Block until an HTTP(S) endpoint answers without a 5xx
    Wait {
        /// Endpoint to probe, e.g. https://localhost:3000/health
        url: String,

        /// PEM CA bundle to trust (defaults to probe.ca_cert_path)
        #[arg(long)]
        ca_cert: Option<PathBuf>,

        /// Maximum number of attempts (defaults to probe.max_attempts)
        #[arg(long)]
        attempts: Option<u32>,

        /// Delay between attempts in milliseconds (defaults to probe.interval_ms)
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}
