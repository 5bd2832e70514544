use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// Start the service unless it is already running. Prints 0 or 1.
    Start {
        /// Service name (defaults to database.service_name)
        #[arg(long)]
        service: Option<String>,
    },

    /// Stop the service unless it is already stopped. Prints 0 or 1.
    Stop {
        /// Service name (defaults to database.service_name)
        #[arg(long)]
        service: Option<String>,
    },
}
