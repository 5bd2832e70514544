use crate::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "lc")]
#[command(about = "Start/stop the managed database and wait for servers to come up")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log progress to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}
