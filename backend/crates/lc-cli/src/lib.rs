//! lc-cli library
//!
//! Command definitions and the runner behind the `lc` binary, exported for
//! tests.

pub mod cli;
pub mod commands;
pub mod db_commands;
pub mod error;
pub mod logger;
pub mod runner;


pub use cli::Cli;
pub use commands::Commands;
pub use db_commands::DbCommands;
pub use error::{CliError, CliResult};
pub use runner::Runner;
