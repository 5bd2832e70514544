pub mod error;
pub mod health;
pub mod launcher;
pub mod logger;
pub mod routes;
pub mod signals;

#[cfg(test)]
mod tests;

pub use crate::error::{Result, ServerError};
pub use crate::health::HealthState;
pub use crate::launcher::Launcher;
pub use crate::routes::build_router;

/// Exit status after a second interrupt cuts the drain short (128 + SIGINT)
pub const FORCED_EXIT_CODE: i32 = 130;
