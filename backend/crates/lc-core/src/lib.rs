pub mod error_reporter;
pub mod reported_error;


pub use error_reporter::ErrorReporter;
pub use reported_error::ReportedError;
