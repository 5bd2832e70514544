use crate::ReportedError;

use std::error::Error as StdError;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::error;

/// Process-wide error sink.
///
/// Built once by the composition root and handed to every component as an
/// `Arc<ErrorReporter>`. Reporting is idempotent per error value: the
/// `dumped` marker on [`ReportedError`] suppresses the second write.
#[derive(Debug)]
pub struct ErrorReporter {
    component: String,
    reported: AtomicUsize,
}

impl ErrorReporter {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            reported: AtomicUsize::new(0),
        }
    }

    /// Write `error` and its source chain at error level, once.
    ///
    /// Returns `false` when the error had already been dumped.
    pub fn report(&self, error: &ReportedError) -> bool {
        if !error.mark_dumped() {
            return false;
        }

        self.reported.fetch_add(1, Ordering::Relaxed);
        error!("[{}] {}", self.component, error);

        let mut source: Option<&(dyn StdError + 'static)> = error.source();
        while let Some(cause) = source {
            error!("[{}]   caused by: {}", self.component, cause);
            source = cause.source();
        }

        true
    }

    /// Wrap and report in one step, for errors that are not passed on.
    pub fn report_now<E>(&self, error: E) -> ReportedError
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        let reported = ReportedError::new(error);
        self.report(&reported);
        reported
    }

    /// Number of distinct errors written so far.
    pub fn report_count(&self) -> usize {
        self.reported.load(Ordering::Relaxed)
    }

    pub fn component(&self) -> &str {
        &self.component
    }
}
