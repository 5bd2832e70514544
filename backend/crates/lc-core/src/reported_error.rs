use std::error::Error as StdError;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

/// An error on its way to the [`ErrorReporter`](crate::ErrorReporter).
///
/// Carries a `dumped` marker so that an error handed to several reporting
/// paths (component teardown, then the process entry point) is only written
/// to the log once.
pub struct ReportedError {
    inner: BoxedError,
    dumped: AtomicBool,
}

impl ReportedError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<BoxedError>,
    {
        Self {
            inner: error.into(),
            dumped: AtomicBool::new(false),
        }
    }

    /// Has this error already been written by a reporter?
    pub fn is_dumped(&self) -> bool {
        self.dumped.load(Ordering::Acquire)
    }

    /// Flip the marker. Returns `true` only for the call that flipped it.
    pub fn mark_dumped(&self) -> bool {
        !self.dumped.swap(true, Ordering::AcqRel)
    }

    /// The wrapped error.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    /// Consume the wrapper, returning the wrapped error.
    pub fn into_inner(self) -> BoxedError {
        self.inner
    }
}

impl fmt::Debug for ReportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportedError")
            .field("inner", &self.inner)
            .field("dumped", &self.is_dumped())
            .finish()
    }
}

impl fmt::Display for ReportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl StdError for ReportedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}
