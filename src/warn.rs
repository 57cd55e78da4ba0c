//! Construction-time diagnostics.
//!
//! Warnings are advisory. They never change the outcome of a build beyond
//! skipping the offending filter element, and they are never folded into
//! `Result` returns. The sink is supplied by the caller; the default
//! writes one line per warning to stderr.

use std::fmt;

/// A diagnostic emitted while normalizing filter values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A deprecated construction surface was used.
    Deprecated(String),

    /// A filter list contained another list, which was skipped.
    NestedFilterList,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deprecated(message) => f.write_str(message),
            Self::NestedFilterList => f.write_str(
                "Ignoring nested list [[...]] to avoid the possibility of infinite recursion.",
            ),
        }
    }
}

/// Receives warnings during strainer construction.
pub trait WarningSink: Send + Sync {
    /// Handle one warning.
    fn warn(&self, warning: &Warning);
}

/// The default sink: one line per warning on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl WarningSink for StderrSink {
    fn warn(&self, warning: &Warning) {
        eprintln!("warning: {warning}");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Collects warnings so tests can assert on them.
    #[derive(Debug, Default)]
    pub(crate) struct CollectSink {
        warnings: Mutex<Vec<Warning>>,
    }

    impl CollectSink {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub(crate) fn take(&self) -> Vec<Warning> {
            self.warnings.lock().unwrap().drain(..).collect()
        }
    }

    impl WarningSink for CollectSink {
        fn warn(&self, warning: &Warning) {
            self.warnings.lock().unwrap().push(warning.clone());
        }
    }
}
