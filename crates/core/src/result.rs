//! Result type definition and logging extensions.
//!
//! The dashboard has exactly one recovery strategy for most failures: log and
//! carry on. These combinators keep that strategy out of the call sites.

use crate::error::Error;

/// The standard Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait providing logging combinators for Results.
pub trait ResultExt<T> {
    /// Convert a Result to an Option, logging the error as a warning.
    fn into_option_logged(self, context: &str) -> Option<T>;

    /// Get the value or a default, logging the error as a warning.
    fn or_default_logged(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn into_option_logged(self, context: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "{context}");
                None
            }
        }
    }

    fn or_default_logged(self, default: T, context: &str) -> T {
        self.into_option_logged(context).unwrap_or(default)
    }
}
