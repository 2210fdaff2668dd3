//! Core error types for dashboard operations.
//!
//! All errors are explicit, typed, and recoverable - no panics allowed.
//! Refresh-cycle failures are logged and swallowed by the caller; every
//! other variant is returned to whoever asked for the operation.

use thiserror::Error;

/// Core error type for dashboard operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Backend errors
    #[error("request to '{url}' failed: {reason}")]
    RequestFailed { url: String, reason: String },

    #[error("request to '{url}' returned HTTP {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("failed to decode response from '{url}': {reason}")]
    DecodeFailed { url: String, reason: String },

    // Configuration errors
    #[error("refresh interval must be a positive number of milliseconds, got '{value}'")]
    InvalidInterval { value: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // Registry errors
    #[error("unknown chart: {0}")]
    UnknownChart(String),

    #[error("chart '{chart}' expects {expected} series, got {actual}")]
    SeriesCountMismatch {
        chart: String,
        expected: usize,
        actual: usize,
    },

    #[error("chart '{chart}' series '{series}' has {actual} points for {expected} labels")]
    SeriesLengthMismatch {
        chart: String,
        series: String,
        expected: usize,
        actual: usize,
    },

    #[error("unknown view: {0}")]
    UnknownView(String),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    // Platform errors
    #[error("storage operation '{operation}' failed: {reason}")]
    StorageFailed { operation: String, reason: String },

    #[error("notification permission request failed: {reason}")]
    PermissionFailed { reason: String },
}

impl Error {
    /// Create a request failure error.
    pub fn request_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a decode failure error.
    pub fn decode_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DecodeFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid interval error from the rejected raw value.
    pub fn invalid_interval(value: impl ToString) -> Self {
        Self::InvalidInterval {
            value: value.to_string(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a storage failure error.
    pub fn storage_failed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StorageFailed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from talking to the backend.
    ///
    /// Only these are expected during normal polling; the rest indicate a
    /// programming or configuration mistake.
    #[must_use]
    pub const fn is_backend(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed { .. } | Self::UnexpectedStatus { .. } | Self::DecodeFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::request_failed("/api/connections", "connection refused");
        assert_eq!(
            error.to_string(),
            "request to '/api/connections' failed: connection refused"
        );

        let error = Error::UnexpectedStatus {
            url: "/api/connections/stats".to_string(),
            status: 503,
        };
        assert_eq!(
            error.to_string(),
            "request to '/api/connections/stats' returned HTTP 503"
        );

        let error = Error::invalid_interval("0");
        assert!(error.to_string().contains("got '0'"));
    }

    #[test]
    fn test_backend_classification() {
        assert!(Error::decode_failed("/x", "eof").is_backend());
        assert!(!Error::UnknownChart("pie".to_string()).is_backend());
        assert!(!Error::invalid_interval(0).is_backend());
    }
}
