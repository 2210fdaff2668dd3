//! Error types for the browser shell
//!
//! Failures inside the refresh loop are already typed by `cinnamon-core`.
//! This covers what can go wrong while wiring the app to the page.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while talking to browser APIs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    #[error("browser window is not available")]
    WindowUnavailable,

    #[error("document is not available")]
    DocumentUnavailable,

    #[error("local storage is not available")]
    StorageUnavailable,

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error(transparent)]
    Core(#[from] cinnamon_core::Error),
}

pub type Result<T> = std::result::Result<T, UiError>;

/// Human-readable text of a thrown JavaScript value.
#[must_use]
pub fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::JSON::stringify(value)
                .ok()
                .and_then(|s| s.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        Self::Js(describe_js(&value))
    }
}

impl UiError {
    /// Maps into the core error for a failed storage call.
    #[must_use]
    pub fn into_storage(self, operation: &str) -> cinnamon_core::Error {
        match self {
            Self::Core(e) => e,
            other => cinnamon_core::Error::storage_failed(operation, other.to_string()),
        }
    }
}
