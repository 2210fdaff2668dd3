//! Browser implementations of the core traits.
//!
//! - `http`: [`cinnamon_core::StatsSource`] over `gloo-net`
//! - `timer`: [`cinnamon_core::IntervalTimer`] over `gloo-timers`
//! - `storage`: [`cinnamon_core::KeyValueStore`] over `localStorage`
//! - `document`: [`cinnamon_core::ThemeSurface`] over the root element
//! - `notifications`: [`cinnamon_core::Notifier`] over the Notification API

pub mod document;
pub mod http;
pub mod notifications;
pub mod storage;
pub mod timer;

pub use document::DocumentTheme;
pub use http::HttpStatsSource;
pub use notifications::BrowserNotifier;
pub use storage::LocalStorage;
pub use timer::{GlooTimer, IntervalHandle};

use crate::error::{Result, UiError};

pub(crate) fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or(UiError::WindowUnavailable)
}

pub(crate) fn document() -> Result<web_sys::Document> {
    window()?.document().ok_or(UiError::DocumentUnavailable)
}
