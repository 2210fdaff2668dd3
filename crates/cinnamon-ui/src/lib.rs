//! Leptos 0.7 CSR frontend for the Cinnamon connection dashboard
//!
//! The refresh loop, presenters and chart data live in `cinnamon-core`;
//! this crate supplies the browser side of each seam and the views.
//!
//! ## Module Structure
//! - `app`: root component wiring the dashboard to its controls
//! - `components`: cards, charts, table, navigation and settings
//! - `state`: signals the dashboard renders into
//! - `platform`: HTTP, timers, storage, theme and notifications
//! - `config`: page-embedded configuration
//! - `logging`: `tracing` output to the browser console
//! - `error`: error types and handling

#![forbid(unsafe_code)]

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod state;

// Trunk mounts this from main
pub use app::App;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        let _app = App;
        let _cards = components::SummaryCards;
        assert_eq!(config::CONFIG_ELEMENT_ID, "cinnamon-config");
    }

    #[test]
    fn test_error_types() {
        let err = error::UiError::StorageUnavailable;
        assert!(err.to_string().to_lowercase().contains("storage"));
    }
}
