//! WASM entry point for the Leptos CSR app
//!
//! Trunk compiles this to WASM; it mounts the dashboard to the document body.

use cinnamon_core::DashboardConfig;
use cinnamon_ui::{App, config, logging};
use leptos::prelude::*;

fn main() {
    // Panics show up in the browser console instead of as `unreachable`
    console_error_panic_hook::set_once();

    let (config, problem) = match config::load() {
        Ok(config) => (config, None),
        Err(e) => (DashboardConfig::default(), Some(e)),
    };
    logging::init(&config.log_filter);
    if let Some(e) = problem {
        tracing::warn!(error = %e, "ignoring page configuration");
    }

    mount_to_body(move || {
        view! {
            <App config=config />
        }
    });
}
