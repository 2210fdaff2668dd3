//! Theme application on the document root.

use cinnamon_core::{Theme, ThemeSurface};
use leptos::prelude::*;
use tracing::warn;

use crate::error::UiError;
use crate::platform::{document, window};

/// Media query of the platform dark-mode preference.
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Attribute the stylesheet keys the palette on.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Applies themes to `<html>` and reflects the toggle icon in a signal.
#[derive(Debug, Clone, Copy)]
pub struct DocumentTheme {
    icon: WriteSignal<&'static str>,
}

impl DocumentTheme {
    #[must_use]
    pub const fn new(icon: WriteSignal<&'static str>) -> Self {
        Self { icon }
    }
}

fn set_root_attribute(value: &str) -> crate::error::Result<()> {
    document()?
        .document_element()
        .ok_or(UiError::DocumentUnavailable)?
        .set_attribute(THEME_ATTRIBUTE, value)
        .map_err(UiError::from)
}

/// Fragment of the page URL, including the leading `#`; empty when absent.
#[must_use]
pub fn location_hash() -> String {
    window()
        .and_then(|w| w.location().hash().map_err(UiError::from))
        .unwrap_or_default()
}

impl ThemeSurface for DocumentTheme {
    fn prefers_dark(&self) -> bool {
        window()
            .and_then(|w| w.match_media(DARK_SCHEME_QUERY).map_err(UiError::from))
            .map(|list| list.is_some_and(|query| query.matches()))
            .unwrap_or(false)
    }

    fn apply(&self, theme: Theme) {
        if let Err(e) = set_root_attribute(theme.as_str()) {
            warn!(error = %e, %theme, "failed to apply theme");
        }
    }

    fn set_toggle_icon(&self, icon: &'static str) {
        self.icon.set(icon);
    }
}
