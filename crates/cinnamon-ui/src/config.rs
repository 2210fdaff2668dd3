//! Page-provided configuration.
//!
//! The host page may embed a JSON [`DashboardConfig`] in
//! `<script id="cinnamon-config" type="application/json">`. Missing fields
//! keep their defaults; a missing element means all defaults.

use cinnamon_core::DashboardConfig;

use crate::error::Result;
use crate::platform;

/// Element id of the inline configuration.
pub const CONFIG_ELEMENT_ID: &str = "cinnamon-config";

/// Parses the inline JSON, if any.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or fails validation.
pub fn parse(inline: Option<&str>) -> Result<DashboardConfig> {
    match inline.map(str::trim).filter(|json| !json.is_empty()) {
        Some(json) => Ok(DashboardConfig::from_json(json)?),
        None => Ok(DashboardConfig::default()),
    }
}

/// Reads and parses the configuration embedded in the page.
///
/// # Errors
///
/// Returns an error if the document is unavailable or the JSON is invalid.
pub fn load() -> Result<DashboardConfig> {
    let inline = platform::document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    parse(inline.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UiError;

    #[test]
    fn test_missing_or_blank_config_is_default() {
        assert_eq!(parse(None), Ok(DashboardConfig::default()));
        assert_eq!(parse(Some("  \n ")), Ok(DashboardConfig::default()));
    }

    #[test]
    fn test_inline_overrides() {
        let config = parse(Some(r#"{"refresh": 30000, "log_filter": "debug"}"#));
        let config = config.unwrap_or_default();
        assert_eq!(config.refresh.interval_ms(), 30_000);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_invalid_config_is_core_error() {
        assert!(matches!(
            parse(Some(r#"{"trend_window_hours": 0}"#)),
            Err(UiError::Core(cinnamon_core::Error::InvalidConfig { .. }))
        ));
    }
}
