//! Inline page configuration parsing.

use cinnamon_ui::config::parse;

#[test]
fn given_no_inline_config_then_defaults_apply() -> Result<(), String> {
    let config = parse(None).map_err(|e| e.to_string())?;

    assert_eq!(config.stats_url(), "/api/connections/stats");
    assert_eq!(config.refresh.interval_ms(), 5000);
    Ok(())
}

#[test]
fn given_partial_json_then_missing_fields_keep_defaults() -> Result<(), String> {
    let config = parse(Some(r#"{ "api_base": "https://stats.example/", "theme_key": "cinnamon-theme" }"#))
        .map_err(|e| e.to_string())?;

    assert_eq!(config.stats_url(), "https://stats.example/api/connections/stats");
    assert_eq!(config.connections_url(), "https://stats.example/api/connections");
    assert_eq!(config.theme_key, "cinnamon-theme");
    assert_eq!(config.interval_choices_secs, vec![5, 10, 30, 60]);
    Ok(())
}

#[test]
fn given_zero_interval_choice_then_config_is_rejected() {
    assert!(parse(Some(r#"{ "interval_choices_secs": [0, 5] }"#)).is_err());
}

#[test]
fn given_malformed_json_then_error_is_reported() {
    assert!(parse(Some("{ not json")).is_err());
}

#[test]
fn given_refresh_outside_the_selector_choices_then_config_is_rejected() {
    assert!(parse(Some(r#"{ "refresh": 2500 }"#)).is_err());
    assert!(parse(Some(r#"{ "refresh": 20000, "interval_choices_secs": [20] }"#)).is_ok());
}
