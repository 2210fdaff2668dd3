//! Dashboard configuration.
//!
//! Every field has a default, so a partial JSON document (or none at all) is
//! a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::result::Result;
use crate::scheduler::RefreshConfig;

/// Static settings of one dashboard session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix for the API paths; empty means same origin.
    pub api_base: String,
    pub stats_path: String,
    pub connections_path: String,
    /// Cadence used until the user picks another one; must be one of
    /// `interval_choices_secs`.
    pub refresh: RefreshConfig,
    /// Seconds offered by the refresh-interval selector.
    pub interval_choices_secs: Vec<u32>,
    /// Storage key of the theme preference.
    pub theme_key: String,
    /// Number of hourly buckets in the time-series charts.
    pub trend_window_hours: u32,
    /// `tracing` filter directive for the browser console.
    pub log_filter: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            stats_path: "/api/connections/stats".to_string(),
            connections_path: "/api/connections".to_string(),
            refresh: RefreshConfig::DEFAULT,
            interval_choices_secs: vec![5, 10, 30, 60],
            theme_key: "theme".to_string(),
            trend_window_hours: 24,
            log_filter: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parses a JSON document and validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        if self.trend_window_hours == 0 {
            return Err(Error::invalid_config("trend_window_hours must be positive"));
        }
        if self.interval_choices_secs.is_empty() {
            return Err(Error::invalid_config("interval_choices_secs must not be empty"));
        }
        if let Some(bad) = self
            .interval_choices_secs
            .iter()
            .find(|&&secs| RefreshConfig::from_secs(secs).is_err())
        {
            return Err(Error::invalid_config(format!(
                "interval choice {bad}s is not a valid refresh interval"
            )));
        }
        let refresh_ms = self.refresh.interval_ms();
        if !self
            .interval_choices_secs
            .iter()
            .any(|&secs| RefreshConfig::from_secs(secs).is_ok_and(|c| c.interval_ms() == refresh_ms))
        {
            return Err(Error::invalid_config(format!(
                "refresh of {refresh_ms}ms is not one of interval_choices_secs"
            )));
        }
        if self.theme_key.trim().is_empty() {
            return Err(Error::invalid_config("theme_key must not be empty"));
        }
        for path in [&self.stats_path, &self.connections_path] {
            if !path.starts_with('/') {
                return Err(Error::invalid_config(format!(
                    "API path '{path}' must start with '/'"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn stats_url(&self) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), self.stats_path)
    }

    #[must_use]
    pub fn connections_url(&self) -> String {
        format!(
            "{}{}",
            self.api_base.trim_end_matches('/'),
            self.connections_path
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_defaults_match_backend_routes() {
        let config = DashboardConfig::default();
        assert_eq!(config.stats_url(), "/api/connections/stats");
        assert_eq!(config.connections_url(), "/api/connections");
        assert_eq!(config.refresh.interval_ms(), 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            DashboardConfig::from_json(r#"{"api_base": "http://monitor:8080/", "refresh": 10000}"#)
                .unwrap();
        assert_eq!(config.stats_url(), "http://monitor:8080/api/connections/stats");
        assert_eq!(config.refresh.interval_ms(), 10_000);
        assert_eq!(config.trend_window_hours, 24);
    }

    #[test]
    fn test_refresh_must_be_a_selectable_choice() {
        assert!(DashboardConfig::from_json(r#"{"refresh": 7500}"#).is_err());
        assert!(DashboardConfig::from_json(r#"{"refresh": 15000}"#).is_err());
        let config =
            DashboardConfig::from_json(r#"{"refresh": 15000, "interval_choices_secs": [15, 60]}"#)
                .unwrap();
        assert_eq!(config.refresh.interval_ms(), 15_000);
    }

    #[test]
    fn test_zero_refresh_rejected() {
        assert!(DashboardConfig::from_json(r#"{"refresh": 0}"#).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = DashboardConfig {
            trend_window_hours: 0,
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());

        let config = DashboardConfig {
            interval_choices_secs: vec![5, 0],
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());

        let config = DashboardConfig {
            interval_choices_secs: vec![10, 30],
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());

        let config = DashboardConfig {
            stats_path: "api/stats".to_string(),
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
