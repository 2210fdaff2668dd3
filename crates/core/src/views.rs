//! Top-level panel selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::result::Result;

/// Top-level panels reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Connections,
    Services,
    Errors,
    Settings,
}

impl View {
    /// All views in navigation order.
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Connections,
        Self::Services,
        Self::Errors,
        Self::Settings,
    ];

    /// Element id of the panel.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Connections => "connections",
            Self::Services => "services",
            Self::Errors => "errors",
            Self::Settings => "settings",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Connections => "Connections",
            Self::Services => "Services",
            Self::Errors => "Errors",
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for View {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|view| view.id() == s)
            .ok_or_else(|| Error::UnknownView(s.to_string()))
    }
}

/// Exactly one active view at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewRouter {
    selected: View,
}

impl ViewRouter {
    #[must_use]
    pub const fn new(initial: View) -> Self {
        Self { selected: initial }
    }

    #[must_use]
    pub const fn selected(&self) -> View {
        self.selected
    }

    /// Activates `view`, deactivating every other one.
    pub const fn select(&mut self, view: View) {
        self.selected = view;
    }

    /// Activates the view with the given navigation id.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id; the selection is unchanged.
    pub fn select_id(&mut self, id: &str) -> Result<View> {
        let view = id.parse()?;
        self.select(view);
        Ok(view)
    }

    #[must_use]
    pub fn is_active(&self, view: View) -> bool {
        self.selected == view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_dashboard() {
        let router = ViewRouter::default();
        assert_eq!(router.selected(), View::Dashboard);
    }

    #[test]
    fn test_select_activates_exactly_one() {
        let mut router = ViewRouter::default();
        router.select(View::Errors);

        let active: Vec<View> = View::ALL
            .into_iter()
            .filter(|v| router.is_active(*v))
            .collect();
        assert_eq!(active, vec![View::Errors]);
    }

    #[test]
    fn test_select_id_unknown_keeps_selection() {
        let mut router = ViewRouter::new(View::Services);
        assert_eq!(
            router.select_id("billing"),
            Err(Error::UnknownView("billing".to_string()))
        );
        assert_eq!(router.selected(), View::Services);
        assert_eq!(router.select_id("settings"), Ok(View::Settings));
    }

    #[test]
    fn test_view_ids_unique() {
        let ids: std::collections::HashSet<_> = View::ALL.iter().map(|v| v.id()).collect();
        assert_eq!(ids.len(), View::ALL.len());
    }
}
