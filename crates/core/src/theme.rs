//! Light/dark theme selection and persistence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::result::{Result, ResultExt};

/// Presentation theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon of the toggle button: it offers the opposite theme.
    #[must_use]
    pub const fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "moon",
            Self::Dark => "sun",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::UnknownTheme(other.to_string())),
        }
    }
}

/// Persistent string key-value storage.
pub trait KeyValueStore {
    /// Reads a value; `Ok(None)` when the key was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage is unavailable.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage is unavailable or full.
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// The document the theme is applied to.
pub trait ThemeSurface {
    /// Platform color-scheme preference.
    fn prefers_dark(&self) -> bool;

    /// Sets the document's theme attribute.
    fn apply(&self, theme: Theme);

    /// Updates the toggle control's icon.
    fn set_toggle_icon(&self, icon: &'static str);
}

/// Theme for a fresh session: stored value, then platform preference, then light.
///
/// An unrecognised stored value is ignored.
#[must_use]
pub fn resolve_initial(stored: Option<&str>, prefers_dark: bool) -> Theme {
    stored
        .and_then(|value| value.parse().ok())
        .unwrap_or(if prefers_dark { Theme::Dark } else { Theme::Light })
}

/// Owns the current theme and keeps document and storage in sync with it.
pub struct ThemeController<S, D> {
    store: S,
    surface: D,
    key: String,
    current: Theme,
}

impl<S: KeyValueStore, D: ThemeSurface> ThemeController<S, D> {
    /// Resolves the initial theme and applies it.
    ///
    /// Storage failures are logged; the dashboard still gets a theme.
    pub fn load(store: S, surface: D, key: impl Into<String>) -> Self {
        let key = key.into();
        let stored = store
            .load(&key)
            .or_default_logged(None, "failed to read stored theme");
        let current = resolve_initial(stored.as_deref(), surface.prefers_dark());

        let mut controller = Self {
            store,
            surface,
            key,
            current,
        };
        controller
            .set_theme(current)
            .or_default_logged((), "failed to persist initial theme");
        controller
    }

    #[must_use]
    pub const fn current(&self) -> Theme {
        self.current
    }

    /// Applies, persists and reflects `theme` in the toggle icon.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the theme is applied regardless.
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.current = theme;
        self.surface.apply(theme);
        self.surface.set_toggle_icon(theme.toggle_icon());
        self.store.save(&self.key, theme.as_str())
    }

    /// Parses a selector value and applies it.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown theme name or a failed save.
    pub fn select(&mut self, value: &str) -> Result<Theme> {
        let theme = value.parse()?;
        self.set_theme(theme)?;
        Ok(theme)
    }

    /// Flips between light and dark.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails; the theme is applied regardless.
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.current.toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;

    #[derive(Default, Clone)]
    struct MemoryStore {
        values: Rc<RefCell<HashMap<String, String>>>,
        broken: bool,
    }

    impl KeyValueStore for MemoryStore {
        fn load(&self, key: &str) -> Result<Option<String>> {
            if self.broken {
                return Err(Error::storage_failed("load", "quota"));
            }
            Ok(self.values.borrow().get(key).cloned())
        }

        fn save(&self, key: &str, value: &str) -> Result<()> {
            if self.broken {
                return Err(Error::storage_failed("save", "quota"));
            }
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    struct FakeDocument {
        dark_preference: bool,
        applied: Rc<RefCell<Vec<Theme>>>,
        icon: Rc<RefCell<&'static str>>,
    }

    impl ThemeSurface for FakeDocument {
        fn prefers_dark(&self) -> bool {
            self.dark_preference
        }

        fn apply(&self, theme: Theme) {
            self.applied.borrow_mut().push(theme);
        }

        fn set_toggle_icon(&self, icon: &'static str) {
            *self.icon.borrow_mut() = icon;
        }
    }

    #[test]
    fn test_resolve_initial_precedence() {
        assert_eq!(resolve_initial(Some("dark"), false), Theme::Dark);
        assert_eq!(resolve_initial(Some("light"), true), Theme::Light);
        assert_eq!(resolve_initial(None, true), Theme::Dark);
        assert_eq!(resolve_initial(None, false), Theme::Light);
        assert_eq!(resolve_initial(Some("sepia"), true), Theme::Dark);
    }

    #[test]
    fn test_load_applies_and_persists_initial_theme() {
        let store = MemoryStore::default();
        let document = FakeDocument {
            dark_preference: true,
            ..FakeDocument::default()
        };

        let controller = ThemeController::load(store.clone(), document.clone(), "theme");

        assert_eq!(controller.current(), Theme::Dark);
        assert_eq!(*document.applied.borrow(), vec![Theme::Dark]);
        assert_eq!(*document.icon.borrow(), "sun");
        assert_eq!(
            store.values.borrow().get("theme").map(String::as_str),
            Some("dark")
        );
    }

    #[test]
    fn test_toggle_flips_and_persists() {
        let store = MemoryStore::default();
        store
            .values
            .borrow_mut()
            .insert("theme".to_string(), "dark".to_string());
        let document = FakeDocument::default();

        let mut controller = ThemeController::load(store.clone(), document.clone(), "theme");
        assert_eq!(controller.toggle().unwrap(), Theme::Light);
        assert_eq!(*document.icon.borrow(), "moon");
        assert_eq!(
            store.values.borrow().get("theme").map(String::as_str),
            Some("light")
        );
    }

    #[test]
    fn test_broken_storage_still_applies_theme() {
        let store = MemoryStore {
            broken: true,
            ..MemoryStore::default()
        };
        let document = FakeDocument::default();

        let mut controller = ThemeController::load(store, document.clone(), "theme");
        assert_eq!(controller.current(), Theme::Light);

        assert!(controller.toggle().is_err());
        assert_eq!(controller.current(), Theme::Dark);
        assert_eq!(document.applied.borrow().last(), Some(&Theme::Dark));
    }

    #[test]
    fn test_select_rejects_unknown_theme() {
        let mut controller =
            ThemeController::load(MemoryStore::default(), FakeDocument::default(), "theme");
        assert_eq!(
            controller.select("neon"),
            Err(Error::UnknownTheme("neon".to_string()))
        );
        assert_eq!(controller.select("dark"), Ok(Theme::Dark));
    }
}
