//! # Theme Controller
//!
//! Light/dark switching with a persisted preference.
//!
//! The document root carries a marker class while the light theme is
//! active. Dark is the default and is represented by the marker's absence,
//! so a page that never ran this code is already "dark".
//!
//! Storage is best effort. A store that cannot be read or written leaves
//! the page working in memory for the rest of the session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::config::ThemeConfig;
use crate::error::{FolioError, FolioResult};
use crate::surface::{ElementId, Surface};

/// The visual mode of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemePreference {
    /// Light mode (marker present).
    Light,
    /// Dark mode (marker absent).
    #[default]
    Dark,
}

impl ThemePreference {
    /// Returns the other mode.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Returns the persisted string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = FolioError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(FolioError::UnknownTheme(other.to_owned())),
        }
    }
}

/// Key-value persistence for the theme choice.
pub trait PreferenceStore {
    /// Reads the value stored under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Storage`] if the store cannot be read.
    fn get(&self, key: &str) -> FolioResult<Option<String>>;

    /// Writes `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Storage`] if the store cannot be written.
    fn set(&self, key: &str, value: &str) -> FolioResult<()>;
}

/// Session-only store. Also the fallback when the browser store is unusable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> FolioResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> FolioResult<()> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Applies, restores and toggles the page theme.
pub struct ThemeController {
    root: ElementId,
    toggle: Option<ElementId>,
    config: ThemeConfig,
}

impl ThemeController {
    /// Creates a controller for the given root element.
    ///
    /// `toggle` is the button whose `aria-pressed` mirrors light mode.
    #[must_use]
    pub fn new(root: ElementId, toggle: Option<ElementId>, config: ThemeConfig) -> Self {
        Self { root, toggle, config }
    }

    /// Returns the mode the page currently shows, read from the marker.
    #[must_use]
    pub fn current(&self, surface: &dyn Surface) -> ThemePreference {
        if surface.has_class(self.root, &self.config.light_class) {
            ThemePreference::Light
        } else {
            ThemePreference::Dark
        }
    }

    /// Sets or clears the marker for `theme`.
    pub fn apply(&self, surface: &dyn Surface, theme: ThemePreference) {
        let light = theme == ThemePreference::Light;
        surface.set_class(self.root, &self.config.light_class, light);
        if let Some(toggle) = self.toggle {
            surface.set_attribute(toggle, "aria-pressed", if light { "true" } else { "false" });
        }
    }

    /// Restores the persisted preference, if any.
    ///
    /// Returns the restored mode. With nothing usable persisted the page is
    /// left untouched and `None` is returned.
    pub fn init(&self, surface: &dyn Surface, store: &dyn PreferenceStore) -> Option<ThemePreference> {
        let stored = match store.get(&self.config.storage_key) {
            Ok(stored) => stored?,
            Err(err) => {
                tracing::warn!("theme preference unreadable, using default: {err}");
                return None;
            }
        };

        match stored.parse::<ThemePreference>() {
            Ok(theme) => {
                self.apply(surface, theme);
                tracing::debug!("restored theme {theme}");
                Some(theme)
            }
            Err(err) => {
                tracing::debug!("ignoring persisted theme: {err}");
                None
            }
        }
    }

    /// Switches to the opposite of the current mode and persists it.
    pub fn toggle(&self, surface: &dyn Surface, store: &dyn PreferenceStore) -> ThemePreference {
        let next = self.current(surface).opposite();
        self.apply(surface, next);

        if let Err(err) = store.set(&self.config.storage_key, next.as_str()) {
            tracing::warn!("theme preference not persisted: {err}");
        }
        tracing::debug!("theme toggled to {next}");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for theme in [ThemePreference::Light, ThemePreference::Dark] {
            assert_eq!(theme.as_str().parse::<ThemePreference>().unwrap(), theme);
        }
        assert_eq!(
            "Light".parse::<ThemePreference>(),
            Err(FolioError::UnknownTheme("Light".into()))
        );
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(ThemePreference::default(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.opposite(), ThemePreference::Light);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "light").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("light"));
    }
}
