//! Persisted user preferences
//!
//! Just the theme for now. Read once at startup, written on every toggle;
//! an unset or unrecognized stored value falls back to light.

use crate::error::Result;
use crate::store::KeyValueStore;

/// Store key holding the theme preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Lenient parse; anything that is not exactly `dark` reads as light.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

pub fn load_theme(store: &dyn KeyValueStore) -> ThemeMode {
    store
        .get(THEME_KEY)
        .map(|raw| ThemeMode::parse(&raw))
        .unwrap_or_default()
}

/// # Errors
///
/// Propagates the store's write failure; the caller keeps the in-memory
/// mode either way.
pub fn save_theme(store: &mut dyn KeyValueStore, mode: ThemeMode) -> Result<()> {
    store.set(THEME_KEY, mode.as_str())
}
