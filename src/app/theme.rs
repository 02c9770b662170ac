//! Theme preference, persisted across sessions.
//!
//! The single piece of locally persisted state: a light/dark preference,
//! initialized from the system preference when nothing is stored. The host
//! supplies the actual storage behind [`PreferenceStore`].

use parking_lot::Mutex;

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// The persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a persisted value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Resolves the initial theme: the stored preference wins, otherwise
    /// the system preference.
    ///
    /// # Examples
    ///
    /// ```
    /// use flowmastery::app::theme::Theme;
    ///
    /// assert_eq!(Theme::resolve(Some(Theme::Light), true), Theme::Light);
    /// assert_eq!(Theme::resolve(None, true), Theme::Dark);
    /// assert_eq!(Theme::resolve(None, false), Theme::Light);
    /// ```
    pub fn resolve(stored: Option<Theme>, system_prefers_dark: bool) -> Self {
        stored.unwrap_or(if system_prefers_dark {
            Self::Dark
        } else {
            Self::Light
        })
    }
}

/// Host-supplied persistence for the theme preference.
pub trait PreferenceStore: Send + Sync {
    /// The stored theme, if any.
    fn load_theme(&self) -> Option<Theme>;

    /// Persists the theme.
    fn save_theme(&self, theme: Theme);
}

/// In-memory [`PreferenceStore`] for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    theme: Mutex<Option<Theme>>,
}

impl MemoryPreferences {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load_theme(&self) -> Option<Theme> {
        *self.theme.lock()
    }

    fn save_theme(&self, theme: Theme) {
        *self.theme.lock() = Some(theme);
    }
}

/// Owns the current theme and writes every change through to the store.
pub struct ThemeManager<S: PreferenceStore> {
    store: S,
    current: Theme,
}

impl<S: PreferenceStore> ThemeManager<S> {
    /// Resolves the initial theme from the store and the system preference.
    pub fn new(store: S, system_prefers_dark: bool) -> Self {
        let current = Theme::resolve(store.load_theme(), system_prefers_dark);
        Self { store, current }
    }

    /// The active theme.
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flips the theme and persists the choice.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.store.save_theme(self.current);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_preference_beats_system() {
        let store = MemoryPreferences::new();
        store.save_theme(Theme::Light);
        let manager = ThemeManager::new(store, true);
        assert_eq!(manager.current(), Theme::Light);
    }

    #[test]
    fn system_preference_used_when_nothing_stored() {
        let manager = ThemeManager::new(MemoryPreferences::new(), true);
        assert_eq!(manager.current(), Theme::Dark);
    }

    #[test]
    fn toggle_persists() {
        let mut manager = ThemeManager::new(MemoryPreferences::new(), false);
        assert_eq!(manager.toggle(), Theme::Dark);
        assert_eq!(manager.store.load_theme(), Some(Theme::Dark));
        assert_eq!(manager.toggle(), Theme::Light);
        assert_eq!(manager.store.load_theme(), Some(Theme::Light));
    }

    #[test]
    fn parse_round_trip() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse(Theme::Light.as_str()), Some(Theme::Light));
        assert_eq!(Theme::parse("solarized"), None);
    }
}
