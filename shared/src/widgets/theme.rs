use std::fmt;

use log::debug;

use crate::storage::{KeyValueStorage, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything but `"dark"` reads as light.
    pub fn parse(value: &str) -> Self {
        if value == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon of the toggle button: offers the other theme.
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted light/dark choice.
#[derive(Debug, Clone)]
pub struct ThemePreference<K> {
    storage: K,
    theme: Theme,
}

impl<K: KeyValueStorage> ThemePreference<K> {
    pub fn restore(storage: K) -> Self {
        let theme = storage
            .get(THEME_KEY)
            .map(|raw| Theme::parse(&raw))
            .unwrap_or_default();
        Self { storage, theme }
    }

    pub fn current(&self) -> Theme {
        self.theme
    }

    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.storage.set(THEME_KEY, self.theme.as_str());
        debug!("event=theme_toggle module=widgets theme={}", self.theme);
        self.theme
    }
}
