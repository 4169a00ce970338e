//! Theme Preference: a persisted light/midnight switch.
//!
//! Independent of the catalog. Read once before the first render, written
//! back immediately on every change.

use crate::error::StoreError;
use crate::model::ParseEnumError;
use crate::store::PreferenceStore;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::{debug, warn};

/// Fixed key the theme is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Midnight,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Midnight => "midnight",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Midnight,
            Self::Midnight => Self::Light,
        }
    }

    /// Label of the toggle control, naming the theme it switches to.
    #[must_use]
    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Midnight Mode",
            Self::Midnight => "White Mode",
        }
    }

    /// Class applied to the page body; midnight is the unclassed default.
    #[must_use]
    pub const fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Light => Some("light-mode"),
            Self::Midnight => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "midnight" | "dark" => Ok(Self::Midnight),
            _ => Err(ParseEnumError {
                expected: "theme",
                got: s.to_string(),
            }),
        }
    }
}

/// The theme as loaded from a [`PreferenceStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemePreference {
    theme: Theme,
}

impl ThemePreference {
    /// Read the stored theme. Missing or unrecognised values yield the default.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself fails.
    pub fn load(store: &dyn PreferenceStore) -> Result<Self, StoreError> {
        let theme = match store.get(THEME_KEY)? {
            None => Theme::default(),
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|err| {
                warn!("ignoring stored theme preference: {err}");
                Theme::default()
            }),
        };
        debug!(%theme, "theme preference loaded");
        Ok(Self { theme })
    }

    #[must_use]
    pub const fn theme(self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the new value cannot be written; the in-memory
    /// theme is left unchanged in that case.
    pub fn toggle(&mut self, store: &mut dyn PreferenceStore) -> Result<Theme, StoreError> {
        self.set(store, self.theme.toggled())
    }

    /// Persist an explicit theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    pub fn set(
        &mut self,
        store: &mut dyn PreferenceStore,
        theme: Theme,
    ) -> Result<Theme, StoreError> {
        store.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        Ok(theme)
    }
}
