//! Theme preference values and their pure resolution rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToolshelfError;

/// The user's stored choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ThemePreference {
    /// Recognized tokens, in menu order.
    pub const ALL: [ThemePreference; 3] = [Self::Light, Self::Dark, Self::Auto];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }

    /// Resolve to a concrete theme. `Auto` follows the system and falls back
    /// to light when the system reports nothing.
    pub fn resolve(&self, system_dark: Option<bool>) -> ResolvedTheme {
        match self {
            Self::Light => ResolvedTheme::Light,
            Self::Dark => ResolvedTheme::Dark,
            Self::Auto if system_dark == Some(true) => ResolvedTheme::Dark,
            Self::Auto => ResolvedTheme::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = ToolshelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" => Ok(Self::Auto),
            other => Err(ToolshelfError::InvalidTheme(other.to_string())),
        }
    }
}

/// Theme actually shown on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ResolvedTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current theme state. Transitions are pure: they take a state and return
/// the next one, leaving storage and the document to the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub preference: ThemePreference,
}

impl ThemeState {
    /// State from a persisted value. Missing or unrecognized values start
    /// in `auto`.
    pub fn from_stored(stored: Option<&str>) -> Self {
        let preference = stored.and_then(|s| s.parse().ok()).unwrap_or_default();
        Self { preference }
    }

    /// Transition on a theme-option activation.
    pub fn select(self, token: &str) -> Result<Self, ToolshelfError> {
        let preference = token.trim().parse::<ThemePreference>()?;
        Ok(Self { preference })
    }

    pub fn resolve(&self, system_dark: Option<bool>) -> ResolvedTheme {
        self.preference.resolve(system_dark)
    }
}
