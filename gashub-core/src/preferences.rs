//! User preference flags: language, color theme and cookie consent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::i18n::Language;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            ThemeMode::Light => "theme.light",
            ThemeMode::Dark => "theme.dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookieChoice {
    Accepted,
    Rejected,
}

/// Flags remembered between sessions. Each field is read on its own: one
/// that is missing or unreadable takes its default and leaves the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(deserialize_with = "or_default")]
    pub language: Language,
    /// `None` until the user toggles the theme once.
    #[serde(deserialize_with = "or_default")]
    pub theme: Option<ThemeMode>,
    #[serde(deserialize_with = "or_default")]
    pub cookie_choice: Option<CookieChoice>,
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

impl Preferences {
    /// Saved theme, or `fallback` when none was saved.
    pub fn theme_or(&self, fallback: ThemeMode) -> ThemeMode {
        self.theme.unwrap_or(fallback)
    }

    /// The consent banner is offered until a choice is stored.
    pub fn needs_cookie_banner(&self) -> bool {
        self.cookie_choice.is_none()
    }
}
