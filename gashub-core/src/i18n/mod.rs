//! Translation dictionaries and dotted-path lookup.
//!
//! Dictionaries are nested JSON objects, one per language. Lookups walk the
//! dotted key (`market.table.headers.vwap`), substitute `{param}` placeholders
//! and return `None` on a miss so callers can supply their own fallback text.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

const EMBEDDED_BG: &str = include_str!("../../i18n/bg.json");
const EMBEDDED_EN: &str = include_str!("../../i18n/en.json");

/// Interface language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Bg,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Bg, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Language::Bg => "bg",
            Language::En => "en",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "bg" => Some(Language::Bg),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Thousands separator used when grouping volumes.
    pub fn group_separator(self) -> char {
        match self {
            Language::Bg => ' ',
            Language::En => ',',
        }
    }

    pub fn toggle(self) -> Language {
        match self {
            Language::Bg => Language::En,
            Language::En => Language::Bg,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code().to_uppercase())
    }
}

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("failed to read translations {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse translations {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Per-language translation dictionaries.
#[derive(Debug, Clone)]
pub struct Translations {
    dictionaries: HashMap<Language, Value>,
}

impl Default for Translations {
    fn default() -> Self {
        Self::embedded()
    }
}

impl Translations {
    /// Dictionaries compiled into the binary.
    pub fn embedded() -> Self {
        let mut dictionaries = HashMap::new();
        dictionaries.insert(
            Language::Bg,
            serde_json::from_str(EMBEDDED_BG).unwrap_or_default(),
        );
        dictionaries.insert(
            Language::En,
            serde_json::from_str(EMBEDDED_EN).unwrap_or_default(),
        );
        Self { dictionaries }
    }

    pub fn from_values(dictionaries: HashMap<Language, Value>) -> Self {
        Self { dictionaries }
    }

    /// Read `bg.json` and `en.json` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, I18nError> {
        let mut dictionaries = HashMap::new();
        for lang in Language::ALL {
            let path = dir.join(format!("{}.json", lang.code()));
            let content = std::fs::read_to_string(&path).map_err(|source| I18nError::Io {
                path: path.clone(),
                source,
            })?;
            let value: Value = serde_json::from_str(&content)
                .map_err(|source| I18nError::Parse { path, source })?;
            dictionaries.insert(lang, value);
        }
        Ok(Self { dictionaries })
    }

    /// Load from `dir` when given; any failure falls back to the embedded
    /// dictionaries for every language.
    pub fn load(dir: Option<&Path>) -> Self {
        let Some(dir) = dir else {
            return Self::embedded();
        };
        match Self::from_dir(dir) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("could not load translations, using fallback: {e}");
                Self::embedded()
            }
        }
    }

    /// Dotted-path lookup with `{name}` placeholder substitution.
    ///
    /// Returns `None` when any path segment is missing or the leaf is not a
    /// string.
    pub fn get(&self, key: &str, lang: Language, params: &[(&str, &str)]) -> Option<String> {
        let mut node = self.dictionaries.get(&lang)?;
        for segment in key.split('.') {
            node = node.as_object()?.get(segment)?;
        }
        let mut text = node.as_str()?.to_string();
        for (name, value) in params {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        Some(text)
    }

    /// Lookup with a caller-supplied fallback for misses.
    pub fn get_or(
        &self,
        key: &str,
        lang: Language,
        params: &[(&str, &str)],
        fallback: impl FnOnce() -> String,
    ) -> String {
        get_translation(self, key, lang, params).unwrap_or_else(fallback)
    }
}

/// Free-function form of [`Translations::get`].
pub fn get_translation(
    translations: &Translations,
    key: &str,
    lang: Language,
    params: &[(&str, &str)],
) -> Option<String> {
    translations.get(key, lang, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dictionaries_parse() {
        let t = Translations::embedded();
        for lang in Language::ALL {
            assert!(t.get("market.title", lang, &[]).is_some(), "{lang} missing title");
        }
    }

    #[test]
    fn dotted_lookup() {
        let t = Translations::embedded();
        assert_eq!(t.get("cookie.accept", Language::En, &[]).as_deref(), Some("Accept"));
        assert_eq!(t.get("cookie.accept", Language::Bg, &[]).as_deref(), Some("Приемам"));
    }

    #[test]
    fn placeholder_substitution_replaces_every_occurrence() {
        let t = Translations::embedded();
        let text = t
            .get("market.table.headers.vwap", Language::En, &[("currency", "EUR")])
            .unwrap();
        assert_eq!(text, "VWAP (EUR/MWh)");
    }

    #[test]
    fn misses_return_none() {
        let t = Translations::embedded();
        assert!(t.get("market.nope", Language::En, &[]).is_none());
        assert!(t.get("", Language::En, &[]).is_none());
        // Non-leaf node is not a string.
        assert!(t.get("market.table", Language::En, &[]).is_none());
        // Path through a string leaf.
        assert!(t.get("cookie.accept.deeper", Language::En, &[]).is_none());
    }

    #[test]
    fn free_function_lookup() {
        let t = Translations::embedded();
        assert_eq!(
            get_translation(&t, "market.settlement.headers.price", Language::En, &[("currency", "USD")])
                .as_deref(),
            Some("Settlement price (USD/MWh)")
        );
        assert!(get_translation(&t, "nav.missing", Language::Bg, &[]).is_none());
    }

    #[test]
    fn get_or_uses_fallback_on_miss() {
        let t = Translations::embedded();
        let text = t.get_or("missing.key", Language::Bg, &[], || "fallback".into());
        assert_eq!(text, "fallback");
    }

    #[test]
    fn missing_dir_falls_back_to_embedded() {
        let t = Translations::load(Some(Path::new("/nonexistent/i18n")));
        assert_eq!(t.get("theme.dark", Language::En, &[]).as_deref(), Some("Dark theme"));
    }

    #[test]
    fn from_dir_reads_both_languages() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bg.json"), r#"{"a":{"b":"бг"}}"#).unwrap();
        std::fs::write(dir.path().join("en.json"), r#"{"a":{"b":"en {x}"}}"#).unwrap();

        let t = Translations::from_dir(dir.path()).unwrap();
        assert_eq!(t.get("a.b", Language::Bg, &[]).as_deref(), Some("бг"));
        assert_eq!(t.get("a.b", Language::En, &[("x", "1")]).as_deref(), Some("en 1"));
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bg.json"), "{{{").unwrap();
        std::fs::write(dir.path().join("en.json"), "{}").unwrap();
        assert!(matches!(
            Translations::from_dir(dir.path()),
            Err(I18nError::Parse { .. })
        ));
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::parse("en"), Some(Language::En));
        assert_eq!(Language::parse("de"), None);
        assert_eq!(Language::Bg.to_string(), "BG");
        assert_eq!(Language::Bg.toggle(), Language::En);
    }
}
