//! Application configuration loaded from TOML.
//!
//! Every section and field is optional; a missing file yields the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::currency::DEFAULT_ENDPOINT;
use crate::market::TabId;
use crate::preferences::ThemeMode;
use crate::table::ENTRIES_PER_PAGE_OPTIONS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rates: RatesConfig,
    pub display: DisplayConfig,
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    /// Service root; rates are read from `{endpoint}/latest/BGN`.
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub default_tab: String,
    pub entries_per_page: usize,
    /// Used until the user picks a theme.
    pub default_theme: ThemeMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_tab: TabId::DayAhead.as_str().to_string(),
            entries_per_page: ENTRIES_PER_PAGE_OPTIONS[0],
            default_theme: ThemeMode::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Directory holding `bg.json` and `en.json`. Embedded dictionaries are
    /// used when unset.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Log file directory for the terminal UI.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

impl AppConfig {
    /// Read and validate `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rates.endpoint.starts_with("http://")
            || self.rates.endpoint.starts_with("https://"))
        {
            return Err(ConfigError::Invalid(format!(
                "rates.endpoint must be an http(s) URL, got '{}'",
                self.rates.endpoint
            )));
        }
        if self.rates.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "rates.timeout_secs must be positive".into(),
            ));
        }
        if TabId::parse(&self.display.default_tab).is_none() {
            return Err(ConfigError::Invalid(format!(
                "display.default_tab '{}' is not one of intraday, day-ahead, weeks, months",
                self.display.default_tab
            )));
        }
        if !ENTRIES_PER_PAGE_OPTIONS.contains(&self.display.entries_per_page) {
            return Err(ConfigError::Invalid(format!(
                "display.entries_per_page must be one of {ENTRIES_PER_PAGE_OPTIONS:?}"
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level is empty".into()));
        }
        Ok(())
    }

    pub fn default_tab(&self) -> TabId {
        TabId::parse_or_default(&self.display.default_tab)
    }

    pub fn rate_timeout(&self) -> Duration {
        Duration::from_secs(self.rates.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let c = AppConfig::from_toml("").unwrap();
        assert_eq!(c, AppConfig::default());
        assert_eq!(c.default_tab(), TabId::DayAhead);
        assert_eq!(c.rate_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn partial_sections() {
        let c = AppConfig::from_toml(
            r#"
            [display]
            default_tab = "weeks"
            default_theme = "light"

            [i18n]
            dir = "/srv/gashub/i18n"
            "#,
        )
        .unwrap();
        assert_eq!(c.default_tab(), TabId::Weeks);
        assert_eq!(c.display.default_theme, ThemeMode::Light);
        assert_eq!(c.display.entries_per_page, 10);
        assert_eq!(c.i18n.dir, Some(PathBuf::from("/srv/gashub/i18n")));
        assert_eq!(c.rates.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for doc in [
            "[rates]\ntimeout_secs = 0",
            "[rates]\nendpoint = \"ftp://rates\"",
            "[display]\ndefault_tab = \"daily\"",
            "[display]\nentries_per_page = 7",
            "[logging]\nlevel = \" \"",
        ] {
            assert!(
                matches!(AppConfig::from_toml(doc), Err(ConfigError::Invalid(_))),
                "{doc}"
            );
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("[rates"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("[display]\ndefault_theme = \"sepia\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let c = AppConfig::load(&dir.path().join("gashub.toml")).unwrap();
        assert_eq!(c, AppConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gashub.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(AppConfig::load(&path).unwrap().logging.level, "debug");
    }
}
