//! Preference persistence: JSON save/load across restarts.

use std::path::{Path, PathBuf};

use gashub_core::preferences::Preferences;

use crate::app::AppContext;

/// `<config dir>/gashub/preferences.json`, or the working directory when the
/// platform has no config dir.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gashub")
        .join("preferences.json")
}

/// Load preferences from disk. Returns defaults if the file is missing or
/// corrupt.
pub fn load(path: &Path) -> Preferences {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "ignoring corrupt preferences: {e}");
            Preferences::default()
        }),
        Err(_) => Preferences::default(),
    }
}

/// Save preferences to disk. Creates parent directories if needed.
pub fn save(path: &Path, prefs: &Preferences) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(prefs)?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "preferences saved");
    Ok(())
}

/// Current preference flags of the running app.
pub fn extract(app: &AppContext) -> Preferences {
    Preferences {
        language: app.language(),
        theme: app.preferences.theme,
        cookie_choice: app.preferences.cookie_choice,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gashub_core::preferences::{CookieChoice, ThemeMode};
    use gashub_core::Language;

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(&dir.path().join("none.json")), Preferences::default());
    }

    #[test]
    fn corrupt_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load(&path), Preferences::default());
    }

    #[test]
    fn unreadable_theme_keeps_cookie_choice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(
            &path,
            r#"{"language":"en","theme":"sepia","cookie_choice":"accepted"}"#,
        )
        .unwrap();
        let prefs = load(&path);
        assert_eq!(prefs.theme, None);
        assert_eq!(prefs.language, Language::En);
        assert!(!prefs.needs_cookie_banner());
    }

    #[test]
    fn save_creates_parents_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("gashub").join("preferences.json");
        let prefs = Preferences {
            language: Language::En,
            theme: Some(ThemeMode::Light),
            cookie_choice: Some(CookieChoice::Accepted),
        };
        save(&path, &prefs).unwrap();
        assert_eq!(load(&path), prefs);
    }

    #[test]
    fn default_path_ends_in_app_dir() {
        let p = default_path();
        assert!(p.ends_with("gashub/preferences.json"));
    }
}
