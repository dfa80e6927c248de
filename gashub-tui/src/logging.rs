//! File logging for the terminal UI.
//!
//! The terminal belongs to ratatui, so log lines go to a daily rolling file.
//! `RUST_LOG` wins over the configured level.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use gashub_core::config::LoggingConfig;

pub const LOG_FILE_PREFIX: &str = "gashub-tui.log";

/// Filter from `RUST_LOG`, falling back to `level`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Configured directory, else `<data dir>/gashub/logs`.
pub fn log_dir(config: &LoggingConfig) -> PathBuf {
    config.dir.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gashub")
            .join("logs")
    })
}

/// Install the global subscriber. Keep the guard alive until exit so
/// buffered lines get flushed.
pub fn init(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    let dir = log_dir(config);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.level))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    tracing::info!(dir = %dir.display(), "logging initialised");
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_dir_wins() {
        let config = LoggingConfig {
            level: "debug".into(),
            dir: Some(PathBuf::from("/var/log/gashub")),
        };
        assert_eq!(log_dir(&config), PathBuf::from("/var/log/gashub"));
    }

    #[test]
    fn default_dir_is_app_scoped() {
        assert!(log_dir(&LoggingConfig::default()).ends_with("gashub/logs"));
    }
}
