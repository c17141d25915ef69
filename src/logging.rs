//! Logging setup
//!
//! The TUI owns the terminal, so everything goes to a daily-rolling file
//! under `~/.crabtrader/logs/`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::crabtrader_home;

const LOG_FILE_PREFIX: &str = "crabtrader.log";

/// Logging options resolved from CLI flags and config
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub debug_mode: bool,
    pub level: String,
    pub log_dir: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self {
            debug_mode: false,
            level: "info".to_string(),
            log_dir: default_log_dir(),
        }
    }

    pub fn with_debug_mode(mut self, debug: bool) -> Self {
        self.debug_mode = debug;
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_log_dir(mut self, dir: PathBuf) -> Self {
        self.log_dir = dir;
        self
    }

    /// `RUST_LOG` wins; otherwise `--debug` or the configured level
    fn filter(&self) -> EnvFilter {
        let fallback = if self.debug_mode {
            "debug"
        } else {
            self.level.as_str()
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    }
}

pub fn default_log_dir() -> PathBuf {
    crabtrader_home().join("logs")
}

/// Install the global subscriber. Keep the guard alive until exit or
/// buffered lines are lost.
pub fn init_logging(config: LogConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", config.log_dir))?;

    let appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!("Logging to {:?}", config.log_dir);
    Ok(guard)
}

/// Remove `crabtrader.log*` files older than `max_age_days` from `dir`.
pub fn cleanup_old_logs(dir: &Path, max_age_days: u64) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }
    let max_age = Duration::from_secs(max_age_days * 24 * 60 * 60);
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to read {:?}", dir))? {
        let entry = entry?;
        let path = entry.path();
        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX));
        if !is_log || !path.is_file() {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        let age = now.duration_since(modified).unwrap_or_default();
        if age > max_age {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {:?}", path))?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::new()
            .with_debug_mode(true)
            .with_level("warn")
            .with_log_dir(PathBuf::from("/tmp/crabtrader-logs"));
        assert!(config.debug_mode);
        assert_eq!(config.level, "warn");
        assert_eq!(config.log_dir, PathBuf::from("/tmp/crabtrader-logs"));
    }

    #[test]
    fn test_cleanup_only_touches_stale_log_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = dir.path().join("crabtrader.log.2026-01-01");
        let other = dir.path().join("notes.txt");
        std::fs::write(&log, "old").expect("write");
        std::fs::write(&other, "keep").expect("write");

        assert_eq!(cleanup_old_logs(dir.path(), 7).expect("cleanup"), 0);
        assert!(log.exists());

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cleanup_old_logs(dir.path(), 0).expect("cleanup"), 1);
        assert!(!log.exists());
        assert!(other.exists());
    }

    #[test]
    fn test_cleanup_missing_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope");
        assert_eq!(cleanup_old_logs(&missing, 7).expect("cleanup"), 0);
    }
}
