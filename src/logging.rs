//! Logging setup
//!
//! The terminal UI owns stdout, so log records are written to a file
//! (by default `~/.bankhub/bankhub.log`). The filter comes from `RUST_LOG`
//! when set, otherwise from the configured level.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;
use crate::error::Error;

/// Build the filter used by [`init_logging`]
pub fn build_filter(level: &str) -> Result<EnvFilter, Error> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| Error::Config(format!("Invalid log level '{}': {}", level, e))),
    }
}

/// Install the global tracing subscriber writing to the configured log file.
///
/// Returns the path of the log file.
pub fn init_logging(config: &AppConfig) -> Result<PathBuf, Error> {
    let path = config.log_file_path();
    let file = open_log_file(&path)?;
    let filter = build_filter(&config.log_level)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!(log_file = %path.display(), "logging initialized");
    Ok(path)
}

fn open_log_file(path: &Path) -> Result<fs::File, Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_directives() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("bankhub=debug,reqwest=warn").is_ok());
    }

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("bankhub.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
