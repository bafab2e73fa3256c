use config::{Config as ConfigLoader, Environment, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Error;

/// Default API endpoint of the accounts service
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8082";
/// Default lifetime of a toast notification, in milliseconds
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3500;
/// Default HTTP request timeout, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Prefix of the environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "BANKHUB";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the accounts REST API (without the `/comptes` suffix)
    pub api_base_url: String,
    /// Timeout applied to every API request
    pub request_timeout_secs: u64,
    /// How long a toast stays visible before it is dismissed automatically
    pub toast_duration_ms: u64,
    /// Log filter directive (e.g. `info`, `bankhub=debug`)
    pub log_level: String,
    /// Log file location; defaults to `~/.bankhub/bankhub.log`
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Load the layered configuration: defaults, then the TOML file at `path`
    /// (or [`AppConfig::default_path`]) if it exists, then `BANKHUB_*`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);
        let defaults = Self::default();

        let settings = ConfigLoader::builder()
            .set_default("api_base_url", defaults.api_base_url)
            .and_then(|b| b.set_default("request_timeout_secs", defaults.request_timeout_secs))
            .and_then(|b| b.set_default("toast_duration_ms", defaults.toast_duration_ms))
            .and_then(|b| b.set_default("log_level", defaults.log_level))
            .map_err(|e| Error::Config(format!("Invalid default: {}", e)))?
            .add_source(File::from(path.as_path()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| Error::Config(format!("Failed to load config: {}", e)))?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file only
    pub fn load_file(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("bankhub");
        path.push("config.toml");
        path
    }

    /// Override the API base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Override the log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Toast lifetime as a [`Duration`]
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// Resolved log file location
    pub fn log_file_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push(".bankhub");
            path.push("bankhub.log");
            path
        })
    }

    /// Check the values a loaded or overridden config must satisfy
    pub fn validate(&self) -> Result<(), Error> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(Error::Config("api_base_url must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "api_base_url must start with http:// or https:// (got '{}')",
                url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.toast_duration(), Duration::from_millis(3500));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.log_file_path().ends_with("bankhub.log"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = AppConfig::default().with_api_base_url("localhost:8082");
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = AppConfig::default().with_api_base_url("   ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = AppConfig::default()
            .with_api_base_url("https://bank.example.com/api")
            .with_log_level("debug");
        config.save(&path).unwrap();

        let loaded = AppConfig::load_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
