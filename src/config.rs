//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// REST API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the API prefix, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Query cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds after which a cached list is refetched on next access.
    pub stale_after_secs: u64,
}

/// UI preferences and printed-document defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub page_size: usize,
    /// Printed in document headers.
    pub organization_name: String,
    /// Printed on the "done at" line of documents.
    pub city: String,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Validation("API URL cannot be empty".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "API URL must start with http:// or https://".to_string(),
            ));
        }
        if self.api.timeout_secs < 5 {
            return Err(ConfigError::Validation(
                "Request timeout must be at least 5 seconds".to_string(),
            ));
        }
        if self.api.timeout_secs > 300 {
            return Err(ConfigError::Validation(
                "Request timeout cannot exceed 300 seconds".to_string(),
            ));
        }
        if self.cache.stale_after_secs < 5 || self.cache.stale_after_secs > 3600 {
            return Err(ConfigError::Validation(
                "Cache staleness must be between 5 and 3600 seconds".to_string(),
            ));
        }
        if self.ui.page_size < 5 || self.ui.page_size > 200 {
            return Err(ConfigError::Validation(
                "Page size must be between 5 and 200".to_string(),
            ));
        }
        if self.ui.organization_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Organization name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl ApiConfig {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CacheConfig {
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { stale_after_secs: 60 }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            organization_name: "Direction des Ressources Humaines".to_string(),
            city: "Alger".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_url_scheme() {
        let mut config = AppConfig::default();
        config.api.base_url = "ftp://invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let mut config = AppConfig::default();

        config.api.timeout_secs = 4;
        assert!(config.validate().is_err());

        config.api.timeout_secs = 301;
        assert!(config.validate().is_err());

        config.api.timeout_secs = 30;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_page_size_bounds() {
        let mut config = AppConfig::default();

        config.ui.page_size = 4;
        assert!(config.validate().is_err());

        config.ui.page_size = 201;
        assert!(config.validate().is_err());

        config.ui.page_size = 50;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.api.base_url = "https://hr.example.dz/api".to_string();
        config.ui.city = "Oran".to_string();
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => {
                assert_eq!(loaded.api.base_url, "https://hr.example.dz/api");
                assert_eq!(loaded.ui.city, "Oran");
                assert_eq!(loaded.cache.stale_after_secs, 60);
            }
            other => panic!("unexpected load result: {other:?}"),
        }
    }

    #[test]
    fn test_optional_sections_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://10.0.0.5/api\"\n").unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => {
                assert_eq!(loaded.api.timeout_secs, 30);
                assert_eq!(loaded.ui.page_size, 20);
            }
            other => panic!("unexpected load result: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Invalid(_)));
    }
}
