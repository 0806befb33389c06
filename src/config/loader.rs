use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/itemkeeper/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("itemkeeper").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise behaves like [`Config::load_from`].
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::parse()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from an explicit file, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::parse_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], without validation.
    pub(crate) fn parse() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::parse_from(&path)
    }

    /// Like [`Config::load_from`], without validation.
    pub(crate) fn parse_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - A configured database path is not empty
    /// - A configured database path is not an existing directory
    ///
    /// The database path is ignored when `in_memory` is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.in_memory {
            return Ok(());
        }
        let Some(path) = &self.storage.database_path else {
            return Ok(());
        };

        if path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "storage.database_path must not be empty".to_string(),
            });
        }

        if path.is_dir() {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "storage.database_path '{}' is a directory",
                    path.display()
                ),
            });
        }

        Ok(())
    }
}
