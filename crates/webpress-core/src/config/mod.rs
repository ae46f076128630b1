//! Configuration management for webpress.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Command-line flags are applied on top by the binary.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for webpress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Processing settings
    pub processing: ProcessingConfig,

    /// Pipeline settings
    pub pipeline: PipelineConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Ledger settings
    pub ledger: LedgerConfig,

    /// Filesystem watch settings
    pub watch: WatchConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.webpress.webpress/config.toml
    /// - Linux: ~/.config/webpress/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\webpress\config\config.toml
    ///
    /// Falls back to ~/.webpress/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "webpress", "webpress")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".webpress").join("config.toml")
            })
    }

    /// Get the resolved ledger path (with ~ expansion).
    pub fn ledger_path(&self) -> PathBuf {
        let path_str = self.ledger.path.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.processing.workers, 4);
        assert_eq!(config.processing.quality, 90);
        assert_eq!(config.pipeline.buffer_size, 100);
        assert!(config.watch.enabled);
        assert!(!config.watch.recursive);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[processing]"));
        assert!(toml.contains("[ledger]"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[processing]\nquality = 75\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.processing.quality, 75);
        assert_eq!(config.processing.workers, 4);
        assert_eq!(config.ledger.path, PathBuf::from("processed_files.txt"));
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[processing]\nquality = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("quality"));
    }

    #[test]
    fn test_ledger_path_expands_tilde() {
        let mut config = Config::default();
        config.ledger.path = PathBuf::from("~/ledger.txt");
        let resolved = config.ledger_path();
        let expected = shellexpand::tilde("~/ledger.txt").into_owned();
        assert_eq!(resolved, PathBuf::from(expected));
        assert!(resolved.ends_with("ledger.txt"));
    }
}
