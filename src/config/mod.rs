//! Dashboard configuration.
//!
//! Stored as JSON at `~/.bittensor/dashboard.json` (override with
//! `BTDASH_CONFIG`). A missing file means defaults; every field is optional.

use crate::logging::LoggingConfig;
use crate::wallet::expand_home;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file location under home
const CONFIG_FILE_NAME: &str = ".bittensor/dashboard.json";

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "BTDASH_CONFIG";

/// Environment variable overriding `wallet_path`
pub const WALLET_PATH_ENV: &str = "BITTENSOR_WALLET_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Dashboard configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Root directory holding one sub-directory per wallet. Unset means the
    /// hotkey selector has nothing to show.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_path: Option<String>,
    /// Hotkey addresses the dashboard tracks
    pub selected_hotkeys: Vec<String>,
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wallet_path(mut self, path: impl Into<String>) -> Self {
        self.wallet_path = Some(path.into());
        self
    }

    pub fn with_selected_hotkeys(mut self, hotkeys: Vec<String>) -> Self {
        self.selected_hotkeys = hotkeys;
        self
    }

    /// The wallet root with `~` expanded, if configured.
    pub fn wallet_root(&self) -> Option<PathBuf> {
        self.wallet_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(expand_home)
    }

    /// Resolve the config file location: `BTDASH_CONFIG` or `~/.bittensor/dashboard.json`.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return expand_home(&path);
        }
        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Load from the default location and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path())
    }

    /// Load from `path` (defaults if it does not exist) and apply environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::read_file(path.as_ref())?.apply_env())
    }

    /// Read `path` without environment overrides.
    pub fn read_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `BITTENSOR_WALLET_PATH` and the logging environment variables.
    pub fn apply_env(mut self) -> Self {
        if let Ok(path) = std::env::var(WALLET_PATH_ENV) {
            self.wallet_path = Some(path);
        }
        self.logging = self.logging.apply_env();
        self
    }

    /// Write the configuration as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, contents).map_err(io_err)?;

        tracing::debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    /// Replace `selected_hotkeys` in the file at `path`, leaving every other
    /// field as stored. Environment and command-line overrides of the running
    /// session are not written back.
    pub fn save_selected_hotkeys(path: &Path, hotkeys: Vec<String>) -> Result<(), ConfigError> {
        Self::read_file(path)?
            .with_selected_hotkeys(hotkeys)
            .save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::new();
        assert!(config.wallet_path.is_none());
        assert!(config.wallet_root().is_none());
        assert!(config.selected_hotkeys.is_empty());
    }

    #[test]
    fn test_builder_pattern() {
        let config = DashboardConfig::new()
            .with_wallet_path("/tmp/wallets")
            .with_selected_hotkeys(vec!["5Abc".to_string()]);

        assert_eq!(config.wallet_root(), Some(PathBuf::from("/tmp/wallets")));
        assert_eq!(config.selected_hotkeys, vec!["5Abc"]);
    }

    #[test]
    fn test_blank_wallet_path_is_unset() {
        let config = DashboardConfig::new().with_wallet_path("  ");
        assert!(config.wallet_root().is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = DashboardConfig::read_file(&dir.path().join("none.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_save_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dashboard.json");

        let config = DashboardConfig::new()
            .with_wallet_path("~/wallets")
            .with_selected_hotkeys(vec!["5Abc".to_string(), "5Xyz".to_string()]);
        config.save(&path).unwrap();

        assert_eq!(DashboardConfig::read_file(&path).unwrap(), config);
    }

    #[test]
    fn test_save_selected_hotkeys_keeps_stored_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        let stored = DashboardConfig::new()
            .with_wallet_path("~/wallets")
            .with_selected_hotkeys(vec!["5Old".to_string()]);
        stored.save(&path).unwrap();

        DashboardConfig::save_selected_hotkeys(&path, vec!["5New".to_string()]).unwrap();

        let config = DashboardConfig::read_file(&path).unwrap();
        assert_eq!(config, stored.with_selected_hotkeys(vec!["5New".to_string()]));
    }

    #[test]
    fn test_save_selected_hotkeys_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");

        DashboardConfig::save_selected_hotkeys(&path, vec!["5New".to_string()]).unwrap();

        let config = DashboardConfig::read_file(&path).unwrap();
        assert!(config.wallet_path.is_none());
        assert_eq!(config.selected_hotkeys, vec!["5New"]);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        fs::write(&path, "{ wallet_path").unwrap();

        assert!(matches!(
            DashboardConfig::read_file(&path),
            Err(ConfigError::Json { .. })
        ));
    }
}
