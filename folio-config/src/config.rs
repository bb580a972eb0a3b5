//! Config struct, YAML persistence, and path resolution.
//!
//! Covers:
//! - `load` / `save` (YAML file I/O with atomic write)
//! - Path helpers (`config_dir`, `config_path`, `effective_data_dir`)
//! - Semantic validation of the session bounds

use crate::error::ConfigError;
use crate::types::LogLevel;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tab session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum length of the MRU history of previously-active tabs
    #[serde(default = "crate::defaults::history_limit")]
    pub history_limit: usize,

    /// Maximum number of closed-tab metadata entries kept per project
    #[serde(default = "crate::defaults::cache_capacity")]
    pub cache_capacity: usize,

    /// Storage key prefix; the project id is appended to it
    #[serde(default = "crate::defaults::namespace_prefix")]
    pub namespace_prefix: String,

    /// Directory holding the per-project cache blobs
    #[serde(
        default = "crate::defaults::data_dir",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_dir: Option<PathBuf>,

    /// Verbosity of the debug log file
    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: crate::defaults::history_limit(),
            cache_capacity: crate::defaults::cache_capacity(),
            namespace_prefix: crate::defaults::namespace_prefix(),
            data_dir: crate::defaults::data_dir(),
            log_level: crate::defaults::log_level(),
        }
    }
}

impl Config {
    /// Get the configuration directory (`~/.config/folio` on Unix)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("folio")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("folio")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Directory for cache blobs, falling back to `<config dir>/data`
    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("data"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file
    ///
    /// A missing or empty file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml_ng::from_str(&contents)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to parse config from {:?}", path))?;
        config.validate()?;

        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(ConfigError::from)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let yaml = serde_yaml_ng::to_string(self)
            .map_err(ConfigError::from)
            .context("Failed to serialize config")?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        log::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check that the session bounds are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::Validation(
                "history_limit must be at least 1".to_string(),
            ));
        }
        if self.cache_capacity == 0 {
            return Err(ConfigError::Validation(
                "cache_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
