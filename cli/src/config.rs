//! Session settings for the twenty CLI
//!
//! Layers, lowest first: built-in defaults, the optional TOML file, then
//! command-line flags (applied in `main`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest hint count the hint prompt will offer
pub const MAX_HINTS_LIMIT: usize = 9;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("max_hints must be between 1 and {limit}, got {0}", limit = MAX_HINTS_LIMIT)]
    InvalidMaxHints(usize),
}

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Dataset table
    pub data_path: PathBuf,

    /// How many characteristics the player may teach after a loss
    pub max_hints: usize,

    /// Fixed seed for guess order; entropy when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("test_data.csv"),
            max_hints: 2,
            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Like [`Settings::from_file`], but a missing file means defaults.
    pub fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_HINTS_LIMIT).contains(&self.max_hints) {
            return Err(ConfigError::InvalidMaxHints(self.max_hints));
        }
        Ok(())
    }
}
