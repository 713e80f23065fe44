//! Tool configuration, read from `~/.config/logsidian/config.toml`.
//!
//! ```toml
//! [migrate]
//! logseq_dir = "logseq"
//! app_config = ".obsidian/app.json"
//! skip = ["page-properties"]
//! ```

use crate::error::{MigrateError, Result};
use crate::obsidian::APP_CONFIG_PATH;
use crate::transform::Step;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub migrate: MigrateConfig,
}

/// Settings for the `migrate` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrateConfig {
    /// logseq's internal directory, removed from the copied vault.
    pub logseq_dir: String,
    /// App config location, relative to the output root.
    pub app_config: PathBuf,
    /// Steps to leave out of the pipeline.
    pub skip: Vec<Step>,
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            logseq_dir: "logseq".to_string(),
            app_config: PathBuf::from(APP_CONFIG_PATH),
            skip: Vec::new(),
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("logsidian").join("config.toml"))
    }

    /// Load config from an explicit path, or from the default location.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(MigrateError::ConfigError(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::load_from(path)
            }
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load config from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
