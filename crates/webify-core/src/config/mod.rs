//! Configuration management for webify.
//!
//! Configuration is loaded from the platform config directory with defaults
//! that reproduce the stock behaviour: two directories under `public/`,
//! JPEG quality 90.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for webify.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Directories to convert
    pub targets: TargetsConfig,

    /// Conversion settings
    pub conversion: ConversionConfig,

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
    /// - macOS: ~/Library/Application Support/com.webify.webify/config.toml
    /// - Linux: ~/.config/webify/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\webify\config\config.toml
    ///
    /// Falls back to ~/.webify/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "webify", "webify")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".webify").join("config.toml")
            })
    }

    /// Directory that relative targets are resolved against (with ~ expansion).
    pub fn root_dir(&self) -> PathBuf {
        match &self.general.root {
            Some(root) => expand(root),
            None => executable_root(),
        }
    }

    /// Target directories in processing order, resolved to absolute paths
    /// where possible.
    pub fn target_dirs(&self) -> Vec<PathBuf> {
        let root = self.root_dir();
        self.targets
            .directories
            .iter()
            .map(|dir| {
                let dir = expand(dir);
                let joined = if dir.is_absolute() { dir } else { root.join(dir) };
                std::path::absolute(&joined).unwrap_or(joined)
            })
            .collect()
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn expand(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}

/// One level above the directory holding the running executable.
fn executable_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent()?.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
