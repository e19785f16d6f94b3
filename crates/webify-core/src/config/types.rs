//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory that relative target directories are resolved against.
    ///
    /// When unset, the parent of the directory holding the executable is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Manifest file named in the end-of-run reminder
    pub manifest: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            root: None,
            manifest: "portfolio.json".to_string(),
        }
    }
}

/// Directories to convert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetsConfig {
    /// Directories processed in order, one level deep each
    pub directories: Vec<PathBuf>,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            directories: vec![
                PathBuf::from("public/cooking"),
                PathBuf::from("public/Photography"),
            ],
        }
    }
}

/// Conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self { jpeg_quality: 90 }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
