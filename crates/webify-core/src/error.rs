//! Error types for the webify conversion pipeline.
//!
//! Per-file failures are expressed as [`ConvertError`] and never escape the
//! directory loop; they are logged and recorded in the directory report.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Failure converting a single file, by stage.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The decoder could not interpret the file
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// The generic decoder could not identify the content
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// Writing the JPEG failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// The JPEG was written but the original could not be removed
    #[error("Failed to remove original {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Short stage name, used in structured log fields and reports.
    pub fn stage(&self) -> &'static str {
        match self {
            ConvertError::Decode { .. } | ConvertError::UnsupportedFormat { .. } => "decode",
            ConvertError::Encode { .. } => "encode",
            ConvertError::Delete { .. } => "delete",
        }
    }
}

/// Convenience type alias for per-file conversion results.
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;
