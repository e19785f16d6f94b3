//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.conversion.jpeg_quality) {
            return Err(ConfigError::ValidationError(
                "conversion.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.targets.directories.is_empty() {
            return Err(ConfigError::ValidationError(
                "targets.directories must list at least one directory".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\", got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }
}
