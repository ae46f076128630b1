//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

/// Largest accepted `limits.max_file_size_mb` (1 TiB).
pub const MAX_FILE_SIZE_MB: u64 = 1024 * 1024;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.workers == 0 {
            return Err(ConfigError::ValidationError(
                "processing.workers must be > 0".into(),
            ));
        }
        if !(1..=100).contains(&self.processing.quality) {
            return Err(ConfigError::ValidationError(
                "processing.quality must be between 1 and 100".into(),
            ));
        }
        if self.pipeline.buffer_size == 0 {
            return Err(ConfigError::ValidationError(
                "pipeline.buffer_size must be > 0".into(),
            ));
        }
        if !(1..=MAX_FILE_SIZE_MB).contains(&self.limits.max_file_size_mb) {
            return Err(ConfigError::ValidationError(format!(
                "limits.max_file_size_mb must be between 1 and {}",
                MAX_FILE_SIZE_MB
            )));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.limits.decode_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.decode_timeout_ms must be > 0".into(),
            ));
        }
        if self.ledger.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "ledger.path must not be empty".into(),
            ));
        }
        Ok(())
    }
}
