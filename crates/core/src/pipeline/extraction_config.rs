use std::path::PathBuf;

use thiserror::Error;

use crate::shared::constants::{
    DEFAULT_BLACK_THRESHOLD, DEFAULT_DIFF_THRESHOLD, DEFAULT_MIN_INTERVAL_SECS, DEFAULT_OUTPUT_DIR,
    SLIDE_FILE_EXTENSION, SLIDE_FILE_PREFIX,
};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("diff threshold must be a finite number >= 0, got {0}")]
    DiffThreshold(f64),
    #[error("minimum interval must be a finite number of seconds >= 0, got {0}")]
    MinInterval(f64),
}

/// Settings for one slide extraction run.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractionConfig {
    /// Mean intensity difference above which a frame starts a new slide.
    pub diff_threshold: f64,
    /// Minimum video time between two accepted slides.
    pub min_interval_secs: f64,
    /// Highest intensity treated as border when cropping.
    pub black_threshold: u8,
    pub output_dir: PathBuf,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            diff_threshold: DEFAULT_DIFF_THRESHOLD,
            min_interval_secs: DEFAULT_MIN_INTERVAL_SECS,
            black_threshold: DEFAULT_BLACK_THRESHOLD,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.diff_threshold.is_finite() || self.diff_threshold < 0.0 {
            return Err(ConfigError::DiffThreshold(self.diff_threshold));
        }
        if !self.min_interval_secs.is_finite() || self.min_interval_secs < 0.0 {
            return Err(ConfigError::MinInterval(self.min_interval_secs));
        }
        Ok(())
    }

    /// Destination of the `ordinal`-th slide (1-based), e.g. `slide_007.jpg`.
    pub fn slide_path(&self, ordinal: usize) -> PathBuf {
        self.output_dir.join(format!(
            "{SLIDE_FILE_PREFIX}{ordinal:03}.{SLIDE_FILE_EXTENSION}"
        ))
    }
}
