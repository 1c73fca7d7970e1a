use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DETECTION_INTERVAL_THRESHOLD,
    TRACKING_CONFIDENCE_THRESHOLD,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the detect-versus-track decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub detection_interval_ms: u64,
    pub tracking_confidence_threshold: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            detection_interval_ms: DETECTION_INTERVAL_THRESHOLD.as_millis() as u64,
            tracking_confidence_threshold: TRACKING_CONFIDENCE_THRESHOLD,
        }
    }
}

impl TrackerConfig {
    pub fn detection_interval(&self) -> Duration {
        Duration::from_millis(self.detection_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detection_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "detection_interval_ms must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.tracking_confidence_threshold) {
            return Err(ConfigError::Invalid(format!(
                "tracking_confidence_threshold must be within [0, 1], got {}",
                self.tracking_confidence_threshold
            )));
        }
        Ok(())
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the per-user config file, or defaults when there is none.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_or_default(Self::config_path().as_deref())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) if p.exists() => Self::load_from(p),
            _ => Ok(Self::default()),
        }
    }
}
