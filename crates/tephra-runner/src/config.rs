//! Estimator configuration.
//!
//! Configuration is read from YAML; every field has a default so a partial
//! file (or none at all) is valid:
//!
//! ```yaml
//! draws: 10000
//! seed: 42
//! retry:
//!   max_attempts: 10
//!   backoff_ms: 500
//! zone_mode: cumulative
//! road_width_m: 3.0
//! output_dir: results
//! ```

use crate::{Result, RunError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tephra_geometry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_ROAD_WIDTH_M};
use tephra_model::{ZoneMode, DEFAULT_DRAWS};

/// Retry settings for geometry fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_ms: 0,
        }
    }
}

/// Settings shared by every estimation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Monte Carlo draws per run.
    pub draws: usize,
    /// Random seed. A fresh seed is drawn and logged when absent.
    pub seed: Option<u64>,
    pub retry: RetryConfig,
    pub zone_mode: ZoneMode,
    /// Assumed road width (m).
    pub road_width_m: f64,
    /// Directory for CSV, JSON and distribution output.
    pub output_dir: PathBuf,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            draws: DEFAULT_DRAWS,
            seed: None,
            retry: RetryConfig::default(),
            zone_mode: ZoneMode::default(),
            road_width_m: DEFAULT_ROAD_WIDTH_M,
            output_dir: PathBuf::from("results"),
        }
    }
}

impl EstimatorConfig {
    /// Load and validate a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EstimatorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.draws == 0 {
            return Err(RunError::Config("draws must be at least 1".to_string()));
        }
        if self.retry.max_attempts == 0 {
            return Err(RunError::Config(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if !(self.road_width_m.is_finite() && self.road_width_m >= 0.0) {
            return Err(RunError::Config(format!(
                "road_width_m must be a non-negative number, got {}",
                self.road_width_m
            )));
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts,
            backoff: Duration::from_millis(self.retry.backoff_ms),
        }
    }
}
