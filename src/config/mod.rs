//! Case configuration.
//!
//! One immutable [`CaseConfig`] value holds everything the pipeline needs
//! from the analyst's case setup: joint length, segmentation method and the
//! method-specific lengths. It is loaded once per run and passed by shared
//! reference through every stage; no stage mutates it.
//!
//! ## Loading order
//!
//! 1. `MSWELL_CASE` environment variable (path to a TOML file)
//! 2. `case.toml` in the current working directory
//! 3. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::types::Method;

/// Errors while loading or validating the case configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Run configuration for the segmentation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseConfig {
    /// Physical pipe-joint length used to convert valves-per-joint into an
    /// absolute device count (meters).
    pub joint_length: f64,

    /// Floor for the `cells` strategy's greedy length accumulation; 0
    /// disables it.
    pub minimum_segment_length: f64,

    /// Tubing segmentation strategy.
    pub method: Method,

    /// Constant segment length for the `fix` strategy (meters).
    pub segment_length: f64,

    /// Whether gravel-packed perforated wells get a device layer at all.
    /// Off by default: such wells are left untouched.
    pub gp_perf_devicelayer: bool,
}

impl Default for CaseConfig {
    fn default() -> Self {
        Self {
            joint_length: 12.0,
            minimum_segment_length: 0.0,
            method: Method::Cells,
            segment_length: 0.0,
            gp_perf_devicelayer: false,
        }
    }
}

impl CaseConfig {
    /// Load configuration using the standard search order:
    /// `$MSWELL_CASE`, then `./case.toml`, then built-in defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("MSWELL_CASE") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "loaded case config from MSWELL_CASE");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "failed to load MSWELL_CASE config, falling back");
                    }
                }
            } else {
                warn!(path = %path, "MSWELL_CASE points to a non-existent file, falling back");
            }
        }

        let local = PathBuf::from("case.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("loaded case config from ./case.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "failed to load ./case.toml, using defaults");
                }
            }
        }

        Self::default()
    }

    /// Load and validate a specific TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural validation of the configured values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.joint_length.is_finite() && self.joint_length > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "joint_length must be positive (was {})",
                self.joint_length
            )));
        }
        if !(self.minimum_segment_length.is_finite() && self.minimum_segment_length >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "minimum_segment_length must be non-negative (was {})",
                self.minimum_segment_length
            )));
        }
        if self.method == Method::Fix && self.segment_length <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "segment_length must be positive for the fix method (was {})",
                self.segment_length
            )));
        }
        Ok(())
    }
}
