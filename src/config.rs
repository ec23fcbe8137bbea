//! Configuration for the face tracking pipeline

use crate::constants::{
    CANONICAL_LANDMARK_COUNT, DEFAULT_BETA, DEFAULT_MIN_CUTOFF, DEFAULT_TARGET_FPS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tracker configuration.
///
/// All filter parameters are fixed at construction; there is no runtime
/// reconfiguration. Unknown fields in a config file are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Baseline cutoff frequency in Hz; lower is smoother but laggier
    pub min_cutoff: f32,

    /// Speed coefficient; higher responds faster to motion
    pub beta: f32,

    /// Mirror input frames horizontally before detection
    pub mirror_input: bool,

    /// Number of canonical metric landmarks produced by the estimator
    pub landmark_count: usize,

    /// Display refresh cadence assumed by the default tick source
    pub target_fps: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_cutoff: DEFAULT_MIN_CUTOFF,
            beta: DEFAULT_BETA,
            mirror_input: false,
            landmark_count: CANONICAL_LANDMARK_COUNT,
            target_fps: DEFAULT_TARGET_FPS,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::Config(e.to_string()))?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content).map_err(|e| Error::Config(e.to_string()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.min_cutoff.is_finite() || self.min_cutoff <= 0.0 {
            return Err(Error::Config(
                "min_cutoff must be a positive finite frequency".to_string(),
            ));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(Error::Config(
                "beta must be a non-negative finite value".to_string(),
            ));
        }
        if self.landmark_count == 0 {
            return Err(Error::Config(
                "landmark_count must be greater than 0".to_string(),
            ));
        }
        if self.target_fps == 0 {
            return Err(Error::Config("target_fps must be greater than 0".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TrackerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_min_cutoff() {
        let config = TrackerConfig {
            min_cutoff: 0.0,
            ..TrackerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_beta() {
        let config = TrackerConfig {
            beta: -0.1,
            ..TrackerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_landmark_count() {
        let config = TrackerConfig {
            landmark_count: 0,
            ..TrackerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = TrackerConfig {
            min_cutoff: 0.5,
            beta: 0.01,
            mirror_input: true,
            landmark_count: 68,
            target_fps: 30,
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: TrackerConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.min_cutoff, 0.5);
        assert_eq!(parsed.beta, 0.01);
        assert!(parsed.mirror_input);
        assert_eq!(parsed.landmark_count, 68);
        assert_eq!(parsed.target_fps, 30);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let yaml = "min_cutoff: 1.0\nsmoothing_mode: spring\n";
        assert!(serde_yaml::from_str::<TrackerConfig>(yaml).is_err());
    }
}
