//! Configuration types for the session timing pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::transforms::TrialCategory;

/// Configuration for per-trial timing derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Offset from choice time to reward-cue unveiling, in seconds
    #[serde(default = "default_reward_cue_offset_s")]
    pub reward_cue_offset_s: f64,

    /// Divisor converting raw timestamps to seconds (input is milliseconds)
    #[serde(default = "default_ms_per_second")]
    pub ms_per_second: f64,
}

fn default_reward_cue_offset_s() -> f64 {
    2.7
}

fn default_ms_per_second() -> f64 {
    1000.0
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reward_cue_offset_s: default_reward_cue_offset_s(),
            ms_per_second: default_ms_per_second(),
        }
    }
}

/// Configuration for output artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Suffix appended to the session base name for the augmented CSV
    #[serde(default = "default_augmented_suffix")]
    pub augmented_suffix: String,

    /// Trial categories to emit timing files for
    #[serde(default = "default_categories")]
    pub categories: Vec<TrialCategory>,
}

fn default_augmented_suffix() -> String {
    "_mod".to_string()
}

fn default_categories() -> Vec<TrialCategory> {
    vec![
        TrialCategory::StayHit,
        TrialCategory::StayMiss,
        TrialCategory::Switch,
    ]
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            augmented_suffix: default_augmented_suffix(),
            categories: default_categories(),
        }
    }
}

/// Main pipeline configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
