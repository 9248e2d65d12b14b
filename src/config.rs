//! Configuration
//!
//! Construction parameters for a model, with validation and optional TOML
//! file loading for the driver.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, SimError};

/// Parameters for building a model.
///
/// `agent_count` is unsigned, so a negative count is unrepresentable; the
/// grid dimensions still need runtime validation. A missing seed is filled
/// from OS entropy at construction and recorded on the model, so every run
/// stays replayable on demand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimConfig {
    pub agent_count: usize,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimConfig {
    pub fn new(agent_count: usize, width: usize, height: usize, seed: Option<u64>) -> Self {
        Self {
            agent_count,
            width,
            height,
            seed,
        }
    }

    /// Check the grid bounds. Fatal to construction when violated.
    pub fn validate(&self) -> Result<()> {
        if self.width < 1 {
            return Err(SimError::Configuration(
                "grid width must be at least 1".into(),
            ));
        }
        if self.height < 1 {
            return Err(SimError::Configuration(
                "grid height must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Load and validate a config from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            SimError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: SimConfig = toml::from_str(&raw).map_err(|e| {
            SimError::Configuration(format!("cannot parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert!(SimConfig::new(80, 10, 10, Some(42)).validate().is_ok());
        // Zero agents is legal; ticks are just no-ops
        assert!(SimConfig::new(0, 1, 1, None).validate().is_ok());
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = SimConfig::new(5, 0, 10, None).validate().unwrap_err();
        assert!(matches!(err, SimError::Configuration(_)));
    }

    #[test]
    fn test_zero_height_rejected() {
        let err = SimConfig::new(5, 10, 0, None).validate().unwrap_err();
        assert!(matches!(err, SimError::Configuration(_)));
    }

    #[test]
    fn test_parse_toml() {
        let config: SimConfig = toml::from_str(
            "agent_count = 80\nwidth = 10\nheight = 10\nseed = 42\n",
        )
        .unwrap();
        assert_eq!(config, SimConfig::new(80, 10, 10, Some(42)));
    }

    #[test]
    fn test_parse_toml_without_seed() {
        let config: SimConfig =
            toml::from_str("agent_count = 4\nwidth = 3\nheight = 3\n").unwrap();
        assert_eq!(config.seed, None);
    }
}
