//! surge.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Process-lifetime configuration for one managed fleet.
///
/// Loaded once at startup and validated there; decision calls never
/// revalidate it. Multiple engines with independent configs can coexist
/// in one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurgeConfig {
    pub fleet: FleetConfig,
    #[serde(default)]
    pub scaling: ScalingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Identifier of the fleet this process manages.
    pub id: String,
    #[serde(default = "default_min_capacity")]
    pub min_capacity: u32,
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingConfig {
    /// Instances added per scale-up step (doubled on strong signals).
    #[serde(default = "default_scale_up_increment")]
    pub scale_up_increment: u32,
    /// Instances removed per scale-down step. Never amplified.
    #[serde(default = "default_scale_down_increment")]
    pub scale_down_increment: u32,
    /// Window after a scaling action during which further automatic
    /// actions are suppressed.
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,
}

fn default_min_capacity() -> u32 {
    2
}

fn default_max_capacity() -> u32 {
    10
}

fn default_scale_up_increment() -> u32 {
    2
}

fn default_scale_down_increment() -> u32 {
    1
}

fn default_cooldown_seconds() -> u64 {
    300
}

impl Default for ScalingConfig {
    fn default() -> Self {
        ScalingConfig {
            scale_up_increment: default_scale_up_increment(),
            scale_down_increment: default_scale_down_increment(),
            cooldown_seconds: default_cooldown_seconds(),
        }
    }
}

impl SurgeConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: SurgeConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check startup-time invariants: ordered bounds, positive steps.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fleet.id.is_empty() {
            return Err(ConfigError::MissingFleetId);
        }
        if self.fleet.min_capacity > self.fleet.max_capacity {
            return Err(ConfigError::InvalidBounds {
                min: self.fleet.min_capacity,
                max: self.fleet.max_capacity,
            });
        }
        if self.scaling.scale_up_increment == 0 {
            return Err(ConfigError::NonPositiveIncrement("scale_up_increment"));
        }
        if self.scaling.scale_down_increment == 0 {
            return Err(ConfigError::NonPositiveIncrement("scale_down_increment"));
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a config with the stock defaults for a new fleet.
    pub fn scaffold(fleet_id: &str) -> Self {
        SurgeConfig {
            fleet: FleetConfig {
                id: fleet_id.to_string(),
                min_capacity: default_min_capacity(),
                max_capacity: default_max_capacity(),
            },
            scaling: ScalingConfig::default(),
        }
    }
}
