//! Engine pacing and scene settings.

use roomgrid_logic::ConfigError;
use serde::{Deserialize, Serialize};

/// Configuration for the layout engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World units per room along x
    pub room_width: f32,
    /// World units per room along y
    pub room_height: f32,
    /// Seconds between generation ticks
    pub tick_interval: f32,
    /// Seconds to wait after a regeneration before ticking again
    pub regeneration_delay: f32,
    /// Automatic regenerations allowed when a run ends below `min_rooms`.
    /// Zero keeps whatever the first run produced.
    pub max_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            room_width: 20.0,
            room_height: 12.0,
            tick_interval: 0.1,
            regeneration_delay: 0.1,
            max_retries: 0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.room_width > 0.0 && self.room_height > 0.0) {
            return Err(ConfigError::InvalidEngineSetting(
                "room dimensions must be positive",
            ));
        }
        if !(self.tick_interval > 0.0) {
            return Err(ConfigError::InvalidEngineSetting(
                "tick_interval must be positive",
            ));
        }
        if !(self.regeneration_delay >= 0.0) {
            return Err(ConfigError::InvalidEngineSetting(
                "regeneration_delay must not be negative",
            ));
        }
        Ok(())
    }
}
