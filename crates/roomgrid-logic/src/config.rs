//! Generation settings.
//!
//! Defaults match the stock dungeon: a 10×10 grid grown from its centre
//! cell, capped at 15 rooms with an advisory minimum of 7.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::GridCoord;

pub const DEFAULT_GRID_SIZE: i32 = 10;
pub const DEFAULT_MAX_ROOMS: u32 = 15;
pub const DEFAULT_MIN_ROOMS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    /// First room; placed unconditionally.
    pub seed: GridCoord,
    pub max_rooms: u32,
    /// Advisory only. The scheduler may finish below it.
    pub min_rooms: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::centered(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)
    }
}

impl GenerationConfig {
    /// Default room budget on a `width`×`height` grid, seeded at its centre.
    pub fn centered(width: i32, height: i32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            seed: GridCoord::new(width / 2, height / 2),
            max_rooms: DEFAULT_MAX_ROOMS,
            min_rooms: DEFAULT_MIN_ROOMS,
        }
    }

    pub fn with_seed(mut self, seed: GridCoord) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_room_limits(mut self, min_rooms: u32, max_rooms: u32) -> Self {
        self.min_rooms = min_rooms;
        self.max_rooms = max_rooms;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        let seed = self.seed;
        if seed.x < 0 || seed.x >= self.grid_width || seed.y < 0 || seed.y >= self.grid_height {
            return Err(ConfigError::SeedOutOfBounds {
                seed,
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.max_rooms == 0 {
            return Err(ConfigError::ZeroMaxRooms);
        }
        if self.min_rooms > self.max_rooms {
            log::warn!(
                "min_rooms {} exceeds max_rooms {}; the minimum can never be met",
                self.min_rooms,
                self.max_rooms
            );
        }
        Ok(())
    }

    /// Total cells on the grid.
    pub fn cell_count(&self) -> usize {
        self.grid_width.max(0) as usize * self.grid_height.max(0) as usize
    }
}
