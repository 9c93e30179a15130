use thiserror::Error;

use crate::grid::GridCoord;

/// Rejected generation settings. Generation does not start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("seed {seed} lies outside the {width}x{height} grid")]
    SeedOutOfBounds {
        seed: GridCoord,
        width: i32,
        height: i32,
    },

    #[error("max_rooms must be at least 1")]
    ZeroMaxRooms,

    #[error("invalid engine setting: {0}")]
    InvalidEngineSetting(&'static str),
}

/// Internal invariant failures. These never occur while occupancy and the
/// registry agree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("cell {coord} is occupied but has no room record")]
    Consistency { coord: GridCoord },
}
