//! Pure dungeon layout logic for RoomGrid.
//!
//! Rooms are grown breadth-first over a fixed grid from a seed cell. A new
//! room may touch at most one existing room when it is placed, and doors
//! open wherever two rooms meet, so every finished layout is a tree of rooms
//! connected by door pairs. Nothing here renders, sleeps or spawns threads:
//! callers drive generation one tick at a time with [`Generator::step`].
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Grid size, seed cell and room budget |
//! | [`doors`] | Door linking between a new room and its neighbours |
//! | [`error`] | Configuration and invariant errors |
//! | [`generator`] | Tick-driven breadth-first scheduler and regeneration |
//! | [`grid`] | Coordinates, compass directions, occupancy bitmap |
//! | [`placement`] | Accept/reject rules for candidate cells |
//! | [`random`] | Uniform random sources (seeded, fixed, replayed) |
//! | [`registry`] | Room records keyed by coordinate |
//! | [`state`] | Run counters and scheduler phase |
//! | [`validate`] | Tree, symmetry and connectivity checks for layouts |

pub mod config;
pub mod doors;
pub mod error;
pub mod generator;
pub mod grid;
pub mod placement;
pub mod random;
pub mod registry;
pub mod state;
pub mod validate;

pub use config::GenerationConfig;
pub use error::{ConfigError, LayoutError};
pub use generator::{Generator, LayoutEvent};
pub use grid::{Direction, GridCoord, OccupancyGrid};
pub use random::{FixedSource, RandomSource, SeededSource, SequenceSource};
pub use registry::{DoorSet, RoomRecord, RoomRegistry};
pub use state::{GenerationState, Phase};
