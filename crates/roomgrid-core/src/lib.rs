//! RoomGrid Core - tick-paced dungeon layout engine
//!
//! Wraps the pure [`roomgrid_logic::Generator`] with the pieces a game loop
//! needs: a fixed-cadence tick driver that can be cancelled and restarted,
//! and an ECS scene that holds one entity per placed room.
//!
//! # Architecture
//!
//! The scene uses an Entity Component System (ECS) via `hecs`:
//! - **Entities**: one per placed room
//! - **Components**: grid cell, world position, name, revealed doors
//! - **Engine**: feeds generator events into the scene every tick
//!
//! # Example
//!
//! ```rust,no_run
//! use roomgrid_core::prelude::*;
//! use roomgrid_logic::GenerationConfig;
//!
//! let mut engine = LayoutEngine::seeded(42, EngineConfig::default()).unwrap();
//! engine.start(GenerationConfig::default()).unwrap();
//!
//! // Grow the dungeon a tick at a time
//! while engine.is_running() {
//!     engine.update(1.0 / 60.0); // 60 FPS
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod scene;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::EngineConfig;
    pub use crate::engine::LayoutEngine;
    pub use crate::scene::RoomScene;
}
