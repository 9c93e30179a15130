//! Run counters and the scheduler phase.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    Generating,
    Complete,
}

/// Counters for one generation run, owned by the scheduler and lent to the
/// placement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationState {
    pub room_count: u32,
    pub max_rooms: u32,
    /// Advisory; never enforced by the scheduler.
    pub min_rooms: u32,
    pub complete: bool,
}

impl GenerationState {
    pub fn new(max_rooms: u32, min_rooms: u32) -> Self {
        Self {
            room_count: 0,
            max_rooms,
            min_rooms,
            complete: false,
        }
    }

    pub fn has_capacity(&self) -> bool {
        self.room_count < self.max_rooms
    }

    pub fn below_minimum(&self) -> bool {
        self.room_count < self.min_rooms
    }
}
