//! Scene components for room entities.
//!
//! Components are pure data attached to entities. The scene spawns one
//! entity per placed room and updates it as doors open.

use roomgrid_logic::{Direction, DoorSet, GridCoord};
use serde::{Deserialize, Serialize};

/// Grid cell the room occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell(pub GridCoord);

/// Room centre in world units, relative to the grid centre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
}

impl WorldPosition {
    /// `(room_width·(x − W/2), room_height·(y − H/2))`, halves truncated.
    pub fn from_cell(
        coord: GridCoord,
        grid_width: i32,
        grid_height: i32,
        room_width: f32,
        room_height: f32,
    ) -> Self {
        Self {
            x: room_width * (coord.x - grid_width / 2) as f32,
            y: room_height * (coord.y - grid_height / 2) as f32,
        }
    }
}

/// Display name, "Room N" where N is the acceptance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomName(pub String);

impl RoomName {
    pub fn for_ordinal(ordinal: u32) -> Self {
        Self(format!("Room {ordinal}"))
    }
}

/// Which door visuals have been revealed on this room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorVisuals {
    pub revealed: DoorSet,
}

impl DoorVisuals {
    pub fn reveal(&mut self, direction: Direction) {
        self.revealed.open(direction);
    }

    pub fn is_revealed(&self, direction: Direction) -> bool {
        self.revealed.is_open(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_position_centred_on_grid() {
        let p = WorldPosition::from_cell(GridCoord::new(5, 5), 10, 10, 20.0, 12.0);
        assert_eq!(p, WorldPosition { x: 0.0, y: 0.0 });
        let p = WorldPosition::from_cell(GridCoord::new(4, 7), 10, 10, 20.0, 12.0);
        assert_eq!(p, WorldPosition { x: -20.0, y: 24.0 });
    }

    #[test]
    fn test_world_position_odd_grid_truncates_half() {
        // 7 / 2 == 3
        let p = WorldPosition::from_cell(GridCoord::new(0, 3), 7, 7, 20.0, 12.0);
        assert_eq!(p, WorldPosition { x: -60.0, y: 0.0 });
    }

    #[test]
    fn test_room_name() {
        assert_eq!(RoomName::for_ordinal(3).0, "Room 3");
    }

    #[test]
    fn test_reveal_door() {
        let mut doors = DoorVisuals::default();
        doors.reveal(Direction::South);
        assert!(doors.is_revealed(Direction::South));
        assert!(!doors.is_revealed(Direction::North));
    }
}
