//! Door linking between a newly accepted room and its placed neighbours.
//!
//! Every occupied neighbour gets a door pair: the new room opens toward it,
//! and it opens back toward the new room. This is the only place door state
//! changes.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::grid::{Direction, GridCoord, OccupancyGrid};
use crate::registry::RoomRegistry;

/// A door that went from closed to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorOpening {
    pub coord: GridCoord,
    pub direction: Direction,
}

/// Open doors between `new_coord` and each occupied neighbour.
///
/// Returns only doors that were newly opened. Nothing is mutated if any
/// involved cell is occupied without a room record.
pub fn link(
    new_coord: GridCoord,
    grid: &OccupancyGrid,
    registry: &mut RoomRegistry,
) -> Result<Vec<DoorOpening>, LayoutError> {
    if !registry.contains(new_coord) {
        return Err(LayoutError::Consistency { coord: new_coord });
    }

    let mut pairs: Vec<(Direction, GridCoord)> = Vec::with_capacity(4);
    for (direction, neighbor) in new_coord.neighbors() {
        if !grid.is_occupied(neighbor) {
            continue;
        }
        if !registry.contains(neighbor) {
            return Err(LayoutError::Consistency { coord: neighbor });
        }
        pairs.push((direction, neighbor));
    }

    let mut opened = Vec::with_capacity(pairs.len() * 2);
    for (direction, neighbor) in pairs {
        if let Some(room) = registry.lookup_mut(new_coord) {
            if room.doors.open(direction) {
                opened.push(DoorOpening {
                    coord: new_coord,
                    direction,
                });
            }
        }
        if let Some(room) = registry.lookup_mut(neighbor) {
            let back = direction.opposite();
            if room.doors.open(back) {
                opened.push(DoorOpening {
                    coord: neighbor,
                    direction: back,
                });
            }
        }
    }
    Ok(opened)
}
