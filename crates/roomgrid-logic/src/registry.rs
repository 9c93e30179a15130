//! Room records keyed by grid coordinate.
//!
//! `RoomRegistry` is the single creation point for room identity. Records
//! are kept in acceptance order with a coordinate index beside them, so
//! neighbour lookups are O(1) and iteration replays the generation order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::grid::{Direction, GridCoord};

/// Four independent door flags. Doors only ever open during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorSet {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl DoorSet {
    pub fn is_open(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    /// Open the door facing `direction`. Returns false if it was already open.
    pub fn open(&mut self, direction: Direction) -> bool {
        let flag = match direction {
            Direction::North => &mut self.north,
            Direction::South => &mut self.south,
            Direction::East => &mut self.east,
            Direction::West => &mut self.west,
        };
        let newly_opened = !*flag;
        *flag = true;
        newly_opened
    }

    /// Open directions in `Direction::ALL` order.
    pub fn open_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.is_open(d))
            .collect()
    }

    pub fn open_count(&self) -> usize {
        Direction::ALL.into_iter().filter(|&d| self.is_open(d)).count()
    }
}

/// A placed room: where it is, when it was accepted, which doors are open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub coord: GridCoord,
    /// 1-based acceptance order; the seed room is 1.
    pub ordinal: u32,
    pub doors: DoorSet,
}

impl RoomRecord {
    pub fn new(coord: GridCoord, ordinal: u32) -> Self {
        Self {
            coord,
            ordinal,
            doors: DoorSet::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoomRegistry {
    rooms: Vec<RoomRecord>,
    by_coord: HashMap<GridCoord, usize>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and store a record for `coord`.
    ///
    /// The placement rules guarantee `coord` is free; registering the same
    /// coordinate twice returns the existing record unchanged.
    pub fn register(&mut self, coord: GridCoord) -> &RoomRecord {
        debug_assert!(
            !self.by_coord.contains_key(&coord),
            "room already registered at {coord}"
        );
        let index = match self.by_coord.get(&coord) {
            Some(&existing) => existing,
            None => {
                let index = self.rooms.len();
                self.rooms
                    .push(RoomRecord::new(coord, index as u32 + 1));
                self.by_coord.insert(coord, index);
                index
            }
        };
        &self.rooms[index]
    }

    pub fn lookup(&self, coord: GridCoord) -> Option<&RoomRecord> {
        self.by_coord.get(&coord).map(|&i| &self.rooms[i])
    }

    pub fn lookup_mut(&mut self, coord: GridCoord) -> Option<&mut RoomRecord> {
        self.by_coord.get(&coord).map(|&i| &mut self.rooms[i])
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        self.by_coord.contains_key(&coord)
    }

    /// Records in acceptance order.
    pub fn all(&self) -> &[RoomRecord] {
        &self.rooms
    }

    pub fn coordinates(&self) -> Vec<GridCoord> {
        self.rooms.iter().map(|r| r.coord).collect()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn clear(&mut self) {
        self.rooms.clear();
        self.by_coord.clear();
    }
}
