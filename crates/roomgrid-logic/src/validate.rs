//! Structural validation for generated layouts.
//!
//! Pure functions that take room records and return validation errors.
//! An empty result means the layout is a well-formed tree of rooms.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::config::GenerationConfig;
use crate::grid::{Direction, GridCoord};
use crate::registry::{DoorSet, RoomRecord};

/// A layout validation finding.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

fn door_map(rooms: &[RoomRecord]) -> HashMap<GridCoord, DoorSet> {
    rooms.iter().map(|r| (r.coord, r.doors)).collect()
}

/// Number of door pairs (undirected edges). Half-open doors count as half.
pub fn edge_count(rooms: &[RoomRecord]) -> usize {
    rooms.iter().map(|r| r.doors.open_count()).sum::<usize>() / 2
}

/// Rooms reachable through each room's open doors.
pub fn adjacency(rooms: &[RoomRecord]) -> HashMap<GridCoord, Vec<GridCoord>> {
    let occupied: HashSet<GridCoord> = rooms.iter().map(|r| r.coord).collect();
    rooms
        .iter()
        .map(|r| {
            let linked = r
                .doors
                .open_directions()
                .into_iter()
                .map(|d| r.coord.step(d))
                .filter(|n| occupied.contains(n))
                .collect();
            (r.coord, linked)
        })
        .collect()
}

/// Replay acceptance order: for each non-seed room, the rooms that were
/// already placed next to it when it was accepted.
pub fn acceptance_parents(rooms: &[RoomRecord]) -> Vec<(GridCoord, Vec<GridCoord>)> {
    let mut placed: HashSet<GridCoord> = HashSet::new();
    let mut result = Vec::new();
    for (i, room) in rooms.iter().enumerate() {
        if i > 0 {
            let parents = Direction::ALL
                .into_iter()
                .map(|d| room.coord.step(d))
                .filter(|n| placed.contains(n))
                .collect();
            result.push((room.coord, parents));
        }
        placed.insert(room.coord);
    }
    result
}

// ── A. Per-room ─────────────────────────────────────────────────────────

/// Every room lies inside the grid.
pub fn check_rooms_in_bounds(rooms: &[RoomRecord], width: i32, height: i32) -> Vec<ValidationError> {
    rooms
        .iter()
        .filter(|r| r.coord.x < 0 || r.coord.x >= width || r.coord.y < 0 || r.coord.y >= height)
        .map(|r| ValidationError {
            category: "room_bounds",
            severity: Severity::Error,
            message: format!(
                "Room #{} at {} lies outside the {}×{} grid",
                r.ordinal, r.coord, width, height
            ),
        })
        .collect()
}

/// No two rooms share a cell.
pub fn check_unique_cells(rooms: &[RoomRecord]) -> Vec<ValidationError> {
    let mut seen: HashMap<GridCoord, u32> = HashMap::new();
    let mut errors = Vec::new();
    for r in rooms {
        if let Some(first) = seen.insert(r.coord, r.ordinal) {
            errors.push(ValidationError {
                category: "room_overlap",
                severity: Severity::Error,
                message: format!(
                    "Rooms #{} and #{} both occupy {}",
                    first, r.ordinal, r.coord
                ),
            });
        }
    }
    errors
}

// ── B. Doors ────────────────────────────────────────────────────────────

/// Every open door faces a room whose opposite door is also open.
pub fn check_door_symmetry(rooms: &[RoomRecord]) -> Vec<ValidationError> {
    let doors = door_map(rooms);
    let mut errors = Vec::new();
    for r in rooms {
        for d in r.doors.open_directions() {
            let neighbor = r.coord.step(d);
            match doors.get(&neighbor) {
                None => errors.push(ValidationError {
                    category: "door_validity",
                    severity: Severity::Error,
                    message: format!(
                        "Room #{} at {} has a {} door leading to empty cell {}",
                        r.ordinal,
                        r.coord,
                        d.label(),
                        neighbor
                    ),
                }),
                Some(other) if !other.is_open(d.opposite()) => errors.push(ValidationError {
                    category: "door_symmetry",
                    severity: Severity::Error,
                    message: format!(
                        "Room #{} at {} opens {} but {} does not open {}",
                        r.ordinal,
                        r.coord,
                        d.label(),
                        neighbor,
                        d.opposite().label()
                    ),
                }),
                Some(_) => {}
            }
        }
    }
    errors
}

/// Every pair of 4-adjacent rooms is joined by a door.
pub fn check_adjacent_rooms_linked(rooms: &[RoomRecord]) -> Vec<ValidationError> {
    let doors = door_map(rooms);
    let mut errors = Vec::new();
    for r in rooms {
        // East and North only, so each pair is visited once
        for d in [Direction::East, Direction::North] {
            let neighbor = r.coord.step(d);
            if doors.contains_key(&neighbor) && !r.doors.is_open(d) {
                errors.push(ValidationError {
                    category: "door_missing",
                    severity: Severity::Error,
                    message: format!(
                        "Adjacent rooms {} and {} have no door between them",
                        r.coord, neighbor
                    ),
                });
            }
        }
    }
    errors
}

// ── C. Graph shape ──────────────────────────────────────────────────────

/// BFS through open doors from the first room reaches every room.
pub fn check_connectivity(rooms: &[RoomRecord]) -> Vec<ValidationError> {
    let Some(start) = rooms.first() else {
        return Vec::new();
    };
    let adj = adjacency(rooms);
    let mut visited: HashSet<GridCoord> = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start.coord);
    queue.push_back(start.coord);
    while let Some(current) = queue.pop_front() {
        if let Some(neighbors) = adj.get(&current) {
            for &n in neighbors {
                if visited.insert(n) {
                    queue.push_back(n);
                }
            }
        }
    }

    rooms
        .iter()
        .filter(|r| !visited.contains(&r.coord))
        .map(|r| ValidationError {
            category: "connectivity",
            severity: Severity::Error,
            message: format!(
                "Room #{} at {} is unreachable from the seed room {}",
                r.ordinal, r.coord, start.coord
            ),
        })
        .collect()
}

/// Door pairs number exactly rooms − 1. With connectivity this makes the
/// layout a tree.
pub fn check_tree_edges(rooms: &[RoomRecord]) -> Vec<ValidationError> {
    if rooms.is_empty() {
        return Vec::new();
    }
    let edges = edge_count(rooms);
    let expected = rooms.len() - 1;
    if edges == expected {
        return Vec::new();
    }
    vec![ValidationError {
        category: "tree_shape",
        severity: Severity::Error,
        message: format!(
            "{} rooms joined by {} door pairs, expected {}",
            rooms.len(),
            edges,
            expected
        ),
    }]
}

/// Room count is within the configured budget. Falling short of the
/// minimum is allowed and only warned about.
pub fn check_room_budget(rooms: &[RoomRecord], config: &GenerationConfig) -> Vec<ValidationError> {
    let count = rooms.len() as u32;
    let mut errors = Vec::new();
    if count > config.max_rooms {
        errors.push(ValidationError {
            category: "room_budget",
            severity: Severity::Error,
            message: format!("{} rooms exceeds max_rooms {}", count, config.max_rooms),
        });
    }
    if count < config.min_rooms {
        errors.push(ValidationError {
            category: "room_budget",
            severity: Severity::Warning,
            message: format!("{} rooms is below min_rooms {}", count, config.min_rooms),
        });
    }
    errors
}

/// Run every check.
pub fn validate_layout(rooms: &[RoomRecord], config: &GenerationConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    errors.extend(check_rooms_in_bounds(rooms, config.grid_width, config.grid_height));
    errors.extend(check_unique_cells(rooms));
    errors.extend(check_door_symmetry(rooms));
    errors.extend(check_adjacent_rooms_linked(rooms));
    errors.extend(check_connectivity(rooms));
    errors.extend(check_tree_edges(rooms));
    errors.extend(check_room_budget(rooms, config));
    errors
}

/// Only the `Error`-severity findings.
pub fn hard_errors(errors: &[ValidationError]) -> Vec<&ValidationError> {
    errors
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .collect()
}
