//! Grid coordinates, compass directions and the occupancy bitmap.
//!
//! The occupancy grid is the foundation for every spatial query made during
//! generation. It only knows which cells hold a room; everything about the
//! room itself lives in the [`crate::registry`].

use serde::{Deserialize, Serialize};

/// Integer cell position on the room grid.
///
/// Components are signed so that the neighbours of edge cells can be
/// expressed and then rejected by a bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent cell in `direction`. May lie outside any grid.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// All four neighbours, in expansion order (left, right, down, up).
    pub fn neighbors(self) -> [(Direction, GridCoord); 4] {
        Direction::EXPANSION_ORDER.map(|d| (d, self.step(d)))
    }

    /// Direction from `self` to `other` if the two cells are 4-adjacent.
    pub fn direction_to(self, other: GridCoord) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.step(d) == other)
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compass direction of a room wall. North is +y ("up").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Order in which a frontier cell offers its neighbours: left, right, down, up.
    pub const EXPANSION_ORDER: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::South,
        Direction::North,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

/// Fixed W×H occupancy bitmap, row-major.
#[derive(Debug, Clone, Default)]
pub struct OccupancyGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// An all-empty grid. Non-positive dimensions give an empty grid that
    /// contains no coordinate; callers validate dimensions beforehand.
    pub fn new(width: i32, height: i32) -> Self {
        let mut grid = Self::default();
        grid.reset(width, height);
        grid
    }

    /// Reallocate as an all-empty `width`×`height` grid.
    pub fn reset(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
        self.cells.clear();
        self.cells
            .resize(self.width as usize * self.height as usize, false);
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Out-of-bounds cells are never occupied.
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.index(coord).is_some_and(|i| self.cells[i])
    }

    /// Mark `coord` occupied. Callers check bounds first; an out-of-bounds
    /// coordinate is ignored.
    pub fn occupy(&mut self, coord: GridCoord) {
        debug_assert!(self.contains(coord), "occupy out of bounds: {coord}");
        debug_assert!(!self.is_occupied(coord), "cell already occupied: {coord}");
        if let Some(i) = self.index(coord) {
            self.cells[i] = true;
        }
    }

    /// Number of occupied 4-neighbours of `coord`.
    pub fn occupied_neighbor_count(&self, coord: GridCoord) -> usize {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.is_occupied(coord.step(d)))
            .count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn index(&self, coord: GridCoord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y as usize * self.width as usize + coord.x as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_round_trip() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            let (dx, dy) = d.offset();
            let (ox, oy) = d.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_expansion_order_is_left_right_down_up() {
        let c = GridCoord::new(5, 5);
        let order: Vec<GridCoord> = c.neighbors().iter().map(|(_, n)| *n).collect();
        assert_eq!(
            order,
            vec![
                GridCoord::new(4, 5),
                GridCoord::new(6, 5),
                GridCoord::new(5, 4),
                GridCoord::new(5, 6),
            ]
        );
    }

    #[test]
    fn test_direction_to() {
        let a = GridCoord::new(2, 2);
        assert_eq!(a.direction_to(GridCoord::new(2, 3)), Some(Direction::North));
        assert_eq!(a.direction_to(GridCoord::new(1, 2)), Some(Direction::West));
        assert_eq!(a.direction_to(GridCoord::new(3, 3)), None);
        assert_eq!(a.direction_to(a), None);
    }

    #[test]
    fn test_bounds() {
        let grid = OccupancyGrid::new(10, 8);
        assert!(grid.contains(GridCoord::new(0, 0)));
        assert!(grid.contains(GridCoord::new(9, 7)));
        assert!(!grid.contains(GridCoord::new(10, 0)));
        assert!(!grid.contains(GridCoord::new(0, 8)));
        assert!(!grid.contains(GridCoord::new(-1, 3)));
    }

    #[test]
    fn test_occupy_and_query() {
        let mut grid = OccupancyGrid::new(4, 4);
        let c = GridCoord::new(1, 2);
        assert!(!grid.is_occupied(c));
        grid.occupy(c);
        assert!(grid.is_occupied(c));
        assert_eq!(grid.occupied_count(), 1);
        // Out of bounds reads as empty
        assert!(!grid.is_occupied(GridCoord::new(-1, 0)));
    }

    #[test]
    fn test_neighbor_count_at_edges() {
        let mut grid = OccupancyGrid::new(3, 3);
        grid.occupy(GridCoord::new(1, 0));
        grid.occupy(GridCoord::new(0, 1));
        assert_eq!(grid.occupied_neighbor_count(GridCoord::new(0, 0)), 2);
        assert_eq!(grid.occupied_neighbor_count(GridCoord::new(2, 2)), 0);
    }

    #[test]
    fn test_reset_clears() {
        let mut grid = OccupancyGrid::new(3, 3);
        grid.occupy(GridCoord::new(1, 1));
        grid.reset(5, 2);
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!((grid.width(), grid.height()), (5, 2));
        assert!(!grid.contains(GridCoord::new(1, 2)));
    }
}
