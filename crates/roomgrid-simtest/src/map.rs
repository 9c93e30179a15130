//! ASCII rendering of a layout, north at the top.
//!
//! Rooms are `#`, the seed room is `@`, open doors are `-` and `|`.

use roomgrid_logic::{Direction, GridCoord, RoomRecord};
use std::collections::HashMap;

pub fn render(rooms: &[RoomRecord], width: i32, height: i32) -> String {
    let by_coord: HashMap<GridCoord, &RoomRecord> = rooms.iter().map(|r| (r.coord, r)).collect();
    let seed = rooms.first().map(|r| r.coord);
    let mut out = String::new();

    for y in (0..height).rev() {
        let mut cells = String::new();
        let mut links = String::new();
        for x in 0..width {
            let coord = GridCoord::new(x, y);
            let room = by_coord.get(&coord);
            cells.push(match room {
                Some(_) if Some(coord) == seed => '@',
                Some(_) => '#',
                None => '.',
            });
            if x + 1 < width {
                let east = room.is_some_and(|r| r.doors.is_open(Direction::East));
                cells.push(if east { '-' } else { ' ' });
            }
            if y > 0 {
                let south = room.is_some_and(|r| r.doors.is_open(Direction::South));
                links.push(if south { '|' } else { ' ' });
                if x + 1 < width {
                    links.push(' ');
                }
            }
        }
        out.push_str(cells.trim_end());
        out.push('\n');
        if y > 0 {
            out.push_str(links.trim_end());
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_small_tree() {
        let mut seed = RoomRecord::new(GridCoord::new(0, 0), 1);
        seed.doors.open(Direction::East);
        seed.doors.open(Direction::North);
        let mut east = RoomRecord::new(GridCoord::new(1, 0), 2);
        east.doors.open(Direction::West);
        let mut north = RoomRecord::new(GridCoord::new(0, 1), 3);
        north.doors.open(Direction::South);

        let map = render(&[seed, east, north], 2, 2);
        assert_eq!(map, "# .\n|\n@-#\n");
    }

    #[test]
    fn test_render_empty_grid() {
        assert_eq!(render(&[], 2, 1), ". .\n");
    }
}
