//! Room scene - mirrors generator events into an ECS world.

use std::collections::HashMap;

use hecs::{Entity, World};
use roomgrid_logic::{GridCoord, LayoutEvent};

use crate::components::{DoorVisuals, GridCell, RoomName, WorldPosition};

/// Grid and room dimensions needed to place entities in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    pub grid_width: i32,
    pub grid_height: i32,
    pub room_width: f32,
    pub room_height: f32,
}

/// One entity per placed room, keyed by grid cell.
#[derive(Default)]
pub struct RoomScene {
    world: World,
    rooms: HashMap<GridCoord, Entity>,
}

impl RoomScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one generator notification.
    pub fn apply(&mut self, event: LayoutEvent, layout: &SceneLayout) {
        match event {
            LayoutEvent::RoomPlaced { coord, ordinal } => {
                let position = WorldPosition::from_cell(
                    coord,
                    layout.grid_width,
                    layout.grid_height,
                    layout.room_width,
                    layout.room_height,
                );
                let entity = self.world.spawn((
                    GridCell(coord),
                    position,
                    RoomName::for_ordinal(ordinal),
                    DoorVisuals::default(),
                ));
                if let Some(old) = self.rooms.insert(coord, entity) {
                    log::warn!("room at {coord} spawned twice; dropping the older entity");
                    let _ = self.world.despawn(old);
                }
                log::debug!("spawned Room {ordinal} at {coord} ({}, {})", position.x, position.y);
            }
            LayoutEvent::DoorOpened { coord, direction } => {
                let Some(&entity) = self.rooms.get(&coord) else {
                    log::warn!("door opened on {coord} which has no room entity");
                    return;
                };
                if let Ok(mut doors) = self.world.get::<&mut DoorVisuals>(entity) {
                    doors.reveal(direction);
                }
            }
            LayoutEvent::Cleared => self.clear(),
        }
    }

    /// Despawn every room entity.
    pub fn clear(&mut self) {
        for (_, entity) in self.rooms.drain() {
            let _ = self.world.despawn(entity);
        }
    }

    pub fn entity_at(&self, coord: GridCoord) -> Option<Entity> {
        self.rooms.get(&coord).copied()
    }

    pub fn room_entities(&self) -> Vec<Entity> {
        self.rooms.values().copied().collect()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Revealed doors of the room at `coord`.
    pub fn door_visuals(&self, coord: GridCoord) -> Option<DoorVisuals> {
        let entity = self.entity_at(coord)?;
        self.world
            .get::<&DoorVisuals>(entity)
            .ok()
            .map(|doors| *doors)
    }

    pub fn position_of(&self, coord: GridCoord) -> Option<WorldPosition> {
        let entity = self.entity_at(coord)?;
        self.world
            .get::<&WorldPosition>(entity)
            .ok()
            .map(|p| *p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomgrid_logic::Direction;

    fn layout() -> SceneLayout {
        SceneLayout {
            grid_width: 10,
            grid_height: 10,
            room_width: 20.0,
            room_height: 12.0,
        }
    }

    #[test]
    fn test_room_placed_spawns_entity() {
        let mut scene = RoomScene::new();
        let c = GridCoord::new(4, 5);
        scene.apply(LayoutEvent::RoomPlaced { coord: c, ordinal: 2 }, &layout());
        let entity = scene.entity_at(c).unwrap();
        assert_eq!(scene.world().get::<&RoomName>(entity).unwrap().0, "Room 2");
        assert_eq!(
            scene.position_of(c),
            Some(WorldPosition { x: -20.0, y: 0.0 })
        );
    }

    #[test]
    fn test_door_opened_reveals_visual() {
        let mut scene = RoomScene::new();
        let c = GridCoord::new(5, 5);
        scene.apply(LayoutEvent::RoomPlaced { coord: c, ordinal: 1 }, &layout());
        scene.apply(
            LayoutEvent::DoorOpened {
                coord: c,
                direction: Direction::West,
            },
            &layout(),
        );
        let doors = scene.door_visuals(c).unwrap();
        assert!(doors.is_revealed(Direction::West));
        assert!(!doors.is_revealed(Direction::East));
    }

    #[test]
    fn test_door_on_unknown_room_is_ignored() {
        let mut scene = RoomScene::new();
        scene.apply(
            LayoutEvent::DoorOpened {
                coord: GridCoord::new(1, 1),
                direction: Direction::North,
            },
            &layout(),
        );
        assert_eq!(scene.room_count(), 0);
    }

    #[test]
    fn test_cleared_despawns_everything() {
        let mut scene = RoomScene::new();
        for (i, x) in (0..4).enumerate() {
            scene.apply(
                LayoutEvent::RoomPlaced {
                    coord: GridCoord::new(x, 0),
                    ordinal: i as u32 + 1,
                },
                &layout(),
            );
        }
        assert_eq!(scene.world().len(), 4);
        scene.apply(LayoutEvent::Cleared, &layout());
        assert_eq!(scene.room_count(), 0);
        assert_eq!(scene.world().len(), 0);
    }
}
