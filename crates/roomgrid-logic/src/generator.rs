//! Stepwise breadth-first room generation.
//!
//! `Generator` owns the whole run: occupancy grid, room registry, frontier
//! queue, counters and the random source. It advances one frontier cell per
//! [`Generator::step`] call and never blocks, so pacing (and cancelling) is
//! entirely up to whoever calls `step`.
//!
//! ```text
//! Idle ──initialize──▶ Generating ──(frontier empty | budget spent)──▶ Complete
//!                          ▲  │ step
//!                          └──┘
//! ```
//!
//! Collaborators learn about rooms and doors through [`LayoutEvent`]s,
//! drained with [`Generator::drain_events`].

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::doors::{self, DoorOpening};
use crate::error::ConfigError;
use crate::grid::{Direction, GridCoord, OccupancyGrid};
use crate::placement;
use crate::random::RandomSource;
use crate::registry::{RoomRecord, RoomRegistry};
use crate::state::{GenerationState, Phase};

/// Notification for the rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutEvent {
    /// A room was accepted. `ordinal` is its 1-based acceptance order.
    RoomPlaced { coord: GridCoord, ordinal: u32 },
    /// The door of the room at `coord` facing `direction` opened.
    DoorOpened {
        coord: GridCoord,
        direction: Direction,
    },
    /// Every room from the previous run was discarded.
    Cleared,
}

impl From<DoorOpening> for LayoutEvent {
    fn from(d: DoorOpening) -> Self {
        LayoutEvent::DoorOpened {
            coord: d.coord,
            direction: d.direction,
        }
    }
}

pub struct Generator<R> {
    config: Option<GenerationConfig>,
    grid: OccupancyGrid,
    registry: RoomRegistry,
    frontier: VecDeque<GridCoord>,
    state: GenerationState,
    phase: Phase,
    rng: R,
    ticks: u64,
    runs: u32,
    events: Vec<LayoutEvent>,
}

impl<R: RandomSource> Generator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            config: None,
            grid: OccupancyGrid::default(),
            registry: RoomRegistry::new(),
            frontier: VecDeque::new(),
            state: GenerationState::default(),
            phase: Phase::Idle,
            rng,
            ticks: 0,
            runs: 0,
            events: Vec::new(),
        }
    }

    /// Validate `config`, reset everything and place the seed room.
    ///
    /// On error nothing changes and generation does not start.
    pub fn initialize(&mut self, config: GenerationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.start_run(config);
        Ok(())
    }

    /// Advance one tick: expand a single frontier cell.
    ///
    /// Returns whether generation is still in progress afterwards.
    pub fn step(&mut self) -> bool {
        if self.phase != Phase::Generating {
            return false;
        }
        if self.finish_if_exhausted() {
            return false;
        }
        let Some(current) = self.frontier.pop_front() else {
            return false;
        };
        self.ticks += 1;

        let seed = self.seed();
        for (_, candidate) in current.neighbors() {
            if placement::accept(candidate, &self.grid, &self.state, seed, &mut self.rng) {
                self.commit(candidate);
            }
        }
        log::debug!(
            "tick {}: expanded {}, {} rooms, {} queued",
            self.ticks,
            current,
            self.state.room_count,
            self.frontier.len()
        );

        !self.finish_if_exhausted()
    }

    /// Step until complete. Returns the number of ticks taken by this call.
    pub fn run_to_completion(&mut self) -> u64 {
        let start = self.ticks;
        while self.step() {}
        self.ticks - start
    }

    /// Discard the current layout and start again from the same config.
    ///
    /// The random source is not reseeded, so the new run sees fresh draws.
    /// Does nothing before the first successful `initialize`.
    pub fn regenerate(&mut self) {
        let Some(config) = self.config.clone() else {
            log::warn!("regenerate called before initialize; ignoring");
            return;
        };
        self.start_run(config);
        log::info!("regenerated layout (run {})", self.runs);
    }

    /// Reseed the random source, then regenerate.
    pub fn regenerate_with_seed(&mut self, seed: u64) {
        self.rng.reseed(seed);
        self.regenerate();
    }

    fn start_run(&mut self, config: GenerationConfig) {
        // Undelivered events from the discarded run are superseded by `Cleared`
        self.events.clear();
        if !self.registry.is_empty() {
            self.events.push(LayoutEvent::Cleared);
        }
        self.grid.reset(config.grid_width, config.grid_height);
        self.registry.clear();
        self.frontier.clear();
        self.state = GenerationState::new(config.max_rooms, config.min_rooms);
        self.ticks = 0;
        self.runs += 1;

        // The seed bypasses the placement policy.
        let seed = config.seed;
        self.config = Some(config);
        self.phase = Phase::Generating;
        self.commit(seed);
        log::debug!("generation started at {seed}");
    }

    /// Record an accepted cell: register, occupy, count, enqueue, link.
    fn commit(&mut self, coord: GridCoord) {
        let ordinal = self.registry.register(coord).ordinal;
        self.grid.occupy(coord);
        self.state.room_count += 1;
        self.frontier.push_back(coord);
        self.events.push(LayoutEvent::RoomPlaced { coord, ordinal });

        match doors::link(coord, &self.grid, &mut self.registry) {
            Ok(opened) => self.events.extend(opened.into_iter().map(LayoutEvent::from)),
            Err(e) => {
                log::error!("{e}");
                if cfg!(debug_assertions) {
                    panic!("layout invariant violated: {e}");
                }
            }
        }
    }

    fn finish_if_exhausted(&mut self) -> bool {
        if !self.frontier.is_empty() && self.state.has_capacity() {
            return false;
        }
        if self.phase == Phase::Generating {
            self.phase = Phase::Complete;
            self.state.complete = true;
            log::info!(
                "generation complete: {} rooms in {} ticks",
                self.state.room_count,
                self.ticks
            );
            if self.state.below_minimum() {
                log::warn!(
                    "finished with {} rooms, below the minimum of {}",
                    self.state.room_count,
                    self.state.min_rooms
                );
            }
        }
        true
    }

    fn seed(&self) -> GridCoord {
        self.config.as_ref().map(|c| c.seed).unwrap_or_default()
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Occupied cells in acceptance order.
    pub fn occupied_coordinates(&self) -> Vec<GridCoord> {
        self.registry.coordinates()
    }

    /// Open doors of the room at `coord`; empty if there is no room.
    pub fn doors_for(&self, coord: GridCoord) -> Vec<Direction> {
        self.registry
            .lookup(coord)
            .map(|r| r.doors.open_directions())
            .unwrap_or_default()
    }

    pub fn room(&self, coord: GridCoord) -> Option<&RoomRecord> {
        self.registry.lookup(coord)
    }

    /// Rooms in acceptance order.
    pub fn rooms(&self) -> &[RoomRecord] {
        self.registry.all()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn room_count(&self) -> u32 {
        self.state.room_count
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn config(&self) -> Option<&GenerationConfig> {
        self.config.as_ref()
    }

    /// Ticks taken by the current run.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs started so far, including the current one.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Take all events queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<LayoutEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedSource, SeededSource};

    fn started(rng: FixedSource, config: GenerationConfig) -> Generator<FixedSource> {
        let mut gen = Generator::new(rng);
        gen.initialize(config).unwrap();
        gen
    }

    #[test]
    fn test_new_generator_is_idle() {
        let mut gen = Generator::new(FixedSource(1.0));
        assert_eq!(gen.phase(), Phase::Idle);
        assert!(!gen.step());
        assert!(gen.occupied_coordinates().is_empty());
    }

    #[test]
    fn test_initialize_places_seed() {
        let gen = started(FixedSource(1.0), GenerationConfig::default());
        assert_eq!(gen.phase(), Phase::Generating);
        assert_eq!(gen.room_count(), 1);
        assert_eq!(gen.frontier_len(), 1);
        assert_eq!(gen.occupied_coordinates(), vec![GridCoord::new(5, 5)]);
        assert!(gen.doors_for(GridCoord::new(5, 5)).is_empty());
    }

    #[test]
    fn test_invalid_config_does_not_start() {
        let mut gen = Generator::new(FixedSource(1.0));
        let bad = GenerationConfig::default().with_seed(GridCoord::new(50, 50));
        assert!(gen.initialize(bad).is_err());
        assert_eq!(gen.phase(), Phase::Idle);
        assert!(gen.config().is_none());
    }

    #[test]
    fn test_first_tick_expands_seed_in_order() {
        let mut gen = started(FixedSource(1.0), GenerationConfig::default());
        assert!(gen.step());
        assert_eq!(
            gen.occupied_coordinates(),
            vec![
                GridCoord::new(5, 5),
                GridCoord::new(4, 5),
                GridCoord::new(6, 5),
                GridCoord::new(5, 4),
                GridCoord::new(5, 6),
            ]
        );
        assert_eq!(gen.doors_for(GridCoord::new(5, 5)).len(), 4);
        assert_eq!(gen.ticks(), 1);
    }

    #[test]
    fn test_max_one_room_completes_immediately() {
        let cfg = GenerationConfig::default().with_room_limits(1, 1);
        let mut gen = started(FixedSource(1.0), cfg);
        assert!(!gen.step());
        assert!(gen.is_complete());
        assert_eq!(gen.room_count(), 1);
        assert!(gen.doors_for(GridCoord::new(5, 5)).is_empty());
    }

    #[test]
    fn test_always_skip_leaves_only_seed() {
        let mut gen = started(FixedSource(0.0), GenerationConfig::default());
        assert!(!gen.step());
        assert!(gen.is_complete());
        assert_eq!(gen.room_count(), 1);
        assert_eq!(gen.frontier_len(), 0);
    }

    #[test]
    fn test_complete_is_sticky() {
        let mut gen = started(FixedSource(0.0), GenerationConfig::default());
        gen.run_to_completion();
        assert!(!gen.step());
        assert!(!gen.step());
        assert_eq!(gen.room_count(), 1);
        assert_eq!(gen.phase(), Phase::Complete);
    }

    #[test]
    fn test_events_follow_acceptance() {
        let mut gen = started(FixedSource(1.0), GenerationConfig::default());
        let events = gen.drain_events();
        assert_eq!(
            events,
            vec![LayoutEvent::RoomPlaced {
                coord: GridCoord::new(5, 5),
                ordinal: 1
            }]
        );
        gen.step();
        let events = gen.drain_events();
        // Room (4,5) is placed, then its door pair opens
        assert_eq!(
            &events[..3],
            &[
                LayoutEvent::RoomPlaced {
                    coord: GridCoord::new(4, 5),
                    ordinal: 2
                },
                LayoutEvent::DoorOpened {
                    coord: GridCoord::new(4, 5),
                    direction: Direction::East
                },
                LayoutEvent::DoorOpened {
                    coord: GridCoord::new(5, 5),
                    direction: Direction::West
                },
            ]
        );
        assert!(gen.drain_events().is_empty());
    }

    #[test]
    fn test_regenerate_emits_cleared_and_restarts() {
        let mut gen = started(FixedSource(1.0), GenerationConfig::default());
        gen.run_to_completion();
        gen.drain_events();
        gen.regenerate();
        assert_eq!(gen.phase(), Phase::Generating);
        assert_eq!(gen.room_count(), 1);
        assert_eq!(gen.ticks(), 0);
        assert_eq!(gen.runs(), 2);
        let events = gen.drain_events();
        assert_eq!(events[0], LayoutEvent::Cleared);
        assert!(matches!(events[1], LayoutEvent::RoomPlaced { ordinal: 1, .. }));
    }

    #[test]
    fn test_undrained_regenerations_keep_event_queue_bounded() {
        let mut gen = started(FixedSource(1.0), GenerationConfig::default());
        gen.run_to_completion();
        for _ in 0..1000 {
            gen.regenerate();
            gen.run_to_completion();
        }
        let events = gen.drain_events();
        assert_eq!(events[0], LayoutEvent::Cleared);
        assert_eq!(events.iter().filter(|e| **e == LayoutEvent::Cleared).count(), 1);
        let placed = events
            .iter()
            .filter(|e| matches!(e, LayoutEvent::RoomPlaced { .. }))
            .count();
        assert_eq!(placed, gen.rooms().len());
        // One RoomPlaced per room plus two DoorOpened per door pair
        assert_eq!(events.len(), 1 + gen.rooms().len() + 2 * (gen.rooms().len() - 1));
    }

    #[test]
    fn test_regenerate_before_initialize_is_noop() {
        let mut gen = Generator::new(FixedSource(1.0));
        gen.regenerate();
        assert_eq!(gen.phase(), Phase::Idle);
        assert!(gen.drain_events().is_empty());
    }

    #[test]
    fn test_regenerate_mid_run_discards_partial_layout() {
        let mut gen = Generator::new(SeededSource::new(9));
        gen.initialize(GenerationConfig::default()).unwrap();
        gen.step();
        gen.step();
        gen.regenerate();
        assert_eq!(gen.rooms().len(), 1);
        assert_eq!(gen.grid().occupied_count(), 1);
        assert!(!gen.is_complete());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut gen = Generator::new(SeededSource::new(1234));
        gen.initialize(GenerationConfig::default()).unwrap();
        gen.run_to_completion();
        let first = gen.rooms().to_vec();

        gen.regenerate_with_seed(1234);
        gen.run_to_completion();
        assert_eq!(gen.rooms(), first.as_slice());
    }
}
