//! Engine-level tests: tick pacing, cancellation, regeneration and the
//! minimum-room retry policy, driven with simulated time.

use roomgrid_core::prelude::*;
use roomgrid_logic::validate::{hard_errors, validate_layout};
use roomgrid_logic::{
    Direction, FixedSource, GenerationConfig, Generator, GridCoord, RandomSource, SeededSource,
};

fn started<R: RandomSource>(rng: R, engine_config: EngineConfig) -> LayoutEngine<R> {
    let mut engine = LayoutEngine::new(rng, engine_config).expect("valid engine config");
    engine
        .start(GenerationConfig::default())
        .expect("valid generation config");
    engine
}

/// Scene and generator agree on every room and door.
fn assert_scene_matches<R: RandomSource>(engine: &LayoutEngine<R>) {
    let gen = engine.generator();
    assert_eq!(engine.scene().room_count(), gen.rooms().len());
    for room in gen.rooms() {
        let visuals = engine
            .scene()
            .door_visuals(room.coord)
            .unwrap_or_else(|| panic!("no entity for {}", room.coord));
        for d in Direction::ALL {
            assert_eq!(visuals.is_revealed(d), room.doors.is_open(d), "{} {d:?}", room.coord);
        }
    }
}

#[test]
fn one_tick_per_interval() {
    let mut engine = started(FixedSource(1.0), EngineConfig::default());
    engine.update(0.0);
    assert_eq!(engine.generator().ticks(), 1);

    engine.update(0.04);
    assert_eq!(engine.generator().ticks(), 1);

    engine.update(0.1);
    assert_eq!(engine.generator().ticks(), 2);
    assert_scene_matches(&engine);
}

#[test]
fn large_delta_runs_to_completion() {
    let mut engine = started(FixedSource(1.0), EngineConfig::default());
    engine.update(10.0);
    assert!(engine.is_complete());
    assert!(!engine.is_running());
    assert_eq!(engine.room_entities().len(), 15);
    assert_scene_matches(&engine);
}

#[test]
fn cancel_freezes_consistent_partial_layout() {
    let mut engine = started(FixedSource(1.0), EngineConfig::default());
    engine.update(0.0);
    engine.update(0.1);
    engine.cancel();
    let rooms_before = engine.generator().room_count();

    engine.update(5.0);
    assert_eq!(engine.generator().room_count(), rooms_before);
    assert!(!engine.is_complete());
    assert!(!engine.is_running());
    assert_scene_matches(&engine);

    let gen = engine.generator();
    let config = gen.config().unwrap();
    let errors = validate_layout(gen.rooms(), config);
    assert!(hard_errors(&errors).is_empty(), "{errors:?}");

    engine.resume();
    engine.update(10.0);
    assert!(engine.is_complete());
    assert_eq!(engine.generator().room_count(), 15);
}

#[test]
fn resume_after_completion_is_noop() {
    let mut engine = started(FixedSource(0.0), EngineConfig::default());
    engine.update(1.0);
    assert!(engine.is_complete());
    engine.resume();
    assert!(!engine.is_running());
}

#[test]
fn regenerate_waits_for_delay() {
    let mut engine = started(FixedSource(1.0), EngineConfig::default());
    engine.update(10.0);
    assert!(engine.is_complete());

    engine.regenerate();
    assert!(engine.is_running());
    assert!(!engine.is_complete());
    // Old rooms are gone, only the new seed remains
    assert_eq!(engine.room_entities().len(), 1);
    assert_eq!(engine.scene().world().len(), 1);

    engine.update(0.05);
    assert_eq!(engine.generator().ticks(), 0);

    engine.update(0.2);
    assert!(engine.generator().ticks() >= 1);
    engine.update(10.0);
    assert_eq!(engine.room_entities().len(), 15);
    assert_scene_matches(&engine);
}

#[test]
fn regenerate_mid_run_cancels_pending_ticks() {
    let mut engine = started(FixedSource(1.0), EngineConfig::default());
    engine.update(0.0);
    engine.update(0.1);
    assert!(engine.generator().room_count() > 1);

    engine.regenerate();
    assert_eq!(engine.generator().room_count(), 1);
    assert_eq!(engine.generator().ticks(), 0);
    assert_scene_matches(&engine);
}

#[test]
fn no_retries_keeps_short_layout() {
    let mut engine = started(FixedSource(0.0), EngineConfig::default());
    engine.update(10.0);
    assert!(engine.is_complete());
    assert_eq!(engine.generator().room_count(), 1);
    assert_eq!(engine.retries_used(), 0);
    assert_eq!(engine.generator().runs(), 1);
}

#[test]
fn retries_are_bounded() {
    let config = EngineConfig {
        max_retries: 3,
        ..EngineConfig::default()
    };
    let mut engine = started(FixedSource(0.0), config);
    for _ in 0..50 {
        engine.update(0.1);
    }
    assert!(engine.is_complete());
    assert!(!engine.is_running());
    assert_eq!(engine.retries_used(), 3);
    assert_eq!(engine.generator().runs(), 4);
    assert_eq!(engine.room_entities().len(), 1);
}

#[test]
fn retry_not_used_when_minimum_met() {
    let config = EngineConfig {
        max_retries: 5,
        ..EngineConfig::default()
    };
    let mut engine = started(FixedSource(1.0), config);
    engine.update(10.0);
    assert_eq!(engine.retries_used(), 0);
    assert_eq!(engine.generator().runs(), 1);
}

#[test]
fn seeded_engine_places_rooms_in_world_space() {
    let mut engine = LayoutEngine::seeded(42, EngineConfig::default()).unwrap();
    engine.start(GenerationConfig::default()).unwrap();
    engine.update(10.0);
    assert!(engine.is_complete());
    let seed_pos = engine.scene().position_of(GridCoord::new(5, 5)).unwrap();
    assert_eq!(seed_pos, WorldPosition { x: 0.0, y: 0.0 });
    for room in engine.generator().rooms() {
        let p = engine.scene().position_of(room.coord).unwrap();
        assert_eq!(p.x, 20.0 * (room.coord.x - 5) as f32);
        assert_eq!(p.y, 12.0 * (room.coord.y - 5) as f32);
    }
    assert_scene_matches(&engine);
}

#[test]
fn reseeded_regeneration_stays_valid() {
    let mut engine = LayoutEngine::seeded(1, EngineConfig::default()).unwrap();
    engine.start(GenerationConfig::default()).unwrap();
    engine.update(10.0);
    for _ in 0..10 {
        let seed = engine.regenerate_reseeded();
        engine.update(10.0);
        assert!(engine.is_complete());
        assert_scene_matches(&engine);

        // The returned seed reproduces the layout
        let mut replay = Generator::new(SeededSource::new(seed));
        replay.initialize(GenerationConfig::default()).unwrap();
        replay.run_to_completion();
        assert_eq!(replay.rooms(), engine.generator().rooms());
    }
}
