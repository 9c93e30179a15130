//! Layout engine - paces generation ticks and keeps the scene in sync

use hecs::Entity;
use roomgrid_logic::{ConfigError, GenerationConfig, Generator, Phase, RandomSource, SeededSource};

use crate::config::EngineConfig;
use crate::scene::{RoomScene, SceneLayout};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Schedule {
    /// No ticks pending
    Stopped,
    /// Waiting out a delay before ticking resumes
    Delayed { remaining: f32 },
    Running,
}

/// Drives a [`Generator`] at a fixed cadence and mirrors its rooms into an
/// ECS scene.
///
/// Call [`LayoutEngine::update`] once per frame with the elapsed time; the
/// engine runs one generation tick per `tick_interval`.
pub struct LayoutEngine<R = SeededSource> {
    generator: Generator<R>,
    scene: RoomScene,
    config: EngineConfig,
    schedule: Schedule,
    /// Seconds banked toward the next tick
    accumulator: f32,
    retries_used: u32,
}

impl LayoutEngine<SeededSource> {
    /// Engine with a `StdRng` source seeded from `seed`.
    pub fn seeded(seed: u64, config: EngineConfig) -> Result<Self, ConfigError> {
        Self::new(SeededSource::new(seed), config)
    }

    /// Regenerate with a freshly drawn seed from the thread RNG.
    pub fn regenerate_reseeded(&mut self) -> u64 {
        let source = SeededSource::from_entropy();
        let seed = source.seed();
        *self.generator.rng_mut() = source;
        log::debug!("reseeded layout rng with {seed}");
        self.regenerate();
        seed
    }
}

impl<R: RandomSource> LayoutEngine<R> {
    pub fn new(rng: R, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            generator: Generator::new(rng),
            scene: RoomScene::new(),
            config,
            schedule: Schedule::Stopped,
            accumulator: 0.0,
            retries_used: 0,
        })
    }

    /// Initialize generation and start ticking. The first tick runs on the
    /// next `update`.
    pub fn start(&mut self, config: GenerationConfig) -> Result<(), ConfigError> {
        self.generator.initialize(config)?;
        self.retries_used = 0;
        self.sync_scene();
        self.begin_ticking();
        Ok(())
    }

    /// Advance simulated time by `delta_seconds`.
    pub fn update(&mut self, delta_seconds: f32) {
        let delta = delta_seconds.max(0.0);
        match self.schedule {
            Schedule::Stopped => return,
            Schedule::Delayed { remaining } => {
                let remaining = remaining - delta;
                if remaining > 0.0 {
                    self.schedule = Schedule::Delayed { remaining };
                    return;
                }
                self.begin_ticking();
                self.accumulator += -remaining;
            }
            Schedule::Running => self.accumulator += delta,
        }

        while self.schedule == Schedule::Running && self.accumulator >= self.config.tick_interval
        {
            self.accumulator -= self.config.tick_interval;
            let in_progress = self.generator.step();
            self.sync_scene();
            if !in_progress {
                self.on_generation_finished();
            }
        }
    }

    /// Stop all pending ticks. The partial layout stays consistent.
    pub fn cancel(&mut self) {
        if self.schedule != Schedule::Stopped {
            log::debug!("ticking cancelled at tick {}", self.generator.ticks());
        }
        self.schedule = Schedule::Stopped;
        self.accumulator = 0.0;
    }

    /// Resume ticking after [`cancel`](Self::cancel) if the run is unfinished.
    pub fn resume(&mut self) {
        if self.schedule == Schedule::Stopped && self.generator.phase() == Phase::Generating {
            self.begin_ticking();
        }
    }

    /// Cancel, discard every room and start over after `regeneration_delay`.
    pub fn regenerate(&mut self) {
        self.cancel();
        self.retries_used = 0;
        self.restart_after_delay();
    }

    fn restart_after_delay(&mut self) {
        self.generator.regenerate();
        self.sync_scene();
        if self.generator.phase() == Phase::Generating {
            self.schedule = Schedule::Delayed {
                remaining: self.config.regeneration_delay,
            };
        }
    }

    fn begin_ticking(&mut self) {
        self.schedule = Schedule::Running;
        // First tick fires immediately, later ones every tick_interval
        self.accumulator = self.config.tick_interval;
    }

    fn on_generation_finished(&mut self) {
        self.schedule = Schedule::Stopped;
        self.accumulator = 0.0;

        let state = *self.generator.state();
        if state.below_minimum() && self.retries_used < self.config.max_retries {
            self.retries_used += 1;
            log::info!(
                "only {} of {} minimum rooms; retry {}/{}",
                state.room_count,
                state.min_rooms,
                self.retries_used,
                self.config.max_retries
            );
            self.restart_after_delay();
        }
    }

    fn sync_scene(&mut self) {
        let events = self.generator.drain_events();
        if events.is_empty() {
            return;
        }
        let Some(gen_config) = self.generator.config() else {
            return;
        };
        let layout = SceneLayout {
            grid_width: gen_config.grid_width,
            grid_height: gen_config.grid_height,
            room_width: self.config.room_width,
            room_height: self.config.room_height,
        };
        for event in events {
            self.scene.apply(event, &layout);
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// True while ticks are pending (running or waiting out a delay).
    pub fn is_running(&self) -> bool {
        self.schedule != Schedule::Stopped
    }

    pub fn is_complete(&self) -> bool {
        self.generator.is_complete()
    }

    pub fn generator(&self) -> &Generator<R> {
        &self.generator
    }

    pub fn scene(&self) -> &RoomScene {
        &self.scene
    }

    pub fn room_entities(&self) -> Vec<Entity> {
        self.scene.room_entities()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Automatic regenerations spent on the current layout.
    pub fn retries_used(&self) -> u32 {
        self.retries_used
    }
}
