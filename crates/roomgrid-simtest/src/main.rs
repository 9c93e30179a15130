//! RoomGrid Headless Generation Harness
//!
//! Sweeps seeds and configurations through the generator and the tick
//! engine, checking layout invariants on every run.
//! Runs entirely in-process with simulated time and no window.
//!
//! Usage:
//!   cargo run -p roomgrid-simtest
//!   cargo run -p roomgrid-simtest -- --verbose --map --seed 7
//!   cargo run -p roomgrid-simtest -- --config dungeon.json --json

mod map;

use std::path::PathBuf;

use clap::Parser;
use roomgrid_core::prelude::*;
use roomgrid_logic::validate::{acceptance_parents, edge_count, hard_errors, validate_layout};
use roomgrid_logic::{
    ConfigError, FixedSource, GenerationConfig, Generator, GridCoord, RandomSource, SeededSource,
    SequenceSource,
};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "roomgrid-simtest", version, about = "Headless RoomGrid generation harness")]
struct Cli {
    /// Print every check, not just failures
    #[arg(short, long)]
    verbose: bool,

    /// Number of seeds in each sweep
    #[arg(long, default_value_t = 200)]
    seeds: u64,

    /// RNG seed for the sample layout and engine run
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON file with `generation` and `engine` sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the sample layout as an ASCII map
    #[arg(long)]
    map: bool,

    /// Print results as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HarnessConfig {
    generation: GenerationConfig,
    engine: EngineConfig,
}

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let harness = match load_config(cli.config.as_ref()) {
        Ok(h) => h,
        Err(e) => {
            log::error!("❌ {e}");
            std::process::exit(2);
        }
    };

    if !cli.json {
        println!("=== RoomGrid Generation Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Fixed-sequence scenarios
    results.extend(validate_scenarios(&cli));

    // 2. Seed sweep over the configured layout
    results.extend(validate_seed_sweep(&cli, &harness.generation));

    // 3. Grid shapes and budgets
    results.extend(validate_config_matrix(&cli));

    // 4. Configuration errors
    results.extend(validate_config_errors(&cli));

    // 5. Regeneration
    results.extend(validate_regeneration(&cli, &harness.generation));

    // 6. Engine pacing with simulated frames
    results.extend(validate_engine(&cli, &harness));

    if cli.map {
        print_sample_map(&cli, &harness.generation);
    }

    // ── Summary ──
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    if cli.json {
        match serde_json::to_string_pretty(&results) {
            Ok(s) => println!("{s}"),
            Err(e) => log::error!("could not encode results: {e}"),
        }
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || cli.verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed, total, failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<HarnessConfig, String> {
    let Some(path) = path else {
        return Ok(HarnessConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read {}: {e}", path.display()))?;
    let config: HarnessConfig = serde_json::from_str(&text)
        .map_err(|e| format!("could not parse {}: {e}", path.display()))?;
    config
        .generation
        .validate()
        .and_then(|_| config.engine.validate())
        .map_err(|e| format!("invalid config in {}: {e}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

fn section(cli: &Cli, title: &str) {
    if !cli.json {
        println!("--- {title} ---");
    }
}

fn run_to_end<R: RandomSource>(rng: R, config: GenerationConfig) -> Result<Generator<R>, ConfigError> {
    let mut gen = Generator::new(rng);
    gen.initialize(config)?;
    gen.run_to_completion();
    Ok(gen)
}

/// Hard validation errors for a finished generator, joined for display.
fn layout_problems<R: RandomSource>(gen: &Generator<R>) -> Option<String> {
    let config = gen.config()?;
    let errors = validate_layout(gen.rooms(), config);
    let hard = hard_errors(&errors);
    if hard.is_empty() {
        None
    } else {
        Some(
            hard.iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

// ── 1. Scenarios ────────────────────────────────────────────────────────

fn validate_scenarios(cli: &Cli) -> Vec<TestResult> {
    section(cli, "Scenarios");
    let mut results = Vec::new();

    // Never skip: the budget fills exactly
    let config = GenerationConfig::centered(10, 10).with_room_limits(7, 15);
    match run_to_end(FixedSource(1.0), config) {
        Ok(gen) => {
            let one_parent = acceptance_parents(gen.rooms())
                .iter()
                .all(|(_, parents)| parents.len() == 1);
            let problems = layout_problems(&gen);
            results.push(TestResult {
                name: "never_skip_fills_budget".into(),
                passed: gen.room_count() == 15
                    && edge_count(gen.rooms()) == 14
                    && one_parent
                    && problems.is_none(),
                detail: format!(
                    "{} rooms, {} door pairs, {} ticks{}",
                    gen.room_count(),
                    edge_count(gen.rooms()),
                    gen.ticks(),
                    problems.map(|p| format!(" ({p})")).unwrap_or_default()
                ),
            });
        }
        Err(e) => results.push(config_failure("never_skip_fills_budget", e)),
    }

    // Budget of one: only the seed
    let config = GenerationConfig::default().with_room_limits(1, 1);
    match run_to_end(FixedSource(1.0), config) {
        Ok(gen) => {
            let doors = gen.doors_for(GridCoord::new(5, 5)).len();
            results.push(TestResult {
                name: "max_one_room".into(),
                passed: gen.room_count() == 1 && doors == 0 && gen.is_complete(),
                detail: format!("{} rooms, {} doors on seed", gen.room_count(), doors),
            });
        }
        Err(e) => results.push(config_failure("max_one_room", e)),
    }

    // Always skip: only the seed
    match run_to_end(FixedSource(0.0), GenerationConfig::default()) {
        Ok(gen) => results.push(TestResult {
            name: "always_skip_seed_only".into(),
            passed: gen.room_count() == 1 && gen.is_complete() && gen.frontier_len() == 0,
            detail: format!("{} rooms after {} ticks", gen.room_count(), gen.ticks()),
        }),
        Err(e) => results.push(config_failure("always_skip_seed_only", e)),
    }

    results
}

fn config_failure(name: &str, e: ConfigError) -> TestResult {
    TestResult {
        name: name.into(),
        passed: false,
        detail: format!("config rejected: {e}"),
    }
}

// ── 2. Seed sweep ───────────────────────────────────────────────────────

fn validate_seed_sweep(cli: &Cli, config: &GenerationConfig) -> Vec<TestResult> {
    section(cli, "Seed Sweep");
    let mut results = Vec::new();

    let mut invalid = Vec::new();
    let mut over_budget = 0;
    let mut below_min = 0;
    let mut counts = Vec::with_capacity(cli.seeds as usize);

    for seed in 0..cli.seeds {
        let gen = match run_to_end(SeededSource::new(seed), config.clone()) {
            Ok(g) => g,
            Err(e) => {
                results.push(config_failure("sweep_config", e));
                return results;
            }
        };
        if let Some(p) = layout_problems(&gen) {
            invalid.push(format!("seed {seed}: {p}"));
        }
        if gen.room_count() > config.max_rooms {
            over_budget += 1;
        }
        if gen.state().below_minimum() {
            below_min += 1;
        }
        counts.push(gen.room_count());
    }

    results.push(TestResult {
        name: "sweep_layouts_are_trees".into(),
        passed: invalid.is_empty(),
        detail: if invalid.is_empty() {
            format!("{} seeds, all connected trees with symmetric doors", cli.seeds)
        } else {
            format!("{} invalid: {}", invalid.len(), invalid.join(" | "))
        },
    });

    results.push(TestResult {
        name: "sweep_within_budget".into(),
        passed: over_budget == 0,
        detail: format!("{over_budget} runs exceeded max_rooms {}", config.max_rooms),
    });

    // Falling short of min_rooms is legal; report how often it happens
    let (min, max, mean) = summarize(&counts);
    results.push(TestResult {
        name: "sweep_room_distribution".into(),
        passed: true,
        detail: format!(
            "rooms min={min} max={max} mean={mean:.1}; {below_min}/{} below min_rooms {}",
            cli.seeds, config.min_rooms
        ),
    });

    if cli.verbose && !cli.json {
        let histogram = histogram(&counts);
        println!("  Room count distribution:");
        for (rooms, n) in histogram.iter().enumerate().filter(|(_, n)| **n > 0) {
            println!("    {:3} rooms: {}", rooms, "*".repeat(*n as usize));
        }
    }

    results
}

/// Runs per room count, indexed by count up to the largest one seen.
fn histogram(counts: &[u32]) -> Vec<u32> {
    let largest = counts.iter().copied().max().unwrap_or(0);
    let mut slots = vec![0u32; largest as usize + 1];
    for &c in counts {
        slots[c as usize] += 1;
    }
    slots
}

fn summarize(counts: &[u32]) -> (u32, u32, f64) {
    let min = counts.iter().copied().min().unwrap_or(0);
    let max = counts.iter().copied().max().unwrap_or(0);
    let mean = if counts.is_empty() {
        0.0
    } else {
        counts.iter().map(|&c| c as f64).sum::<f64>() / counts.len() as f64
    };
    (min, max, mean)
}

// ── 3. Config matrix ────────────────────────────────────────────────────

fn validate_config_matrix(cli: &Cli) -> Vec<TestResult> {
    section(cli, "Config Matrix");
    let mut results = Vec::new();

    let configs = [
        ("grid_5x5_max100", GenerationConfig::centered(5, 5).with_room_limits(7, 100)),
        ("grid_50x50_max100", GenerationConfig::centered(50, 50).with_room_limits(50, 100)),
        ("grid_20x8_max40", GenerationConfig::centered(20, 8).with_room_limits(10, 40)),
        (
            "corner_seed",
            GenerationConfig::centered(10, 10).with_seed(GridCoord::new(0, 9)),
        ),
        ("single_row", GenerationConfig::centered(12, 1)),
    ];
    let seeds = cli.seeds.min(50);

    for (name, config) in configs {
        let mut failures = Vec::new();
        let mut max_ticks = 0;
        for seed in 0..seeds {
            match run_to_end(SeededSource::new(seed), config.clone()) {
                Ok(gen) => {
                    if let Some(p) = layout_problems(&gen) {
                        failures.push(format!("seed {seed}: {p}"));
                    }
                    if gen.ticks() > gen.room_count() as u64 {
                        failures.push(format!(
                            "seed {seed}: {} ticks for {} rooms",
                            gen.ticks(),
                            gen.room_count()
                        ));
                    }
                    max_ticks = max_ticks.max(gen.ticks());
                }
                Err(e) => failures.push(format!("config rejected: {e}")),
            }
        }
        results.push(TestResult {
            name: format!("matrix_{name}"),
            passed: failures.is_empty(),
            detail: if failures.is_empty() {
                format!("{seeds} seeds valid, longest run {max_ticks} ticks")
            } else {
                failures.join(" | ")
            },
        });
    }

    results
}

// ── 4. Configuration errors ─────────────────────────────────────────────

fn validate_config_errors(cli: &Cli) -> Vec<TestResult> {
    section(cli, "Configuration Errors");
    let mut results = Vec::new();

    let bad = [
        ("zero_width", GenerationConfig { grid_width: 0, ..GenerationConfig::default() }),
        ("negative_height", GenerationConfig { grid_height: -4, ..GenerationConfig::default() }),
        ("seed_outside", GenerationConfig::default().with_seed(GridCoord::new(10, 10))),
        ("zero_budget", GenerationConfig::default().with_room_limits(0, 0)),
    ];
    for (name, config) in bad {
        let mut gen = Generator::new(FixedSource(1.0));
        let outcome = gen.initialize(config);
        results.push(TestResult {
            name: format!("reject_{name}"),
            passed: outcome.is_err() && !gen.step() && gen.rooms().is_empty(),
            detail: match outcome {
                Err(e) => format!("rejected: {e}"),
                Ok(()) => "accepted".into(),
            },
        });
    }

    results
}

// ── 5. Regeneration ─────────────────────────────────────────────────────

fn validate_regeneration(cli: &Cli, config: &GenerationConfig) -> Vec<TestResult> {
    section(cli, "Regeneration");
    let mut results = Vec::new();

    // Same replayed draws give the same layout
    let draws = vec![0.72, 0.15, 0.9, 0.41, 0.28, 0.66, 0.03, 0.88, 0.5];
    let mut gen = match run_to_end(SequenceSource::new(draws), config.clone()) {
        Ok(g) => g,
        Err(e) => {
            results.push(config_failure("regenerate_replay", e));
            return results;
        }
    };
    let first = gen.rooms().to_vec();
    gen.regenerate_with_seed(0);
    gen.run_to_completion();
    let second = gen.rooms().to_vec();
    gen.regenerate_with_seed(0);
    gen.run_to_completion();
    results.push(TestResult {
        name: "regenerate_replay_identical".into(),
        passed: first == second && second.as_slice() == gen.rooms(),
        detail: format!("{} rooms on each of 3 runs", first.len()),
    });

    // Fresh draws still satisfy every invariant
    let mut gen = match run_to_end(SeededSource::new(cli.seed), config.clone()) {
        Ok(g) => g,
        Err(e) => {
            results.push(config_failure("regenerate_fresh", e));
            return results;
        }
    };
    let mut problems = Vec::new();
    let mut distinct = std::collections::HashSet::new();
    for run in 0..20 {
        gen.regenerate();
        gen.run_to_completion();
        if let Some(p) = layout_problems(&gen) {
            problems.push(format!("run {run}: {p}"));
        }
        distinct.insert(gen.occupied_coordinates());
    }
    results.push(TestResult {
        name: "regenerate_fresh_layouts_valid".into(),
        passed: problems.is_empty(),
        detail: if problems.is_empty() {
            format!("20 regenerations valid, {} distinct layouts", distinct.len())
        } else {
            problems.join(" | ")
        },
    });

    results
}

// ── 6. Engine ───────────────────────────────────────────────────────────

fn validate_engine(cli: &Cli, harness: &HarnessConfig) -> Vec<TestResult> {
    section(cli, "Engine Pacing");
    let mut results = Vec::new();

    let mut engine = match LayoutEngine::seeded(cli.seed, harness.engine.clone()) {
        Ok(e) => e,
        Err(e) => {
            results.push(config_failure("engine_config", e));
            return results;
        }
    };
    if let Err(e) = engine.start(harness.generation.clone()) {
        results.push(config_failure("engine_start", e));
        return results;
    }

    // 60 FPS frames until the engine goes idle, with a generous cap
    let frame = 1.0 / 60.0;
    let max_frames = frame_budget(harness, frame);
    let mut frames = 0;
    while engine.is_running() && frames < max_frames {
        engine.update(frame);
        frames += 1;
    }

    results.push(TestResult {
        name: "engine_completes".into(),
        passed: engine.is_complete() && !engine.is_running(),
        detail: format!(
            "{} rooms after {} frames ({:.2}s simulated), {} retries",
            engine.generator().room_count(),
            frames,
            frames as f32 * frame,
            engine.retries_used()
        ),
    });

    let gen = engine.generator();
    let scene = engine.scene();
    let mismatched: Vec<String> = gen
        .rooms()
        .iter()
        .filter(|r| {
            scene
                .door_visuals(r.coord)
                .map(|v| v.revealed != r.doors)
                .unwrap_or(true)
        })
        .map(|r| r.coord.to_string())
        .collect();
    results.push(TestResult {
        name: "engine_scene_matches_layout".into(),
        passed: mismatched.is_empty() && scene.room_count() == gen.rooms().len(),
        detail: if mismatched.is_empty() {
            format!("{} room entities in sync", scene.room_count())
        } else {
            format!("out of sync: {}", mismatched.join(", "))
        },
    });

    results
}

/// Upper bound on frames for one engine run, including every retry.
fn frame_budget(harness: &HarnessConfig, frame: f32) -> u32 {
    let interval = harness.engine.tick_interval + harness.engine.regeneration_delay;
    let budget = harness.generation.max_rooms as f32 + 2.0;
    let retry_factor = harness.engine.max_retries as f32 + 1.0;
    // Float to int casts saturate, so only the padding can overflow
    let frames = ((budget * retry_factor * interval) / frame).ceil() as u32;
    frames.saturating_add(60)
}

fn print_sample_map(cli: &Cli, config: &GenerationConfig) {
    let gen = match run_to_end(SeededSource::new(cli.seed), config.clone()) {
        Ok(g) => g,
        Err(e) => {
            log::error!("sample layout not generated: {e}");
            return;
        }
    };
    // Keep stdout clean JSON when --json is set
    let map = map::render(gen.rooms(), config.grid_width, config.grid_height);
    let header = format!(
        "Sample layout (seed {}, {} rooms, {} ticks):",
        cli.seed,
        gen.room_count(),
        gen.ticks()
    );
    if cli.json {
        eprintln!("{header}\n{map}");
    } else {
        println!("\n{header}\n{map}");
    }
}
