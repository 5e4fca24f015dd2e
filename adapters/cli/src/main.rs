#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Lawn Defence level headlessly.
//!
//! The runner loads a built-in level, optionally overrides the balancing
//! from a TOML file, lets a scripted defence play it and prints a summary.

mod autopilot;
mod report;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lawn_defence_core::{LevelDef, Tuning};
use lawn_defence_system_schedule::Simulation;
use lawn_defence_world::{self as world, query, state::Outcome, Config, World, DEFAULT_SEED};

use autopilot::Autopilot;
use report::Report;

/// Wall-clock length of a single simulated frame.
const FRAME: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(name = "lawn-defence")]
#[command(about = "Plays a Lawn Defence level with a scripted defence")]
struct Args {
    /// Built-in level to play (1-10).
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Wall-clock seconds to simulate before giving up.
    #[arg(long, default_value_t = 300.0)]
    seconds: f32,

    /// Seed of the level's random number generator.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// TOML file overriding the default balancing.
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Game-speed multiplier.
    #[arg(long, default_value_t = 1.0)]
    speed: f32,
}

/// Entry point for the Lawn Defence command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let tuning = match &args.tuning {
        Some(path) => load_tuning(path)?,
        None => Tuning::default(),
    };
    let level = LevelDef::builtin(args.level)
        .with_context(|| format!("there is no built-in level {}", args.level))?;

    let mut world = World::new(
        Config {
            seed: args.seed,
            tuning,
            ..Config::default()
        },
        level,
    );
    println!("{}", query::welcome_banner(&world));

    let mut simulation = Simulation::new();
    simulation.set_speed(args.speed);
    let autopilot = Autopilot::default();
    let mut report = Report::default();
    let frames = (args.seconds.max(0.0) / FRAME.as_secs_f32()).ceil() as u64;

    for frame in 0..frames {
        let mut events = Vec::new();
        if frame % autopilot.think_every == 0 {
            for command in autopilot.commands(&world) {
                world::apply(&mut world, command, &mut events);
            }
        }
        simulation.tick(&mut world, FRAME, &mut events);
        report.record(&events);
        if query::outcome(&world) != Outcome::InProgress {
            break;
        }
    }

    info!(outcome = ?query::outcome(&world), "run finished");
    println!("{}", report.summary(&world));
    Ok(())
}

fn load_tuning(path: &Path) -> Result<Tuning> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    Tuning::from_toml_str(&contents)
        .with_context(|| format!("invalid tuning file {}", path.display()))
}
