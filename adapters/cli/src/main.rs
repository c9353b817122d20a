#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the meadow simulation in a terminal.

mod config;

use std::{
    io::{self, Write},
    path::PathBuf,
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use meadow_core::Event;
use meadow_engine::Simulation;
use meadow_rendering::TextPresenter;
use meadow_system_analytics::Analytics;
use meadow_system_behaviour::{Behaviour, Config as BehaviourConfig};
use meadow_system_bootstrap::{Bootstrap, Config as BootstrapConfig};
use meadow_system_cleanup::Cleanup;
use meadow_system_spawning::{Config as SpawningConfig, Spawning};
use meadow_world::Grid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use crate::config::{MeadowConfig, Overrides, RunSection};

/// Turn-based ecosystem of grass, herbivores and predators on a grid.
#[derive(Debug, Parser)]
#[command(name = "meadow", version)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of grid columns.
    #[arg(long)]
    width: Option<u32>,
    /// Number of grid rows.
    #[arg(long)]
    height: Option<u32>,
    /// Seed for every random decision of the run.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Pause after this many turns instead of running forever.
    #[arg(short, long)]
    turns: Option<u64>,
    /// Delay between turns in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            width: self.width,
            height: self.height,
            seed: self.seed,
            turns: self.turns,
            delay_ms: self.delay_ms,
        }
    }
}

/// Seeds handed to the individual systems, all derived from the base seed.
#[derive(Clone, Copy, Debug)]
struct SystemSeeds {
    bootstrap: u64,
    behaviour: u64,
    spawning: u64,
}

impl SystemSeeds {
    fn derive(base: u64) -> Self {
        let mut seeder = ChaCha8Rng::seed_from_u64(base);
        Self {
            bootstrap: seeder.gen(),
            behaviour: seeder.gen(),
            spawning: seeder.gen(),
        }
    }
}

/// Entry point for the meadow command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = MeadowConfig::load(cli.config.as_deref())?.with_overrides(cli.overrides());
    config.validate()?;

    let seed = config.world.seed.unwrap_or_else(rand::random);
    tracing::info!(
        seed,
        width = config.world.width,
        height = config.world.height,
        "configuration loaded"
    );

    let mut simulation = build_simulation(&config, seed)?;
    let stdout = io::stdout();
    run(&mut simulation, &config.run, &mut stdout.lock())
}

fn build_simulation(config: &MeadowConfig, seed: u64) -> Result<Simulation> {
    let seeds = SystemSeeds::derive(seed);
    let grid = Bootstrap::new(BootstrapConfig::new(
        config.world.width,
        config.world.height,
        (&config.population).into(),
        (&config.creatures).into(),
        seeds.bootstrap,
    ))
    .build()
    .context("failed to populate the meadow")?;

    let mut simulation = Simulation::new(grid);

    let mut behaviour = Behaviour::new(BehaviourConfig::new(seeds.behaviour));
    simulation.add_turn_rule(move |grid: &mut Grid, out: &mut Vec<Event>| {
        behaviour.handle(grid, out);
    });

    let mut spawning = Spawning::new(SpawningConfig::new(
        config.spawning.grass_chance,
        config.creatures.grass_nutrition,
        seeds.spawning,
    ));
    simulation.add_turn_rule(move |grid: &mut Grid, out: &mut Vec<Event>| {
        spawning.handle(grid, out);
    });

    let mut cleanup = Cleanup::new();
    simulation.add_turn_rule(move |grid: &mut Grid, out: &mut Vec<Event>| {
        cleanup.handle(grid, out);
    });

    let mut analytics = Analytics::new();
    simulation.add_turn_rule(move |grid: &mut Grid, out: &mut Vec<Event>| {
        analytics.handle(grid, out);
    });

    Ok(simulation)
}

fn run<W: Write>(simulation: &mut Simulation, pacing: &RunSection, out: &mut W) -> Result<()> {
    let presenter = TextPresenter::new();
    let delay = Duration::from_millis(pacing.delay_ms);

    presenter
        .write_banner(out)
        .context("failed to write to stdout")?;
    let _ = simulation.start();
    presenter
        .write_initialised(out)
        .context("failed to write to stdout")?;

    while simulation.is_running() {
        let report = simulation.next_turn();
        presenter
            .write_turn(&report, out)
            .context("failed to write to stdout")?;

        if pacing.turns.is_some_and(|limit| report.turn >= limit) {
            simulation.pause();
            presenter
                .write_paused(out)
                .context("failed to write to stdout")?;
            break;
        }
        thread::sleep(delay);
    }

    Ok(())
}
