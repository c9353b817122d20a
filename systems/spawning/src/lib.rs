#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawning system that grows new grass on empty cells.

use meadow_core::{Event, Position};
use meadow_world::{Body, Entity, Grid, DEFAULT_GRASS_NUTRITION};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Chance per empty cell per turn that a grass tuft appears.
pub const DEFAULT_GRASS_CHANCE: f64 = 0.003;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    grass_chance: f64,
    nutrition: i32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided growth chance, grass nutrition and seed.
    ///
    /// The chance is clamped into `0.0..=1.0`; a non-finite chance disables growth.
    #[must_use]
    pub fn new(grass_chance: f64, nutrition: i32, rng_seed: u64) -> Self {
        let grass_chance = if grass_chance.is_finite() {
            grass_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            grass_chance,
            nutrition,
            rng_seed,
        }
    }

    /// Creates the reference configuration with the provided seed.
    #[must_use]
    pub fn with_seed(rng_seed: u64) -> Self {
        Self::new(DEFAULT_GRASS_CHANCE, DEFAULT_GRASS_NUTRITION, rng_seed)
    }

    /// Chance per empty cell per turn that grass appears.
    #[must_use]
    pub const fn grass_chance(&self) -> f64 {
        self.grass_chance
    }
}

/// Rule that rolls once per empty cell per turn and plants grass on success.
#[derive(Debug)]
pub struct Spawning {
    grass_chance: f64,
    nutrition: i32,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            grass_chance: config.grass_chance,
            nutrition: config.nutrition,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Plants grass on randomly selected empty cells.
    ///
    /// Empty cells are captured in row-major order before any grass is added,
    /// so grass planted this turn never blocks another roll.
    pub fn handle(&mut self, grid: &mut Grid, out: &mut Vec<Event>) {
        if self.grass_chance <= 0.0 {
            return;
        }

        let empty_cells: Vec<Position> = grid.cells().filter(|cell| grid.is_empty(*cell)).collect();

        for cell in empty_cells {
            if !self.rng.gen_bool(self.grass_chance) {
                continue;
            }

            match grid.add(Entity::new(cell, Body::grass(self.nutrition))) {
                Ok(_) => {
                    tracing::trace!(%cell, "grass grew");
                    out.push(Event::GrassGrew { at: cell });
                }
                Err(error) => tracing::warn!(%error, "grass could not be planted"),
            }
        }
    }
}
