#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded bootstrap system that populates a fresh meadow before the first turn.

use meadow_core::{EntityKind, GridError, Position};
use meadow_world::{
    Body, Entity, Grid, DEFAULT_GRASS_NUTRITION, DEFAULT_HERBIVORE_HIT_POINTS,
    DEFAULT_PREDATOR_ATTACK, DEFAULT_PREDATOR_HIT_POINTS, DEFAULT_SPEED,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of placement attempts made for each entity kind.
///
/// Every attempt draws one random cell and places an entity only when that
/// cell is still empty, so crowded grids end up with fewer entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Population {
    /// Attempts to place rocks.
    pub rocks: u32,
    /// Attempts to place trees.
    pub trees: u32,
    /// Attempts to place grass tufts.
    pub grass: u32,
    /// Attempts to place herbivores.
    pub herbivores: u32,
    /// Attempts to place predators.
    pub predators: u32,
}

impl Default for Population {
    fn default() -> Self {
        Self {
            rocks: 0,
            trees: 0,
            grass: 10,
            herbivores: 60,
            predators: 30,
        }
    }
}

/// Starting statistics handed to every creature and grass tuft placed by the bootstrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stats {
    /// Initial hit-points of herbivores.
    pub herbivore_hit_points: i32,
    /// Speed of herbivores.
    pub herbivore_speed: u32,
    /// Initial hit-points of predators.
    pub predator_hit_points: i32,
    /// Speed of predators.
    pub predator_speed: u32,
    /// Damage dealt by a predator per attack.
    pub predator_attack: i32,
    /// Hit-points restored by eating one grass tuft.
    pub grass_nutrition: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            herbivore_hit_points: DEFAULT_HERBIVORE_HIT_POINTS,
            herbivore_speed: DEFAULT_SPEED,
            predator_hit_points: DEFAULT_PREDATOR_HIT_POINTS,
            predator_speed: DEFAULT_SPEED,
            predator_attack: DEFAULT_PREDATOR_ATTACK,
            grass_nutrition: DEFAULT_GRASS_NUTRITION,
        }
    }
}

/// Configuration parameters required to construct the bootstrap system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    width: u32,
    height: u32,
    population: Population,
    stats: Stats,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration for a grid of the provided dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32, population: Population, stats: Stats, rng_seed: u64) -> Self {
        Self {
            width,
            height,
            population,
            stats,
            rng_seed,
        }
    }

    /// Width of the grid produced by [`Bootstrap::build`].
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the grid produced by [`Bootstrap::build`].
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Places the initial population onto a grid using a seeded generator.
#[derive(Debug)]
pub struct Bootstrap {
    config: Config,
    rng: ChaCha8Rng,
}

impl Bootstrap {
    /// Creates a new bootstrap system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Builds a fresh grid with the configured dimensions and populates it.
    pub fn build(&mut self) -> Result<Grid, GridError> {
        let mut grid = Grid::new(self.config.width, self.config.height);
        let _ = self.populate(&mut grid)?;
        Ok(grid)
    }

    /// Runs every placement attempt against the provided grid.
    ///
    /// Static objects are placed first, then grass, herbivores and predators.
    /// Returns the number of entities that were actually placed.
    pub fn populate(&mut self, grid: &mut Grid) -> Result<usize, GridError> {
        if grid.width() == 0 || grid.height() == 0 {
            return Ok(0);
        }

        let population = self.config.population;
        let plan = [
            (EntityKind::Rock, population.rocks),
            (EntityKind::Tree, population.trees),
            (EntityKind::Grass, population.grass),
            (EntityKind::Herbivore, population.herbivores),
            (EntityKind::Predator, population.predators),
        ];

        let mut placed = 0;
        for (kind, attempts) in plan {
            let mut placed_of_kind = 0;
            for _ in 0..attempts {
                let cell = self.random_cell(grid);
                if !grid.is_empty(cell) {
                    continue;
                }
                let _ = grid.add(Entity::new(cell, self.body(kind)))?;
                placed_of_kind += 1;
            }
            tracing::debug!(?kind, attempts, placed = placed_of_kind, "population placed");
            placed += placed_of_kind;
        }

        tracing::info!(
            width = grid.width(),
            height = grid.height(),
            placed,
            "meadow populated"
        );
        Ok(placed)
    }

    fn random_cell(&mut self, grid: &Grid) -> Position {
        let x = self.rng.gen_range(0..grid.width());
        let y = self.rng.gen_range(0..grid.height());
        Position::new(to_coord(x), to_coord(y))
    }

    fn body(&self, kind: EntityKind) -> Body {
        let stats = self.config.stats;
        match kind {
            EntityKind::Rock => Body::Rock,
            EntityKind::Tree => Body::Tree,
            EntityKind::Grass => Body::grass(stats.grass_nutrition),
            EntityKind::Herbivore => Body::herbivore(stats.herbivore_hit_points, stats.herbivore_speed),
            EntityKind::Predator => Body::predator(
                stats.predator_hit_points,
                stats.predator_speed,
                stats.predator_attack,
            ),
        }
    }
}

fn to_coord(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
