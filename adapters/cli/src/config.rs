//! File-backed configuration for the meadow command-line adapter.

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use meadow_system_bootstrap::{Population, Stats};
use meadow_system_spawning::DEFAULT_GRASS_CHANCE;
use meadow_world::{
    DEFAULT_GRASS_NUTRITION, DEFAULT_HERBIVORE_HIT_POINTS, DEFAULT_PREDATOR_ATTACK,
    DEFAULT_PREDATOR_HIT_POINTS, DEFAULT_SPEED,
};
use serde::Deserialize;

/// Complete configuration of a meadow run.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct MeadowConfig {
    pub(crate) world: WorldSection,
    pub(crate) population: PopulationSection,
    pub(crate) creatures: CreatureSection,
    pub(crate) spawning: SpawningSection,
    pub(crate) run: RunSection,
}

/// Grid dimensions and the base seed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WorldSection {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Base seed; a random one is drawn when absent.
    pub(crate) seed: Option<u64>,
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            width: 30,
            height: 30,
            seed: None,
        }
    }
}

/// Placement attempts per entity kind.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PopulationSection {
    pub(crate) grass: u32,
    pub(crate) herbivores: u32,
    pub(crate) predators: u32,
    pub(crate) rocks: u32,
    pub(crate) trees: u32,
}

impl Default for PopulationSection {
    fn default() -> Self {
        let population = Population::default();
        Self {
            grass: population.grass,
            herbivores: population.herbivores,
            predators: population.predators,
            rocks: population.rocks,
            trees: population.trees,
        }
    }
}

impl From<&PopulationSection> for Population {
    fn from(section: &PopulationSection) -> Self {
        Self {
            rocks: section.rocks,
            trees: section.trees,
            grass: section.grass,
            herbivores: section.herbivores,
            predators: section.predators,
        }
    }
}

/// Starting statistics of creatures and grass.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CreatureSection {
    pub(crate) herbivore_hit_points: i32,
    pub(crate) herbivore_speed: u32,
    pub(crate) predator_hit_points: i32,
    pub(crate) predator_speed: u32,
    pub(crate) predator_attack: i32,
    pub(crate) grass_nutrition: i32,
}

impl Default for CreatureSection {
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

impl From<&CreatureSection> for Stats {
    fn from(section: &CreatureSection) -> Self {
        Self {
            herbivore_hit_points: section.herbivore_hit_points,
            herbivore_speed: section.herbivore_speed,
            predator_hit_points: section.predator_hit_points,
            predator_speed: section.predator_speed,
            predator_attack: section.predator_attack,
            grass_nutrition: section.grass_nutrition,
        }
    }
}

/// Grass growth parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SpawningSection {
    pub(crate) grass_chance: f64,
}

impl Default for SpawningSection {
    fn default() -> Self {
        Self {
            grass_chance: DEFAULT_GRASS_CHANCE,
        }
    }
}

/// Pacing of the presentation loop.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunSection {
    pub(crate) delay_ms: u64,
    /// Number of turns after which the run pauses; unbounded when absent.
    pub(crate) turns: Option<u64>,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            delay_ms: 1500,
            turns: None,
        }
    }
}

/// Values supplied on the command line that take precedence over the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) seed: Option<u64>,
    pub(crate) turns: Option<u64>,
    pub(crate) delay_ms: Option<u64>,
}

impl MeadowConfig {
    /// Loads the configuration from `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parses a TOML document into a configuration.
    pub(crate) fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse TOML configuration")
    }

    /// Applies command-line overrides on top of the loaded values.
    #[must_use]
    pub(crate) fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(width) = overrides.width {
            self.world.width = width;
        }
        if let Some(height) = overrides.height {
            self.world.height = height;
        }
        if let Some(seed) = overrides.seed {
            self.world.seed = Some(seed);
        }
        if let Some(turns) = overrides.turns {
            self.run.turns = Some(turns);
        }
        if let Some(delay_ms) = overrides.delay_ms {
            self.run.delay_ms = delay_ms;
        }
        self
    }

    /// Rejects configurations the simulation cannot run with.
    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(self.world.width > 0, "world width must be positive");
        ensure!(self.world.height > 0, "world height must be positive");
        ensure!(
            (0.0..=1.0).contains(&self.spawning.grass_chance),
            "grass_chance must lie within [0, 1], got {}",
            self.spawning.grass_chance
        );
        Ok(())
    }
}
