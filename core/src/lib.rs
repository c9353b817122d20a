#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Meadow ecosystem simulation.
//!
//! This crate defines the vocabulary that connects the authoritative grid,
//! the per-turn rules, and the adapters. Rules mutate the grid and describe
//! what happened by appending [`Event`] values to a per-turn buffer; adapters
//! render those events alongside the textual grid snapshot.

use std::fmt;

use thiserror::Error;

/// Canonical banner emitted when the simulation boots.
pub const WELCOME_BANNER: &str = "🚀 Simulation started!";

/// Glyph rendered for cells that hold no entity.
pub const EMPTY_GLYPH: &str = "▫️";

/// Location of a single grid cell expressed as signed column and row coordinates.
///
/// Coordinates are signed so that neighbour arithmetic at the grid edge yields
/// an out-of-bounds position instead of wrapping around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position from column and row coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the position.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the position.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the position displaced by the provided column and row deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unique identifier assigned to an entity when it is registered on the grid.
///
/// Identifiers are allocated in increasing order, so ordering by identifier is
/// the same as ordering by insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Every kind of entity that can occupy a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Permanent obstacle.
    Rock,
    /// Permanent obstacle.
    Tree,
    /// Edible resource consumed by herbivores.
    Grass,
    /// Creature that seeks the nearest grass.
    Herbivore,
    /// Creature that hunts the nearest herbivore.
    Predator,
}

impl EntityKind {
    /// All kinds in declaration order.
    pub const ALL: [EntityKind; 5] = [
        Self::Rock,
        Self::Tree,
        Self::Grass,
        Self::Herbivore,
        Self::Predator,
    ];

    /// Glyph used when rendering the kind on the textual grid.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Rock => "🪨",
            Self::Tree => "🌳",
            Self::Grass => "🌿",
            Self::Herbivore => "🐄",
            Self::Predator => "🦁",
        }
    }

    /// Reports whether the kind is a living creature that acts each turn.
    #[must_use]
    pub const fn is_creature(self) -> bool {
        matches!(self, Self::Herbivore | Self::Predator)
    }

    /// Kind of entity this kind pursues, if it pursues anything.
    #[must_use]
    pub const fn prey(self) -> Option<EntityKind> {
        match self {
            Self::Herbivore => Some(Self::Grass),
            Self::Predator => Some(Self::Herbivore),
            Self::Rock | Self::Tree | Self::Grass => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Label describing the latest action a creature performed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Action {
    /// The creature has not acted since it was created.
    #[default]
    Born,
    /// The creature stepped along a path toward its target.
    Moved,
    /// The creature stepped to a random free neighbour.
    Wandered,
    /// The creature consumed a grass tuft.
    Ate,
    /// The creature wounded its prey.
    Attacked,
    /// The creature wounded its prey fatally.
    Killed,
    /// The creature could not do anything this turn.
    Idle,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Born => "born",
            Self::Moved => "moved",
            Self::Wandered => "wandered",
            Self::Ate => "ate",
            Self::Attacked => "attacked",
            Self::Killed => "killed",
            Self::Idle => "idle",
        };
        f.write_str(label)
    }
}

/// Entity counts captured by the statistics rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StatsReport {
    /// Number of entities registered on the grid.
    pub total: usize,
    /// Number of herbivores, living or not yet cleaned up.
    pub herbivores: usize,
    /// Number of predators, living or not yet cleaned up.
    pub predators: usize,
    /// Number of grass tufts.
    pub grass: usize,
}

/// Human-readable records appended by rules while a turn executes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A creature stepped along its path toward a target.
    Moved {
        /// Creature that moved.
        actor: EntityId,
        /// Kind of the creature that moved.
        kind: EntityKind,
        /// Cell occupied before the step.
        from: Position,
        /// Cell occupied after the step.
        to: Position,
        /// Kind of target the creature is heading for.
        toward: EntityKind,
    },
    /// A creature stepped to a random free neighbour.
    Wandered {
        /// Creature that moved.
        actor: EntityId,
        /// Kind of the creature that moved.
        kind: EntityKind,
        /// Cell occupied before the step.
        from: Position,
        /// Cell occupied after the step.
        to: Position,
    },
    /// A herbivore consumed an adjacent grass tuft.
    Ate {
        /// Herbivore that ate.
        actor: EntityId,
        /// Cell occupied by the herbivore.
        at: Position,
        /// Cell the grass occupied before it was consumed.
        food_at: Position,
        /// Hit-points gained from the grass.
        nutrition: i32,
    },
    /// A predator wounded an adjacent herbivore.
    Attacked {
        /// Predator that attacked.
        actor: EntityId,
        /// Cell occupied by the predator.
        at: Position,
        /// Herbivore that was attacked.
        victim: EntityId,
        /// Cell occupied by the victim.
        victim_at: Position,
        /// Hit-points the victim retains after the attack.
        remaining_hit_points: i32,
    },
    /// A predator's attack left its prey without hit-points; the prey was removed.
    Killed {
        /// Predator that made the kill.
        actor: EntityId,
        /// Herbivore that was killed.
        victim: EntityId,
        /// Cell the victim occupied before it was removed.
        victim_at: Position,
    },
    /// A creature found without hit-points on its own turn was removed.
    Died {
        /// Creature that died.
        actor: EntityId,
        /// Kind of the creature that died.
        kind: EntityKind,
        /// Cell the creature occupied.
        at: Position,
    },
    /// The cleanup rule removed a creature without hit-points.
    Removed {
        /// Creature that was removed.
        actor: EntityId,
        /// Kind of the creature that was removed.
        kind: EntityKind,
        /// Cell the creature occupied.
        at: Position,
    },
    /// A new grass tuft appeared on an empty cell.
    GrassGrew {
        /// Cell the grass occupies.
        at: Position,
    },
    /// Entity counts captured at the end of the turn.
    Statistics(StatsReport),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved {
                actor,
                kind,
                from,
                to,
                toward,
            } => write!(f, "{kind} {actor} heads for {toward}: {from} → {to}"),
            Self::Wandered {
                actor,
                kind,
                from,
                to,
            } => write!(f, "{kind} {actor} wanders: {from} → {to}"),
            Self::Ate {
                actor,
                at,
                food_at,
                nutrition,
            } => write!(
                f,
                "{} {actor} at {at} ate {} at {food_at} (+{nutrition} HP)",
                EntityKind::Herbivore,
                EntityKind::Grass
            ),
            Self::Attacked {
                actor,
                at,
                victim,
                victim_at,
                remaining_hit_points,
            } => write!(
                f,
                "{} {actor} at {at} attacks {} {victim} at {victim_at} (prey HP = {remaining_hit_points})",
                EntityKind::Predator,
                EntityKind::Herbivore
            ),
            Self::Killed {
                actor,
                victim,
                victim_at,
            } => write!(
                f,
                "{} {actor} devoured {} {victim} at {victim_at}",
                EntityKind::Predator,
                EntityKind::Herbivore
            ),
            Self::Died { actor, kind, at } => write!(f, "☠️ {kind} {actor} died at {at}"),
            Self::Removed { actor, kind, at } => {
                write!(f, "💀 {kind} {actor} at {at} removed from the map (dead)")
            }
            Self::GrassGrew { at } => write!(f, "🌱 new grass grew at {at}"),
            Self::Statistics(report) => write!(
                f,
                "📊 total: {}, {}={}, {}={}, {}={}",
                report.total,
                EntityKind::Herbivore,
                report.herbivores,
                EntityKind::Predator,
                report.predators,
                EntityKind::Grass,
                report.grass
            ),
        }
    }
}

/// Reasons the grid may refuse to register an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum GridError {
    /// The requested cell already holds an entity.
    #[error("cell {0} is already occupied")]
    OccupiedCell(Position),
    /// The requested cell lies outside the grid rectangle.
    #[error("cell {0} lies outside the grid")]
    OutOfBounds(Position),
}

#[cfg(test)]
mod tests {
    use super::{EntityId, EntityKind, Event, GridError, Position, StatsReport};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = Position::new(1, 1);
        let destination = Position::new(4, -3);
        assert_eq!(origin.manhattan_distance(destination), 7);
        assert_eq!(destination.manhattan_distance(origin), 7);
    }

    #[test]
    fn prey_chain_links_creatures_to_their_food() {
        assert_eq!(EntityKind::Herbivore.prey(), Some(EntityKind::Grass));
        assert_eq!(EntityKind::Predator.prey(), Some(EntityKind::Herbivore));
        assert_eq!(EntityKind::Rock.prey(), None);
        assert!(EntityKind::ALL
            .iter()
            .filter(|kind| kind.is_creature())
            .all(|kind| kind.prey().is_some()));
    }

    #[test]
    fn attack_record_mentions_remaining_hit_points() {
        let event = Event::Attacked {
            actor: EntityId::new(4),
            at: Position::new(0, 0),
            victim: EntityId::new(2),
            victim_at: Position::new(1, 0),
            remaining_hit_points: 0,
        };
        let line = event.to_string();
        assert!(line.starts_with("🦁 #4 at (0, 0)"), "{line}");
        assert!(line.contains("(1, 0)"), "{line}");
        assert!(line.ends_with("(prey HP = 0)"), "{line}");
    }

    #[test]
    fn statistics_record_lists_every_count() {
        let event = Event::Statistics(StatsReport {
            total: 9,
            herbivores: 4,
            predators: 2,
            grass: 3,
        });
        assert_eq!(event.to_string(), "📊 total: 9, 🐄=4, 🦁=2, 🌿=3");
    }

    #[test]
    fn occupied_cell_error_names_the_cell() {
        let error = GridError::OccupiedCell(Position::new(3, 5));
        assert_eq!(error.to_string(), "cell (3, 5) is already occupied");
    }
}
