//! Entity model: static objects and creatures occupying grid cells.

use meadow_core::{Action, EntityKind, Position};

/// Hit-points a herbivore starts with unless configured otherwise.
pub const DEFAULT_HERBIVORE_HIT_POINTS: i32 = 10;
/// Hit-points a predator starts with unless configured otherwise.
pub const DEFAULT_PREDATOR_HIT_POINTS: i32 = 15;
/// Damage a predator deals per attack unless configured otherwise.
pub const DEFAULT_PREDATOR_ATTACK: i32 = 5;
/// Hit-points a grass tuft restores unless configured otherwise.
pub const DEFAULT_GRASS_NUTRITION: i32 = 5;
/// Cells a creature may cover per turn. Every creature currently acts once per turn.
pub const DEFAULT_SPEED: u32 = 1;

/// Anything that occupies a single grid cell.
///
/// The position is owned by the grid: it is assigned on construction and can
/// only change through [`crate::Grid::move_entity`], which keeps the entity's
/// own record and the occupancy index in lockstep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    position: Position,
    body: Body,
}

impl Entity {
    /// Creates an entity with the provided body at the provided position.
    #[must_use]
    pub const fn new(position: Position, body: Body) -> Self {
        Self { position, body }
    }

    /// Creates a rock at the provided position.
    #[must_use]
    pub const fn rock(position: Position) -> Self {
        Self::new(position, Body::Rock)
    }

    /// Creates a tree at the provided position.
    #[must_use]
    pub const fn tree(position: Position) -> Self {
        Self::new(position, Body::Tree)
    }

    /// Creates a grass tuft with default nutrition at the provided position.
    #[must_use]
    pub const fn grass(position: Position) -> Self {
        Self::new(position, Body::grass(DEFAULT_GRASS_NUTRITION))
    }

    /// Creates a herbivore with default statistics at the provided position.
    #[must_use]
    pub const fn herbivore(position: Position) -> Self {
        Self::new(
            position,
            Body::herbivore(DEFAULT_HERBIVORE_HIT_POINTS, DEFAULT_SPEED),
        )
    }

    /// Creates a predator with default statistics at the provided position.
    #[must_use]
    pub const fn predator(position: Position) -> Self {
        Self::new(
            position,
            Body::predator(
                DEFAULT_PREDATOR_HIT_POINTS,
                DEFAULT_SPEED,
                DEFAULT_PREDATOR_ATTACK,
            ),
        )
    }

    /// Cell the entity occupies.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn relocate(&mut self, position: Position) {
        self.position = position;
    }

    /// Variant-specific state of the entity.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Kind of the entity.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.body.kind()
    }

    /// Glyph used when rendering the entity.
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        self.kind().glyph()
    }

    /// Creature state, when the entity is a creature.
    #[must_use]
    pub const fn vitals(&self) -> Option<&Vitals> {
        match &self.body {
            Body::Herbivore(vitals) | Body::Predator { vitals, .. } => Some(vitals),
            Body::Rock | Body::Tree | Body::Grass { .. } => None,
        }
    }

    /// Mutable creature state, when the entity is a creature.
    pub fn vitals_mut(&mut self) -> Option<&mut Vitals> {
        match &mut self.body {
            Body::Herbivore(vitals) | Body::Predator { vitals, .. } => Some(vitals),
            Body::Rock | Body::Tree | Body::Grass { .. } => None,
        }
    }

    /// Nutrition carried by a grass tuft.
    #[must_use]
    pub const fn nutrition(&self) -> Option<i32> {
        match self.body {
            Body::Grass { nutrition } => Some(nutrition),
            _ => None,
        }
    }

    /// Damage dealt per attack by a predator.
    #[must_use]
    pub const fn attack(&self) -> Option<i32> {
        match self.body {
            Body::Predator { attack, .. } => Some(attack),
            _ => None,
        }
    }

    /// Reports whether the entity is a creature whose hit-points are exhausted.
    ///
    /// Static objects are never dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.vitals().is_some_and(|vitals| !vitals.is_alive())
    }
}

/// Variant-specific state carried by an [`Entity`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    /// Permanent obstacle.
    Rock,
    /// Permanent obstacle.
    Tree,
    /// Edible resource destroyed when eaten.
    Grass {
        /// Hit-points restored to the herbivore that eats the tuft.
        nutrition: i32,
    },
    /// Creature that seeks grass.
    Herbivore(Vitals),
    /// Creature that hunts herbivores.
    Predator {
        /// Shared creature state.
        vitals: Vitals,
        /// Hit-points removed from prey per attack.
        attack: i32,
    },
}

impl Body {
    /// Creates a grass body with the provided nutrition.
    #[must_use]
    pub const fn grass(nutrition: i32) -> Self {
        Self::Grass { nutrition }
    }

    /// Creates a herbivore body with the provided statistics.
    #[must_use]
    pub const fn herbivore(hit_points: i32, speed: u32) -> Self {
        Self::Herbivore(Vitals::new(hit_points, speed))
    }

    /// Creates a predator body with the provided statistics.
    #[must_use]
    pub const fn predator(hit_points: i32, speed: u32, attack: i32) -> Self {
        Self::Predator {
            vitals: Vitals::new(hit_points, speed),
            attack,
        }
    }

    /// Kind of entity the body describes.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Rock => EntityKind::Rock,
            Self::Tree => EntityKind::Tree,
            Self::Grass { .. } => EntityKind::Grass,
            Self::Herbivore(_) => EntityKind::Herbivore,
            Self::Predator { .. } => EntityKind::Predator,
        }
    }
}

/// State shared by every creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vitals {
    hit_points: i32,
    speed: u32,
    last_action: Action,
}

impl Vitals {
    /// Creates fresh creature state; the last action starts as [`Action::Born`].
    #[must_use]
    pub const fn new(hit_points: i32, speed: u32) -> Self {
        Self {
            hit_points,
            speed,
            last_action: Action::Born,
        }
    }

    /// Remaining hit-points. May be zero or negative before cleanup.
    #[must_use]
    pub const fn hit_points(&self) -> i32 {
        self.hit_points
    }

    /// Cells the creature may cover per turn.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Latest action performed by the creature.
    #[must_use]
    pub const fn last_action(&self) -> Action {
        self.last_action
    }

    /// Reports whether the creature still has hit-points.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// Adds hit-points, saturating at the numeric bounds.
    pub fn heal(&mut self, amount: i32) {
        self.hit_points = self.hit_points.saturating_add(amount);
    }

    /// Removes hit-points, saturating at the numeric bounds.
    pub fn wound(&mut self, amount: i32) {
        self.hit_points = self.hit_points.saturating_sub(amount);
    }

    /// Records the action performed on the creature's latest turn.
    pub fn record(&mut self, action: Action) {
        self.last_action = action;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_creatures() {
        let herbivore = Entity::herbivore(Position::new(0, 0));
        let predator = Entity::predator(Position::new(1, 0));
        let grass = Entity::grass(Position::new(2, 0));

        assert_eq!(herbivore.vitals().map(Vitals::hit_points), Some(10));
        assert_eq!(predator.vitals().map(Vitals::hit_points), Some(15));
        assert_eq!(predator.attack(), Some(5));
        assert_eq!(grass.nutrition(), Some(5));
        assert_eq!(
            herbivore.vitals().map(Vitals::last_action),
            Some(Action::Born)
        );
    }

    #[test]
    fn static_objects_have_no_vitals_and_never_die() {
        let mut rock = Entity::rock(Position::new(0, 0));
        assert!(rock.vitals().is_none());
        assert!(rock.vitals_mut().is_none());
        assert!(!rock.is_dead());
        assert_eq!(rock.glyph(), "🪨");
    }

    #[test]
    fn wounds_may_push_hit_points_below_zero() {
        let mut herbivore = Entity::herbivore(Position::new(0, 0));
        if let Some(vitals) = herbivore.vitals_mut() {
            vitals.wound(12);
        }
        assert_eq!(herbivore.vitals().map(Vitals::hit_points), Some(-2));
        assert!(herbivore.is_dead());
    }
}
