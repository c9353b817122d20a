#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Creature decision logic: every creature seeks, chases, eats or wanders.
//!
//! Herbivores pursue the nearest grass and predators the nearest herbivore.
//! A creature standing next to its target performs its terminal action
//! (eating or attacking); otherwise it takes the first step along a fresh
//! shortest path, and falls back to a random step whenever there is no
//! target, no path, or the next cell has been taken.

use meadow_core::{Action, EntityId, EntityKind, Event, Position};
use meadow_world::{navigation::find_path, Grid};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the behaviour system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration seeding the wander generator.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Rule that lets every creature on the grid act once per turn.
#[derive(Debug)]
pub struct Behaviour {
    rng: ChaCha8Rng,
}

impl Behaviour {
    /// Creates a new behaviour system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Moves all creatures, in insertion order, against the live grid.
    ///
    /// The creature list is captured once when the rule starts. Each creature
    /// observes the grid as changed by every creature that acted before it.
    /// Creatures killed earlier in the turn are skipped; creatures found
    /// without hit-points on their own turn are removed.
    pub fn handle(&mut self, grid: &mut Grid, out: &mut Vec<Event>) {
        let creatures: Vec<EntityId> = grid
            .iter()
            .filter(|(_, entity)| entity.kind().is_creature())
            .map(|(id, _)| id)
            .collect();

        for id in creatures {
            let Some(entity) = grid.entity(id) else {
                continue;
            };

            if entity.is_dead() {
                let kind = entity.kind();
                let at = entity.position();
                let _ = grid.remove(id);
                tracing::debug!(id = id.get(), ?kind, %at, "creature died before acting");
                out.push(Event::Died {
                    actor: id,
                    kind,
                    at,
                });
                continue;
            }

            let _ = act(grid, id, &mut self.rng, out);
        }
    }
}

/// Decides and executes exactly one action for the creature `id`.
///
/// The chosen action is stored as the creature's last action and returned.
/// Identifiers that do not name a creature on the grid yield [`Action::Idle`]
/// without touching anything.
pub fn act<R>(grid: &mut Grid, id: EntityId, rng: &mut R, out: &mut Vec<Event>) -> Action
where
    R: Rng + ?Sized,
{
    let Some(entity) = grid.entity(id) else {
        return Action::Idle;
    };
    let kind = entity.kind();
    let origin = entity.position();
    let Some(prey) = kind.prey() else {
        return Action::Idle;
    };

    let action = pursue(grid, id, kind, prey, origin, rng, out);

    if let Some(vitals) = grid.entity_mut(id).and_then(|entity| entity.vitals_mut()) {
        vitals.record(action);
    }
    tracing::trace!(id = id.get(), ?kind, %origin, %action, "creature acted");
    action
}

fn pursue<R>(
    grid: &mut Grid,
    id: EntityId,
    kind: EntityKind,
    prey: EntityKind,
    origin: Position,
    rng: &mut R,
    out: &mut Vec<Event>,
) -> Action
where
    R: Rng + ?Sized,
{
    let Some(target) = grid.find_nearest_kind(origin, prey) else {
        return random_step(grid, id, kind, origin, rng, out);
    };
    let Some(target_position) = grid.entity(target).map(|entity| entity.position()) else {
        return random_step(grid, id, kind, origin, rng, out);
    };
    let Some(path) = find_path(grid, origin, target_position) else {
        return random_step(grid, id, kind, origin, rng, out);
    };

    if path.len() <= 2 {
        return match kind {
            EntityKind::Herbivore => eat(grid, id, origin, target, out),
            EntityKind::Predator => attack(grid, id, origin, target, out),
            EntityKind::Rock | EntityKind::Tree | EntityKind::Grass => Action::Idle,
        };
    }

    let next = path[1];
    if grid.is_empty(next) && grid.move_entity(id, next) {
        out.push(Event::Moved {
            actor: id,
            kind,
            from: origin,
            to: next,
            toward: prey,
        });
        return Action::Moved;
    }

    random_step(grid, id, kind, origin, rng, out)
}

fn eat(
    grid: &mut Grid,
    id: EntityId,
    origin: Position,
    grass: EntityId,
    out: &mut Vec<Event>,
) -> Action {
    let Some(nutrition) = grid.entity(grass).and_then(|entity| entity.nutrition()) else {
        return Action::Idle;
    };
    let Some(food) = grid.remove(grass) else {
        return Action::Idle;
    };
    if let Some(vitals) = grid.entity_mut(id).and_then(|entity| entity.vitals_mut()) {
        vitals.heal(nutrition);
    }

    tracing::debug!(id = id.get(), %origin, food_at = %food.position(), nutrition, "herbivore ate");
    out.push(Event::Ate {
        actor: id,
        at: origin,
        food_at: food.position(),
        nutrition,
    });
    Action::Ate
}

fn attack(
    grid: &mut Grid,
    id: EntityId,
    origin: Position,
    victim: EntityId,
    out: &mut Vec<Event>,
) -> Action {
    let Some(damage) = grid.entity(id).and_then(|entity| entity.attack()) else {
        return Action::Idle;
    };
    let Some(prey) = grid.entity_mut(victim) else {
        return Action::Idle;
    };
    let victim_at = prey.position();
    let Some(vitals) = prey.vitals_mut() else {
        return Action::Idle;
    };
    vitals.wound(damage);
    let remaining_hit_points = vitals.hit_points();

    out.push(Event::Attacked {
        actor: id,
        at: origin,
        victim,
        victim_at,
        remaining_hit_points,
    });

    if remaining_hit_points > 0 {
        return Action::Attacked;
    }

    let _ = grid.remove(victim);
    tracing::debug!(id = id.get(), victim = victim.get(), %victim_at, "predator killed prey");
    out.push(Event::Killed {
        actor: id,
        victim,
        victim_at,
    });
    Action::Killed
}

fn random_step<R>(
    grid: &mut Grid,
    id: EntityId,
    kind: EntityKind,
    origin: Position,
    rng: &mut R,
    out: &mut Vec<Event>,
) -> Action
where
    R: Rng + ?Sized,
{
    let free: Vec<Position> = grid
        .neighbors(origin)
        .filter(|neighbor| grid.is_empty(*neighbor))
        .collect();

    let Some(&destination) = free.choose(rng) else {
        return Action::Idle;
    };

    if !grid.move_entity(id, destination) {
        return Action::Idle;
    }

    out.push(Event::Wandered {
        actor: id,
        kind,
        from: origin,
        to: destination,
    });
    Action::Wandered
}

#[cfg(test)]
mod tests {
    use super::*;
    use meadow_world::Entity;

    #[test]
    fn static_objects_do_not_act() {
        let mut grid = Grid::new(3, 3);
        let rock = grid
            .add(Entity::rock(Position::new(1, 1)))
            .expect("free cell");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut out = Vec::new();

        assert_eq!(act(&mut grid, rock, &mut rng, &mut out), Action::Idle);
        assert!(out.is_empty());
        assert_eq!(
            grid.entity(rock).map(Entity::position),
            Some(Position::new(1, 1))
        );
    }

    #[test]
    fn unknown_identifier_is_idle() {
        let mut grid = Grid::new(2, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut out = Vec::new();

        assert_eq!(
            act(&mut grid, EntityId::new(7), &mut rng, &mut out),
            Action::Idle
        );
        assert!(out.is_empty());
    }
}
