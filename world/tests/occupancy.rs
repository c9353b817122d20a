use std::collections::HashSet;

use meadow_core::{EntityId, Position};
use meadow_world::{Entity, Grid};
use proptest::prelude::*;

const WIDTH: u32 = 6;
const HEIGHT: u32 = 5;

#[derive(Clone, Debug)]
enum Operation {
    Add { x: i32, y: i32, kind: u8 },
    Move { pick: usize, x: i32, y: i32 },
    Remove { pick: usize },
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (-1i32..8, -1i32..7, 0u8..5).prop_map(|(x, y, kind)| Operation::Add { x, y, kind }),
        (0usize..64, -1i32..8, -1i32..7).prop_map(|(pick, x, y)| Operation::Move { pick, x, y }),
        (0usize..64).prop_map(|pick| Operation::Remove { pick }),
    ]
}

fn entity_of_kind(kind: u8, position: Position) -> Entity {
    match kind {
        0 => Entity::rock(position),
        1 => Entity::tree(position),
        2 => Entity::grass(position),
        3 => Entity::herbivore(position),
        _ => Entity::predator(position),
    }
}

fn pick_id(grid: &Grid, pick: usize) -> Option<EntityId> {
    let ids = grid.entity_ids();
    if ids.is_empty() {
        None
    } else {
        Some(ids[pick % ids.len()])
    }
}

fn assert_invariants(grid: &Grid) {
    let view = grid.entities();
    let mut seen = HashSet::new();
    for snapshot in view.iter() {
        assert!(
            seen.insert(snapshot.position),
            "two entities share {}",
            snapshot.position
        );
        assert!(grid.is_inside(snapshot.position), "{} escaped the grid", snapshot.position);
        assert_eq!(grid.occupant(snapshot.position), Some(snapshot.id));
        assert_eq!(
            grid.entity(snapshot.id).map(Entity::position),
            Some(snapshot.position)
        );
    }

    let occupied = grid
        .cells()
        .filter(|cell| !grid.is_empty(*cell))
        .count();
    assert_eq!(occupied, view.len(), "occupancy index drifted from registry");
}

proptest! {
    #[test]
    fn occupancy_and_bounds_hold_for_any_operation_sequence(
        operations in prop::collection::vec(operation(), 1..80)
    ) {
        let mut grid = Grid::new(WIDTH, HEIGHT);

        for operation in operations {
            match operation {
                Operation::Add { x, y, kind } => {
                    let position = Position::new(x, y);
                    let was_free = grid.is_inside(position) && grid.is_empty(position);
                    let before = grid.entity_count();
                    let outcome = grid.add(entity_of_kind(kind, position));
                    prop_assert_eq!(outcome.is_ok(), was_free);
                    let expected = if was_free { before + 1 } else { before };
                    prop_assert_eq!(grid.entity_count(), expected);
                }
                Operation::Move { pick, x, y } => {
                    let Some(id) = pick_id(&grid, pick) else { continue };
                    let target = Position::new(x, y);
                    let valid = grid.is_inside(target) && grid.is_empty(target);
                    let before = grid.entities();
                    let moved = grid.move_entity(id, target);
                    prop_assert_eq!(moved, valid);
                    if !moved {
                        prop_assert_eq!(grid.entities(), before);
                    }
                }
                Operation::Remove { pick } => {
                    let Some(id) = pick_id(&grid, pick) else { continue };
                    prop_assert!(grid.remove(id).is_some());
                    prop_assert!(grid.remove(id).is_none());
                }
            }

            assert_invariants(&grid);
        }
    }
}
