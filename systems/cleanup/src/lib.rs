#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure cleanup system that clears creatures whose hit-points ran out.

use meadow_core::Event;
use meadow_world::Grid;

/// Rule that removes every creature left without hit-points.
#[derive(Debug, Default)]
pub struct Cleanup;

impl Cleanup {
    /// Creates a new cleanup system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Removes dead creatures that the decision logic did not already remove.
    pub fn handle(&mut self, grid: &mut Grid, out: &mut Vec<Event>) {
        let dead: Vec<_> = grid
            .entities()
            .iter()
            .filter(|snapshot| snapshot.hit_points.is_some_and(|hit_points| hit_points <= 0))
            .copied()
            .collect();

        for snapshot in dead {
            if grid.remove(snapshot.id).is_none() {
                continue;
            }
            tracing::debug!(id = snapshot.id.get(), kind = ?snapshot.kind, at = %snapshot.position, "dead creature removed");
            out.push(Event::Removed {
                actor: snapshot.id,
                kind: snapshot.kind,
                at: snapshot.position,
            });
        }
    }
}
