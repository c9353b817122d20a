#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system that publishes per-turn population counts.

use meadow_core::{EntityKind, Event, StatsReport};
use meadow_world::Grid;

/// Pure analytics system that tallies the grid population and emits published reports.
#[derive(Debug, Default)]
pub struct Analytics {
    last_report: Option<StatsReport>,
}

impl Analytics {
    /// Creates a new analytics system without a published report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last analytics report published by the system, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&StatsReport> {
        self.last_report.as_ref()
    }

    /// Counts the entities currently registered on the grid and publishes the report.
    pub fn handle(&mut self, grid: &mut Grid, out: &mut Vec<Event>) {
        let report = tally(grid);
        tracing::debug!(
            total = report.total,
            herbivores = report.herbivores,
            predators = report.predators,
            grass = report.grass,
            "population tallied"
        );
        self.last_report = Some(report);
        out.push(Event::Statistics(report));
    }
}

/// Computes the population counts of the provided grid.
#[must_use]
pub fn tally(grid: &Grid) -> StatsReport {
    grid.entities()
        .iter()
        .fold(StatsReport::default(), |mut report, snapshot| {
            report.total += 1;
            match snapshot.kind {
                EntityKind::Herbivore => report.herbivores += 1,
                EntityKind::Predator => report.predators += 1,
                EntityKind::Grass => report.grass += 1,
                EntityKind::Rock | EntityKind::Tree => {}
            }
            report
        })
}
