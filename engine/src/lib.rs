#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn engine that drives the meadow through ordered rules.
//!
//! A [`Simulation`] owns the [`Grid`] together with two ordered rule lists.
//! Initialisation rules run exactly once before the first turn. Turn rules run
//! in registration order on every call to [`Simulation::next_turn`] and share a
//! single event buffer, so later rules observe the effects of earlier ones.

use std::fmt;

use meadow_core::Event;
use meadow_world::Grid;

/// Procedure applied to the grid that may append records to the turn buffer.
pub trait Rule {
    /// Applies the rule to the grid, pushing any produced records onto `out`.
    fn apply(&mut self, grid: &mut Grid, out: &mut Vec<Event>);
}

impl<F> Rule for F
where
    F: FnMut(&mut Grid, &mut Vec<Event>),
{
    fn apply(&mut self, grid: &mut Grid, out: &mut Vec<Event>) {
        self(grid, out);
    }
}

/// Outcome of a single executed turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// Turn number, starting at 1 for the first executed turn.
    pub turn: u64,
    /// Records appended by the rules, in the order they were produced.
    pub events: Vec<Event>,
    /// Textual render of the grid after every rule ran.
    pub render: String,
    /// Number of entities registered on the grid after every rule ran.
    pub entity_count: usize,
}

/// Owner of the grid, the turn counter and the registered rules.
pub struct Simulation {
    grid: Grid,
    turn: u64,
    running: bool,
    initialised: bool,
    init_rules: Vec<Box<dyn Rule>>,
    turn_rules: Vec<Box<dyn Rule>>,
}

impl Simulation {
    /// Creates a paused simulation around the provided grid.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            turn: 0,
            running: false,
            initialised: false,
            init_rules: Vec::new(),
            turn_rules: Vec::new(),
        }
    }

    /// Registers a rule that runs once before the first turn.
    pub fn add_init_rule<R>(&mut self, rule: R)
    where
        R: Rule + 'static,
    {
        self.init_rules.push(Box::new(rule));
    }

    /// Registers a rule that runs on every turn after the previously registered ones.
    pub fn add_turn_rule<R>(&mut self, rule: R)
    where
        R: Rule + 'static,
    {
        self.turn_rules.push(Box::new(rule));
    }

    /// Marks the simulation as running and executes pending initialisation rules.
    ///
    /// Returns the records produced by the initialisation rules. Calling `start`
    /// again after a pause does not rerun them.
    pub fn start(&mut self) -> Vec<Event> {
        self.running = true;
        tracing::info!(turn = self.turn, "simulation started");
        self.run_init_rules()
    }

    /// Marks the simulation as paused.
    pub fn pause(&mut self) {
        self.running = false;
        tracing::info!(turn = self.turn, "simulation paused");
    }

    /// Reports whether the simulation is currently running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Executes one turn and returns its report.
    ///
    /// Initialisation rules that have not run yet are executed first and their
    /// records lead the returned buffer.
    pub fn next_turn(&mut self) -> TurnReport {
        let mut events = self.run_init_rules();
        self.turn += 1;

        for rule in &mut self.turn_rules {
            rule.apply(&mut self.grid, &mut events);
        }

        let report = TurnReport {
            turn: self.turn,
            events,
            render: self.grid.render(),
            entity_count: self.grid.entity_count(),
        };
        tracing::debug!(
            turn = report.turn,
            events = report.events.len(),
            entities = report.entity_count,
            "turn completed"
        );
        report
    }

    /// Number of turns executed so far.
    #[must_use]
    pub const fn turn(&self) -> u64 {
        self.turn
    }

    /// Read-only access to the simulated grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the simulated grid.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    fn run_init_rules(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.initialised {
            return events;
        }
        self.initialised = true;

        for rule in &mut self.init_rules {
            rule.apply(&mut self.grid, &mut events);
        }
        tracing::info!(
            rules = self.init_rules.len(),
            entities = self.grid.entity_count(),
            "world initialised"
        );
        events
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("turn", &self.turn)
            .field("running", &self.running)
            .field("initialised", &self.initialised)
            .field("init_rules", &self.init_rules.len())
            .field("turn_rules", &self.turn_rules.len())
            .field("entities", &self.grid.entity_count())
            .finish()
    }
}
