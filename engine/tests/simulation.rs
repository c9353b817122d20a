use std::{cell::RefCell, rc::Rc};

use meadow_core::{Event, Position};
use meadow_engine::{Rule, Simulation};
use meadow_world::{Entity, Grid};

fn grew(x: i32, y: i32) -> Event {
    Event::GrassGrew {
        at: Position::new(x, y),
    }
}

#[test]
fn turn_rules_run_in_registration_order_with_a_shared_buffer() {
    let mut simulation = Simulation::new(Grid::new(3, 1));
    simulation.add_turn_rule(|grid: &mut Grid, out: &mut Vec<Event>| {
        let _ = grid
            .add(Entity::grass(Position::new(0, 0)))
            .expect("free cell");
        out.push(grew(0, 0));
    });
    simulation.add_turn_rule(|grid: &mut Grid, out: &mut Vec<Event>| {
        assert_eq!(out.len(), 1, "earlier records are visible to later rules");
        assert!(!grid.is_empty(Position::new(0, 0)));
        out.push(grew(2, 0));
    });

    let report = simulation.next_turn();

    assert_eq!(report.turn, 1);
    assert_eq!(report.events, vec![grew(0, 0), grew(2, 0)]);
    assert_eq!(report.entity_count, 1);
    assert_eq!(report.render, "🌿▫️▫️");
}

#[test]
fn init_rules_run_exactly_once() {
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    let mut simulation = Simulation::new(Grid::new(2, 2));
    simulation.add_init_rule(move |_: &mut Grid, out: &mut Vec<Event>| {
        *counter.borrow_mut() += 1;
        out.push(grew(1, 1));
    });

    let init_events = simulation.start();
    simulation.pause();
    let restarted = simulation.start();
    let report = simulation.next_turn();

    assert_eq!(*calls.borrow(), 1);
    assert_eq!(init_events, vec![grew(1, 1)]);
    assert!(restarted.is_empty());
    assert!(report.events.is_empty());
}

#[test]
fn next_turn_without_start_runs_pending_init_rules_first() {
    let mut simulation = Simulation::new(Grid::new(2, 2));
    simulation.add_init_rule(|_: &mut Grid, out: &mut Vec<Event>| out.push(grew(0, 0)));
    simulation.add_turn_rule(|_: &mut Grid, out: &mut Vec<Event>| out.push(grew(1, 0)));

    let first = simulation.next_turn();
    let second = simulation.next_turn();

    assert_eq!(first.events, vec![grew(0, 0), grew(1, 0)]);
    assert_eq!(second.events, vec![grew(1, 0)]);
    assert_eq!(second.turn, 2);
    assert_eq!(simulation.turn(), 2);
}

#[test]
fn start_and_pause_toggle_running_state() {
    let mut simulation = Simulation::new(Grid::new(1, 1));

    let _ = simulation.start();
    assert!(simulation.is_running());

    simulation.pause();
    assert!(!simulation.is_running());
}

#[test]
fn report_render_reflects_the_grid_after_all_rules() {
    let mut simulation = Simulation::new(Grid::new(2, 1));
    let _ = simulation
        .grid_mut()
        .add(Entity::herbivore(Position::new(0, 0)))
        .expect("free cell");
    simulation.add_turn_rule(|grid: &mut Grid, _: &mut Vec<Event>| {
        let id = grid.occupant(Position::new(0, 0)).expect("herbivore placed");
        assert!(grid.move_entity(id, Position::new(1, 0)));
    });

    let report = simulation.next_turn();

    assert_eq!(report.render, "▫️🐄");
    assert_eq!(report.render, simulation.grid().render());
    assert!(report.events.is_empty());
}

struct Counter {
    seen: u32,
}

impl Rule for Counter {
    fn apply(&mut self, _grid: &mut Grid, out: &mut Vec<Event>) {
        self.seen += 1;
        let x = i32::try_from(self.seen).expect("small counter");
        out.push(grew(x, 0));
    }
}

#[test]
fn stateful_rules_keep_their_state_between_turns() {
    let mut simulation = Simulation::new(Grid::new(4, 1));
    simulation.add_turn_rule(Counter { seen: 0 });

    let _ = simulation.next_turn();
    let report = simulation.next_turn();

    assert_eq!(report.events, vec![grew(2, 0)]);
}
