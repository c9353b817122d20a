use meadow_core::{Event, Position};
use meadow_engine::Simulation;
use meadow_rendering::{TextPresenter, INITIALISED_LINE, PAUSED_LINE};
use meadow_world::{Entity, Grid};

#[test]
fn full_session_transcript_follows_turn_layout() {
    let mut simulation = Simulation::new(Grid::new(2, 1));
    simulation.add_turn_rule(|grid: &mut Grid, out: &mut Vec<Event>| {
        let at = Position::new(1, 0);
        if grid.is_empty(at) {
            let _ = grid.add(Entity::grass(at)).expect("free cell");
            out.push(Event::GrassGrew { at });
        }
    });
    let presenter = TextPresenter::new();
    let mut transcript = Vec::new();

    presenter.write_banner(&mut transcript).expect("vector sink");
    let _ = simulation.start();
    presenter.write_initialised(&mut transcript).expect("vector sink");
    for _ in 0..2 {
        let report = simulation.next_turn();
        presenter
            .write_turn(&report, &mut transcript)
            .expect("vector sink");
    }
    simulation.pause();
    presenter.write_paused(&mut transcript).expect("vector sink");

    let text = String::from_utf8(transcript).expect("presenter writes utf-8");
    let expected = [
        "🚀 Simulation started!",
        "",
        INITIALISED_LINE,
        "",
        "====== TURN 1 ======",
        "▫️🌿",
        "",
        "📜 Events this turn:",
        "  • 🌱 new grass grew at (1, 0)",
        "Total entities: 1",
        "",
        "====== TURN 2 ======",
        "▫️🌿",
        "",
        "📜 Events this turn:",
        "  (nothing happened)",
        "Total entities: 1",
        PAUSED_LINE,
        "",
    ]
    .join("\n");
    assert_eq!(text, expected);
}
