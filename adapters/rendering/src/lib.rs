#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Textual presentation of meadow turns for terminal adapters.

use std::io::Write;

use anyhow::Result as AnyResult;
use meadow_core::WELCOME_BANNER;
use meadow_engine::TurnReport;

/// Line announcing that initialisation rules have finished.
pub const INITIALISED_LINE: &str = "✅ World initialised!";
/// Line announcing that the simulation was paused.
pub const PAUSED_LINE: &str = "⏸️ Simulation paused";
/// Placeholder printed when a turn produced no records.
pub const QUIET_TURN_LINE: &str = "(nothing happened)";

/// Writes turn reports as plain text to any [`Write`] sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextPresenter;

impl TextPresenter {
    /// Creates a new presenter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Writes the start banner.
    pub fn write_banner<W: Write>(&self, out: &mut W) -> AnyResult<()> {
        writeln!(out, "{WELCOME_BANNER}\n")?;
        Ok(())
    }

    /// Writes the line that follows the initialisation rules.
    pub fn write_initialised<W: Write>(&self, out: &mut W) -> AnyResult<()> {
        writeln!(out, "{INITIALISED_LINE}")?;
        Ok(())
    }

    /// Writes the header, grid render, records and entity total of a turn.
    pub fn write_turn<W: Write>(&self, report: &TurnReport, out: &mut W) -> AnyResult<()> {
        writeln!(out, "\n====== TURN {} ======", report.turn)?;
        writeln!(out, "{}", report.render)?;
        writeln!(out, "\n📜 Events this turn:")?;
        if report.events.is_empty() {
            writeln!(out, "  {QUIET_TURN_LINE}")?;
        } else {
            for event in &report.events {
                writeln!(out, "  • {event}")?;
            }
        }
        writeln!(out, "Total entities: {}", report.entity_count)?;
        out.flush()?;
        Ok(())
    }

    /// Writes the pause notice.
    pub fn write_paused<W: Write>(&self, out: &mut W) -> AnyResult<()> {
        writeln!(out, "{PAUSED_LINE}")?;
        Ok(())
    }
}
