//! Replay command implementation.

use super::output::{JsonReplayFrame, format_summary_text};
use super::{CliError, OutputFormat};
use delve::render::{render, status_lines};
use delve::replay::{Recording, ReplayEngine};
use std::path::PathBuf;

/// Execute the replay command.
///
/// Prints the board after `turn` moves, or after the last move.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or `turn` is past its
/// end.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn execute(
    recording_path: PathBuf,
    turn: Option<usize>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let recording = Recording::load(&recording_path).map_err(|e| {
        CliError::new(format!("Failed to load recording {}: {e}", recording_path.display()))
    })?;

    let mut engine = ReplayEngine::new(recording)?;
    let target = turn.unwrap_or_else(|| engine.total_turns());
    engine.goto_turn(target)?;

    match format {
        OutputFormat::Text => {
            println!(
                "Turn {}/{} (seed {})",
                engine.turn(),
                engine.total_turns(),
                engine.recording().seed
            );
            println!();
            print!("{}", engine.render_frame());
            println!();
            print!("{}", format_summary_text(&engine.board().summary()));
        }
        OutputFormat::Json => {
            let view = render(engine.board());
            let frame = JsonReplayFrame {
                turn: engine.turn(),
                total_turns: engine.total_turns(),
                board: &view,
                status: status_lines(engine.board()),
                summary: engine.board().summary(),
            };
            println!("{}", serde_json::to_string_pretty(&frame)?);
        }
    }

    Ok(())
}
