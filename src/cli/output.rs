//! Output formatting utilities for CLI.

use delve::GameState;
use delve::game::GameSummary;
use delve::render::BoardView;
use delve::simulate::{SimulationConfig, SimulationStats};
use serde::Serialize;
use std::fmt::Write;
use std::time::Duration;

fn outcome_label(outcome: GameState) -> &'static str {
    match outcome {
        GameState::Win => "won",
        GameState::Loss => "lost",
        GameState::Running => "abandoned",
    }
}

/// Format a game summary as human-readable text.
pub(super) fn format_summary_text(summary: &GameSummary) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Game {}", outcome_label(summary.outcome));
    if let Some(seed) = summary.seed {
        let _ = writeln!(output, "  Seed: {seed}");
    }
    let _ = writeln!(
        output,
        "  Board: {}x{}, {} bombs",
        summary.width, summary.height, summary.bombs
    );
    let _ = writeln!(output, "  Moves: {}", summary.moves);
    let _ = writeln!(
        output,
        "  Cells visited: {} ({:.1}%)",
        summary.cells_visited,
        summary.coverage() * 100.0
    );
    let _ = writeln!(
        output,
        "  Compass: {}",
        if summary.compass_collected { "found" } else { "not found" }
    );

    output
}

/// JSON-serializable replay frame.
#[derive(Debug, Serialize)]
pub(super) struct JsonReplayFrame<'a> {
    /// Moves applied so far.
    pub(super) turn: usize,
    /// Moves in the recording.
    pub(super) total_turns: usize,
    /// Rendered board.
    pub(super) board: &'a BoardView,
    /// Status lines shown under the board.
    pub(super) status: Vec<String>,
    /// Session summary at this turn.
    pub(super) summary: GameSummary,
}

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulationResult {
    /// First game seed.
    base_seed: u64,
    /// Board width.
    width: u16,
    /// Board height.
    height: u16,
    /// Bombs per board.
    bombs: u32,
    /// Move limit per game.
    max_moves: u32,
    /// Raw counts.
    stats: SimulationStats,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Loss rate (0.0-1.0).
    loss_rate: f64,
    /// Timeout rate (0.0-1.0).
    timeout_rate: f64,
    /// Compass pickup rate (0.0-1.0).
    compass_rate: f64,
    /// Average moves per game.
    avg_moves: f64,
    /// Average distinct cells visited per game.
    avg_cells_visited: f64,
    /// Wall-clock duration in seconds.
    duration_secs: f64,
}

impl JsonSimulationResult {
    /// Create from stats and the config they were produced with.
    pub(super) fn from_stats(
        stats: &SimulationStats,
        config: &SimulationConfig,
        base_seed: u64,
        duration: Duration,
    ) -> Self {
        Self {
            base_seed,
            width: config.game.width,
            height: config.game.height,
            bombs: config.game.bombs,
            max_moves: config.max_moves,
            stats: *stats,
            win_rate: stats.win_rate(),
            loss_rate: stats.loss_rate(),
            timeout_rate: stats.timeout_rate(),
            compass_rate: stats.compass_rate(),
            avg_moves: stats.avg_moves(),
            avg_cells_visited: stats.avg_cells_visited(),
            duration_secs: duration.as_secs_f64(),
        }
    }
}

/// Format simulation stats as human-readable text.
pub(super) fn format_simulation_text(
    stats: &SimulationStats,
    config: &SimulationConfig,
    base_seed: u64,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Simulation Results ({} games)", stats.games_played);
    output.push_str("========================================\n\n");

    let _ = writeln!(
        output,
        "Board: {}x{}, {} bombs, strategy {:?}, max {} moves, seeds from {base_seed}\n",
        config.game.width, config.game.height, config.game.bombs, config.strategy, config.max_moves
    );

    output.push_str("Outcomes:\n");
    let _ = writeln!(output, "  Wins:     {:>8} ({:.1}%)", stats.wins, stats.win_rate() * 100.0);
    let _ = writeln!(output, "  Losses:   {:>8} ({:.1}%)", stats.losses, stats.loss_rate() * 100.0);
    let _ = writeln!(
        output,
        "  Timeouts: {:>8} ({:.1}%)",
        stats.timeouts,
        stats.timeout_rate() * 100.0
    );
    if stats.errors > 0 {
        let _ = writeln!(output, "  Errors:   {:>8}", stats.errors);
    }

    output.push_str("\nPer game:\n");
    let _ = writeln!(output, "  Avg moves:         {:.1}", stats.avg_moves());
    let _ = writeln!(output, "  Avg cells visited: {:.1}", stats.avg_cells_visited());
    let _ = writeln!(output, "  Compass found:     {:.1}%", stats.compass_rate() * 100.0);

    output
}

/// Format simulation stats as CSV with a header row.
pub(super) fn format_simulation_csv(stats: &SimulationStats, config: &SimulationConfig) -> String {
    let mut output = String::from(
        "width,height,bombs,games,wins,losses,timeouts,errors,win_rate,avg_moves,compass_rate\n",
    );
    let _ = writeln!(
        output,
        "{},{},{},{},{},{},{},{},{:.4},{:.2},{:.4}",
        config.game.width,
        config.game.height,
        config.game.bombs,
        stats.games_played,
        stats.wins,
        stats.losses,
        stats.timeouts,
        stats.errors,
        stats.win_rate(),
        stats.avg_moves(),
        stats.compass_rate()
    );
    output
}
