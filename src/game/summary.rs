//! End-of-session statistics.

use serde::{Deserialize, Serialize};

use crate::game::GameState;

/// What happened during one game, derived from the move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Seed the board was generated from (null for explicit layouts).
    pub seed: Option<u64>,
    /// Board width.
    pub width: u16,
    /// Board height.
    pub height: u16,
    /// Number of bombs on the board.
    pub bombs: u32,
    /// Current or final state.
    pub outcome: GameState,
    /// Moves made, including ones stopped by an edge.
    pub moves: u32,
    /// Distinct cells stood on, entrance included.
    pub cells_visited: u32,
    /// Whether the compass was picked up.
    pub compass_collected: bool,
}

impl GameSummary {
    /// Fraction of the board the player has stood on (0.0-1.0).
    #[must_use]
    pub fn coverage(&self) -> f64 {
        if self.width == 0 || self.height == 0 {
            return 0.0;
        }
        f64::from(self.cells_visited) / (f64::from(self.width) * f64::from(self.height))
    }
}
