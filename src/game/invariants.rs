//! Board invariants - sanity checks that detect bugs.
//!
//! These should never trigger on a board built and moved through the public
//! API. Tests, the fuzzer and the simulation harness run them after moves.

use std::collections::HashSet;

use crate::game::{Board, CellState, GameState};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all board invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut report = |message: String| violations.push(InvariantViolation { message });

    // Special cells: in bounds and pairwise distinct
    let specials = [("entrance", board.entrance()), ("exit", board.exit())]
        .into_iter()
        .chain(board.compass().map(|pos| ("compass", pos)))
        .chain(board.bombs().iter().map(|&pos| ("bomb", pos)));

    let mut seen = HashSet::new();
    for (role, pos) in specials {
        if !board.in_bounds(pos) {
            report(format!("{role} at {pos} is outside the board"));
        }
        if !seen.insert(pos) {
            report(format!("{role} at {pos} shares its cell"));
        }
    }

    if !board.in_bounds(board.player()) {
        report(format!("player at {} is outside the board", board.player()));
    }

    // Stored states agree with the special positions
    for (pos, cell) in board.iter() {
        let expected = if pos == board.entrance() {
            Some(CellState::Entrance)
        } else if pos == board.exit() {
            Some(CellState::Exit)
        } else if board.is_bomb(pos) {
            Some(CellState::Bomb)
        } else if board.compass() == Some(pos) {
            Some(if board.has_compass() {
                CellState::Visited
            } else {
                CellState::VisibleObject
            })
        } else {
            None
        };

        match expected {
            Some(state) if cell.state != state => {
                report(format!("cell {pos} is {:?}, expected {state:?}", cell.state));
            }
            None if !matches!(cell.state, CellState::Empty | CellState::Visited) => {
                report(format!("plain cell {pos} is {:?}", cell.state));
            }
            _ => {}
        }

        if cell.state == CellState::Visited && cell.neighbouring_bombs != board.neighbour_bombs(pos)
        {
            report(format!(
                "visited cell {pos} remembers {} bombs, has {}",
                cell.neighbouring_bombs,
                board.neighbour_bombs(pos)
            ));
        }
    }

    // Game state agrees with where the player stands
    let player = board.player();
    let consistent = match board.state() {
        GameState::Win => player == board.exit(),
        GameState::Loss => board.is_bomb(player),
        GameState::Running => player != board.exit() && !board.is_bomb(player),
    };
    if !consistent {
        report(format!(
            "state {:?} with player at {player}",
            board.state()
        ));
    }

    violations
}
