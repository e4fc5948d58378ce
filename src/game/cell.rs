//! Cell states and game state.

use serde::{Deserialize, Serialize};

/// What occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Reserved for the player marker. Never stored on the grid.
    Player,
    /// The way out.
    Exit,
    /// Where the player started.
    Entrance,
    /// A hidden bomb.
    Bomb,
    /// A cell the player has walked over.
    Visited,
    /// The compass, visible until picked up.
    VisibleObject,
    /// Nothing here yet.
    Empty,
}

impl CellState {
    /// Whether walking onto this cell turns it into [`CellState::Visited`].
    ///
    /// Only empty cells do; every special cell keeps its state.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, CellState::Empty)
    }

    /// Whether this state is hidden from the player while the game runs.
    #[must_use]
    pub const fn is_concealed(self) -> bool {
        matches!(self, CellState::Exit | CellState::Bomb)
    }
}

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// What occupies the cell.
    pub state: CellState,
    /// Orthogonal bomb count. Only meaningful once the cell is visited.
    pub neighbouring_bombs: u8,
}

impl Cell {
    /// An empty cell.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(CellState::Empty)
    }

    /// A cell with the given state and no bomb count.
    #[must_use]
    pub const fn new(state: CellState) -> Self {
        Self {
            state,
            neighbouring_bombs: 0,
        }
    }

    /// Mark the cell visited and remember its bomb count.
    pub fn visit(&mut self, neighbouring_bombs: u8) {
        self.state = CellState::Visited;
        self.neighbouring_bombs = neighbouring_bombs;
    }
}

/// Overall progress of a game.
///
/// Once `Win` or `Loss` is reached the board never returns to `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// The player is still walking.
    Running,
    /// The player reached the exit.
    Win,
    /// The player stepped on a bomb.
    Loss,
}

impl GameState {
    /// Whether moves are still accepted.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, GameState::Running)
    }

    /// Whether the game has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !self.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_empty_becomes_visited() {
        assert!(CellState::Empty.is_empty());
        for state in [
            CellState::Player,
            CellState::Exit,
            CellState::Entrance,
            CellState::Bomb,
            CellState::Visited,
            CellState::VisibleObject,
        ] {
            assert!(!state.is_empty(), "{state:?} must not be treated as empty");
        }
    }

    #[test]
    fn test_cell_visit() {
        let mut cell = Cell::empty();
        cell.visit(3);
        assert_eq!(cell.state, CellState::Visited);
        assert_eq!(cell.neighbouring_bombs, 3);
    }

    #[test]
    fn test_game_state_terminal() {
        assert!(GameState::Running.is_running());
        assert!(GameState::Win.is_terminal());
        assert!(GameState::Loss.is_terminal());
    }
}
