//! Error types for board construction and player input.

use std::fmt;

use crate::game::Position;

/// Errors raised while building a board.
///
/// No partially built board is ever returned alongside one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Width or height was zero.
    ZeroDimension {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
    /// The grid cannot hold the entrance, the exit and every bomb.
    InsufficientSpace {
        /// Number of cells on the grid.
        area: usize,
        /// Number of distinct cells the configuration needs.
        required: usize,
    },
    /// The grid has more cells than a board may hold.
    TooLarge {
        /// Number of cells on the grid.
        area: usize,
        /// Largest accepted number of cells.
        max: usize,
    },
    /// A unique position was requested after every cell was already taken.
    GridExhausted,
    /// A layout position lies outside the grid.
    OutOfBounds(Position),
    /// A layout assigns two special roles to the same cell.
    Overlap(Position),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::ZeroDimension { width, height } => {
                write!(f, "board dimensions must be positive, got {width}x{height}")
            }
            BoardError::InsufficientSpace { area, required } => write!(
                f,
                "board has {area} cells but {required} are needed for the entrance, exit and bombs"
            ),
            BoardError::TooLarge { area, max } => {
                write!(f, "board has {area} cells, at most {max} are supported")
            }
            BoardError::GridExhausted => write!(f, "no free cell left to place"),
            BoardError::OutOfBounds(pos) => write!(f, "position {pos} is outside the board"),
            BoardError::Overlap(pos) => write!(f, "position {pos} is assigned more than once"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Input that does not name one of the four directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid direction: {:?}", self.input)
    }
}

impl std::error::Error for ParseDirectionError {}
