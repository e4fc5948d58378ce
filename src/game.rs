//! Board engine for Delve.
//!
//! Implements the game rules:
//! - Grid of cells with entrance, exit, compass and hidden bombs
//! - Seeded, unique placement of special cells
//! - Clamped movement in four directions
//! - Orthogonal bomb counting, win/loss detection
//! - Invariant checks for tests and tooling

mod board;
mod cell;
mod invariants;
mod placement;
mod position;
mod rng;
mod summary;

pub use board::{Arrival, Board, BoardLayout, MoveOutcome};
pub use cell::{Cell, CellState, GameState};
pub use invariants::{check_invariants, InvariantViolation};
pub use position::{Direction, Position};
pub use rng::{clock_seed, GameRng};
pub use summary::GameSummary;
