// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Delve: a seeded, Minesweeper-style dungeon crawl.
//!
//! The player starts on the entrance of a rectangular grid and has to reach
//! the hidden exit without stepping on a bomb. Every visited cell reports how
//! many of its four orthogonal neighbours hide a bomb, and a compass picked up
//! on the way reveals the distance to the exit.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI: play (TUI) / replay / sim    │
//! ├─────────────────────────────────────┤
//! │  Render  │  Replay  │  Simulation   │
//! ├─────────────────────────────────────┤
//! │         Board engine (game)         │
//! └─────────────────────────────────────┘
//! ```
//!
//! Boards are fully determined by a [`GameConfig`] and a `u64` seed:
//!
//! ```
//! use delve::{Board, Direction, GameConfig};
//!
//! let config = GameConfig::new(8, 8, 5);
//! let mut a = Board::new(config, 7).unwrap();
//! let b = Board::new(config, 7).unwrap();
//! assert_eq!(a.exit(), b.exit());
//!
//! a.move_player(Direction::North);
//! assert_eq!(a.history().len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod render;
pub mod replay;
pub mod simulate;

pub use config::GameConfig;
pub use error::{BoardError, ParseDirectionError};

// Re-export key game types at crate root for convenience
pub use game::{Board, BoardLayout, CellState, Direction, GameState, MoveOutcome, Position};
