//! Game recording and replay.
//!
//! Because board generation is fully determined by its seed, a recording
//! only needs:
//! - `seed: u64` - The seed the board was generated from
//! - `config: GameConfig` - Board dimensions and bomb count
//! - `moves: Vec<Direction>` - Every move the player made
//!
//! No board snapshots are stored. To view turn N, rebuild the board and
//! replay the first N moves.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GameConfig;
use crate::error::BoardError;
use crate::game::{Board, Direction, MoveOutcome};
use crate::render::render_frame;

/// Version written into every recording file.
pub const RECORDING_VERSION: u32 = 1;

/// Minimal recording - seed, config and moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// File format version.
    pub version: u32,
    /// Seed for board generation.
    pub seed: u64,
    /// Board configuration.
    pub config: GameConfig,
    /// Moves in the order they were made.
    pub moves: Vec<Direction>,
}

impl Recording {
    /// Start an empty recording for a new game.
    #[must_use]
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            version: RECORDING_VERSION,
            seed,
            config,
            moves: Vec::new(),
        }
    }

    /// Record one move.
    pub fn push(&mut self, direction: Direction) {
        self.moves.push(direction);
    }

    /// Save the recording as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        debug!(path = %path.display(), moves = self.moves.len(), "saved recording");
        Ok(())
    }

    /// Load a recording saved with [`Recording::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a recording, or
    /// was written by an unknown format version.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let file = File::open(path)?;
        let recording: Self = serde_json::from_reader(BufReader::new(file))?;
        if recording.version != RECORDING_VERSION {
            return Err(ReplayError::UnsupportedVersion(recording.version));
        }
        Ok(recording)
    }

    /// Rebuild the board and apply every recorded move.
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be generated from the config.
    pub fn play(&self) -> Result<Board, ReplayError> {
        let mut board = Board::new(self.config, self.seed)?;
        for &direction in &self.moves {
            board.move_player(direction);
        }
        Ok(board)
    }
}

/// Errors from saving, loading or stepping through recordings.
#[derive(Debug)]
pub enum ReplayError {
    /// Reading or writing the file failed.
    Io(io::Error),
    /// The file is not valid recording JSON.
    Format(serde_json::Error),
    /// The recording has a version this build does not understand.
    UnsupportedVersion(u32),
    /// The recorded config does not produce a board.
    Board(BoardError),
    /// Turn number out of bounds.
    TurnOutOfBounds {
        /// Requested turn.
        requested: usize,
        /// Last turn in the recording.
        max_turn: usize,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Recording I/O failed: {e}"),
            Self::Format(e) => write!(f, "Invalid recording: {e}"),
            Self::UnsupportedVersion(v) => {
                write!(f, "Unsupported recording version {v} (expected {RECORDING_VERSION})")
            }
            Self::Board(e) => write!(f, "Board generation failed: {e}"),
            Self::TurnOutOfBounds {
                requested,
                max_turn,
            } => write!(f, "Turn {requested} out of bounds (max: {max_turn})"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Format(e) => Some(e),
            Self::Board(e) => Some(e),
            Self::UnsupportedVersion(_) | Self::TurnOutOfBounds { .. } => None,
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e)
    }
}

impl From<BoardError> for ReplayError {
    fn from(e: BoardError) -> Self {
        Self::Board(e)
    }
}

/// Replay engine with time travel.
///
/// - **Forward**: apply the next recorded move
/// - **Backward**: rebuild and replay up to `turn - 1`
/// - **Jump to turn N**: rebuild and replay up to N
#[derive(Debug)]
pub struct ReplayEngine {
    recording: Recording,
    board: Board,
    turn: usize,
}

impl ReplayEngine {
    /// Create an engine positioned before the first move.
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be generated.
    pub fn new(recording: Recording) -> Result<Self, ReplayError> {
        let board = Board::new(recording.config, recording.seed)?;
        Ok(Self {
            recording,
            board,
            turn: 0,
        })
    }

    /// Get the recording being replayed.
    #[must_use]
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Number of moves applied so far.
    #[must_use]
    pub const fn turn(&self) -> usize {
        self.turn
    }

    /// Number of moves in the recording.
    #[must_use]
    pub fn total_turns(&self) -> usize {
        self.recording.moves.len()
    }

    /// Board after the current turn.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Whether there is nothing left to replay.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.turn >= self.total_turns() || !self.board.is_running()
    }

    /// Apply the next recorded move.
    ///
    /// # Errors
    ///
    /// Returns an error if every move has already been applied.
    pub fn step_forward(&mut self) -> Result<MoveOutcome, ReplayError> {
        let Some(&direction) = self.recording.moves.get(self.turn) else {
            return Err(ReplayError::TurnOutOfBounds {
                requested: self.turn + 1,
                max_turn: self.total_turns(),
            });
        };
        self.turn += 1;
        Ok(self.board.move_player(direction))
    }

    /// Go back one move.
    ///
    /// # Errors
    ///
    /// Returns an error at turn 0.
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        if self.turn == 0 {
            return Err(ReplayError::TurnOutOfBounds {
                requested: 0,
                max_turn: self.total_turns(),
            });
        }
        self.goto_turn(self.turn - 1)
    }

    /// Jump to the board after `target` moves.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` is past the end of the recording.
    pub fn goto_turn(&mut self, target: usize) -> Result<(), ReplayError> {
        if target > self.total_turns() {
            return Err(ReplayError::TurnOutOfBounds {
                requested: target,
                max_turn: self.total_turns(),
            });
        }

        if target < self.turn {
            self.board = Board::new(self.recording.config, self.recording.seed)?;
            self.turn = 0;
        }
        while self.turn < target {
            self.step_forward()?;
        }
        Ok(())
    }

    /// Render the current board as a text frame.
    #[must_use]
    pub fn render_frame(&self) -> String {
        render_frame(&self.board)
    }
}
