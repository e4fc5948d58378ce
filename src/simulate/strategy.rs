//! Bot strategies for simulated games.
//!
//! Bots only see what a human would: the rendered board (bombs and the exit
//! look like any other unexplored cell), the bomb count under the player and,
//! after the compass pickup, the distance to the exit.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::game::{Board, Direction, GameRng, Position};
use crate::render::{render, BoardView, HIDDEN_GLYPH};

/// Picks the next move for a board.
pub trait Strategy {
    /// Choose a direction to move in.
    fn choose(&mut self, board: &Board) -> Direction;
}

/// Which built-in strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum StrategyKind {
    /// Uniformly random moves.
    Random,
    /// Prefers cells it can prove are safe, then follows the compass.
    #[default]
    Cautious,
}

impl StrategyKind {
    /// Build a bot of this kind.
    #[must_use]
    pub fn build(self, seed: u64) -> Box<dyn Strategy + Send> {
        match self {
            StrategyKind::Random => Box::new(RandomWalk::new(seed)),
            StrategyKind::Cautious => Box::new(Cautious::new(seed)),
        }
    }
}

/// Walks in a uniformly random direction every turn.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    rng: GameRng,
}

impl RandomWalk {
    /// Create a random walker.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Strategy for RandomWalk {
    fn choose(&mut self, _board: &Board) -> Direction {
        Direction::ALL[self.rng.index(Direction::ALL.len())]
    }
}

/// Explores cells next to a visited zero first, never steps back onto known
/// ground while unexplored ground is adjacent, and homes in on the exit once
/// it carries the compass.
#[derive(Debug, Clone)]
pub struct Cautious {
    rng: GameRng,
}

impl Cautious {
    /// Create a cautious walker.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Whether `pos` is proven free of bombs from what the view shows.
    fn is_known_safe(view: &BoardView, pos: Position) -> bool {
        match view.get(pos) {
            Some(cell) if cell.glyph != HIDDEN_GLYPH => true,
            Some(_) => pos
                .neighbours()
                .any(|n| view.get(n).is_some_and(|cell| cell.glyph == '0')),
            None => false,
        }
    }

    fn pick(&mut self, options: &[(Direction, Position)], board: &Board) -> Option<Direction> {
        if options.is_empty() {
            return None;
        }
        if board.has_compass() {
            return options
                .iter()
                .min_by_key(|(_, pos)| board.distance_to_exit_from(*pos))
                .map(|(direction, _)| *direction);
        }
        self.rng.choose(options).map(|(direction, _)| *direction)
    }
}

impl Strategy for Cautious {
    fn choose(&mut self, board: &Board) -> Direction {
        let view = render(board);
        let here = board.player();

        let moves: Vec<(Direction, Position)> = Direction::ALL
            .iter()
            .map(|&direction| (direction, here.step(direction, board.width(), board.height())))
            .filter(|&(_, pos)| pos != here)
            .collect();

        let unexplored = |pos: Position| view.get(pos).is_some_and(|c| c.glyph == HIDDEN_GLYPH);

        let safe_new: Vec<_> = moves
            .iter()
            .copied()
            .filter(|&(_, pos)| unexplored(pos) && Self::is_known_safe(&view, pos))
            .collect();
        if let Some(direction) = self.pick(&safe_new, board) {
            return direction;
        }

        if board.has_compass() {
            let closer: Vec<_> = moves
                .iter()
                .copied()
                .filter(|&(_, pos)| board.distance_to_exit_from(pos) < board.distance_to_exit())
                .collect();
            if let Some(direction) = self.pick(&closer, board) {
                return direction;
            }
        }

        let risky: Vec<_> = moves.iter().copied().filter(|&(_, pos)| unexplored(pos)).collect();
        if let Some(direction) = self.pick(&risky, board) {
            return direction;
        }

        self.pick(&moves, board).unwrap_or(Direction::North)
    }
}
