//! Seeded simulation harness.
//!
//! Provides a pure function interface: `(seed, config) -> GameResult`.
//! Games are independent, so [`run_simulation`] fans them out over rayon and
//! merges per-thread [`SimulationStats`] with a fold/reduce.

mod strategy;

pub use strategy::{Cautious, RandomWalk, Strategy, StrategyKind};

use rayon::prelude::*;
use serde::Serialize;
use tracing::trace;

use crate::config::GameConfig;
use crate::error::BoardError;
use crate::game::{check_invariants, Board, GameState};

/// Mixed into the game seed so bot randomness is independent of placement.
const BOT_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Configuration for a batch of simulated games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Board configuration used for every game.
    pub game: GameConfig,
    /// Moves before a game is abandoned as a timeout.
    pub max_moves: u32,
    /// Which bot plays.
    pub strategy: StrategyKind,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            max_moves: 1000,
            strategy: StrategyKind::default(),
        }
    }
}

/// Final result of one simulated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// The seed the board was generated from.
    pub seed: u64,
    /// `Running` when the move limit was hit.
    pub outcome: GameState,
    /// Moves made.
    pub moves: u32,
    /// Whether the bot picked up the compass.
    pub compass_found: bool,
    /// Distinct cells stepped on.
    pub cells_visited: u32,
}

/// Play one game with a bot.
///
/// # Errors
///
/// Returns an error if the board cannot be generated from the config.
pub fn run_game(seed: u64, config: &SimulationConfig) -> Result<GameResult, BoardError> {
    let mut board = Board::new(config.game, seed)?;
    let mut bot = config.strategy.build(seed ^ BOT_SEED_SALT);

    while board.is_running() && board.history().len() < config.max_moves as usize {
        let direction = bot.choose(&board);
        let outcome = board.move_player(direction);
        trace!(seed, %direction, ?outcome, "bot move");
        debug_assert!(check_invariants(&board).is_empty(), "{:?}", check_invariants(&board));
    }

    let summary = board.summary();
    Ok(GameResult {
        seed,
        outcome: summary.outcome,
        moves: summary.moves,
        compass_found: summary.compass_collected,
        cells_visited: summary.cells_visited,
    })
}

/// Aggregated outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    /// Total games played.
    pub games_played: u64,
    /// Games that reached the exit.
    pub wins: u64,
    /// Games that hit a bomb.
    pub losses: u64,
    /// Games abandoned at the move limit.
    pub timeouts: u64,
    /// Games whose board could not be generated.
    pub errors: u64,
    /// Games where the compass was picked up.
    pub compass_found: u64,
    total_moves: u64,
    total_cells_visited: u64,
}

impl SimulationStats {
    /// Create empty stats.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            games_played: 0,
            wins: 0,
            losses: 0,
            timeouts: 0,
            errors: 0,
            compass_found: 0,
            total_moves: 0,
            total_cells_visited: 0,
        }
    }

    /// Add a game result to the stats.
    pub fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        match result.outcome {
            GameState::Win => self.wins += 1,
            GameState::Loss => self.losses += 1,
            GameState::Running => self.timeouts += 1,
        }
        if result.compass_found {
            self.compass_found += 1;
        }
        self.total_moves += u64::from(result.moves);
        self.total_cells_visited += u64::from(result.cells_visited);
    }

    /// Count a game that never started.
    pub const fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Fold another set of stats into this one.
    pub const fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.wins += other.wins;
        self.losses += other.losses;
        self.timeouts += other.timeouts;
        self.errors += other.errors;
        self.compass_found += other.compass_found;
        self.total_moves += other.total_moves;
        self.total_cells_visited += other.total_cells_visited;
    }

    /// Share of games won (0.0-1.0).
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        self.ratio(self.wins)
    }

    /// Share of games lost (0.0-1.0).
    #[must_use]
    pub fn loss_rate(&self) -> f64 {
        self.ratio(self.losses)
    }

    /// Share of games that timed out (0.0-1.0).
    #[must_use]
    pub fn timeout_rate(&self) -> f64 {
        self.ratio(self.timeouts)
    }

    /// Share of games where the compass was found (0.0-1.0).
    #[must_use]
    pub fn compass_rate(&self) -> f64 {
        self.ratio(self.compass_found)
    }

    /// Average moves per game.
    #[must_use]
    pub fn avg_moves(&self) -> f64 {
        self.ratio(self.total_moves)
    }

    /// Average distinct cells visited per game.
    #[must_use]
    pub fn avg_cells_visited(&self) -> f64 {
        self.ratio(self.total_cells_visited)
    }

    #[allow(clippy::cast_precision_loss)]
    fn ratio(&self, count: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        count as f64 / self.games_played as f64
    }
}

/// Run `games` games in parallel, seeding game `i` with `base_seed + i`.
#[must_use]
pub fn run_simulation(base_seed: u64, games: u64, config: &SimulationConfig) -> SimulationStats {
    (0..games)
        .into_par_iter()
        .fold(SimulationStats::new, |mut local, i| {
            match run_game(base_seed.wrapping_add(i), config) {
                Ok(result) => local.add_result(&result),
                Err(_) => local.add_error(),
            }
            local
        })
        .reduce(SimulationStats::new, |mut a, b| {
            a.merge(&b);
            a
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(strategy: StrategyKind) -> SimulationConfig {
        SimulationConfig {
            game: GameConfig::new(8, 8, 6),
            max_moves: 200,
            strategy,
        }
    }

    #[test]
    fn test_run_game_is_deterministic() {
        let config = config(StrategyKind::Cautious);
        for seed in 0..20 {
            assert_eq!(run_game(seed, &config).unwrap(), run_game(seed, &config).unwrap());
        }
    }

    #[test]
    fn test_run_game_respects_move_limit() {
        let config = SimulationConfig {
            max_moves: 3,
            ..config(StrategyKind::Random)
        };
        for seed in 0..20 {
            let result = run_game(seed, &config).unwrap();
            assert!(result.moves <= 3);
            if result.outcome == GameState::Running {
                assert_eq!(result.moves, 3);
            }
        }
    }

    #[test]
    fn test_run_game_rejects_bad_config() {
        let config = SimulationConfig {
            game: GameConfig::new(2, 2, 3),
            ..SimulationConfig::default()
        };
        assert!(matches!(
            run_game(0, &config),
            Err(BoardError::InsufficientSpace { .. })
        ));
    }

    #[test]
    fn test_stats_accumulate() {
        let mut stats = SimulationStats::new();
        stats.add_result(&GameResult {
            seed: 1,
            outcome: GameState::Win,
            moves: 10,
            compass_found: true,
            cells_visited: 8,
        });
        stats.add_result(&GameResult {
            seed: 2,
            outcome: GameState::Loss,
            moves: 4,
            compass_found: false,
            cells_visited: 4,
        });
        stats.add_error();

        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.errors, 1);
        assert!((stats.win_rate() - 0.5).abs() < 1e-9);
        assert!((stats.loss_rate() - 0.5).abs() < 1e-9);
        assert!((stats.compass_rate() - 0.5).abs() < 1e-9);
        assert!((stats.avg_moves() - 7.0).abs() < 1e-9);
        assert!((stats.avg_cells_visited() - 6.0).abs() < 1e-9);
        assert!(stats.timeout_rate().abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats_rates_are_zero() {
        let stats = SimulationStats::default();
        assert!(stats.win_rate().abs() < 1e-9);
        assert!(stats.avg_moves().abs() < 1e-9);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = config(StrategyKind::Cautious);
        let parallel = run_simulation(100, 64, &config);

        let mut sequential = SimulationStats::new();
        for i in 0..64 {
            sequential.add_result(&run_game(100 + i, &config).unwrap());
        }
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.wins + parallel.losses + parallel.timeouts, 64);
    }
}
