//! Property-based tests for board generation, movement and rendering.
//!
//! Run with: cargo test --release prop_board

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use proptest::prelude::*;

use delve::game::check_invariants;
use delve::render::{render, render_with_state};
use delve::{Board, Direction, GameConfig, GameState, MoveOutcome, Position};

/// A valid config together with a seed.
fn board_strategy() -> impl Strategy<Value = (GameConfig, u64)> {
    (1u16..=20, 1u16..=20)
        .prop_filter("needs two cells", |&(w, h)| u32::from(w) * u32::from(h) >= 2)
        .prop_flat_map(|(w, h)| {
            let max_bombs = u32::from(w) * u32::from(h) - 2;
            (Just(w), Just(h), 0..=max_bombs, any::<u64>())
        })
        .prop_map(|(w, h, bombs, seed)| (GameConfig::new(w, h, bombs), seed))
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::North),
        Just(Direction::South),
        Just(Direction::East),
        Just(Direction::West),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Generated boards place every special cell in bounds and on its own cell.
    #[test]
    fn prop_specials_distinct_and_in_bounds((config, seed) in board_strategy()) {
        let board = Board::new(config, seed).unwrap();

        let mut seen = HashSet::new();
        prop_assert!(seen.insert(board.entrance()));
        prop_assert!(seen.insert(board.exit()));
        if let Some(compass) = board.compass() {
            prop_assert!(seen.insert(compass));
        }
        for &bomb in board.bombs() {
            prop_assert!(seen.insert(bomb));
        }
        for pos in &seen {
            prop_assert!(board.in_bounds(*pos));
        }
        prop_assert_eq!(board.bombs().len(), config.bombs as usize);
        prop_assert_eq!(board.player(), board.entrance());
        prop_assert!(check_invariants(&board).is_empty());
    }

    /// Same seed and config give the same board.
    #[test]
    fn prop_generation_deterministic((config, seed) in board_strategy()) {
        let a = Board::new(config, seed).unwrap();
        let b = Board::new(config, seed).unwrap();
        prop_assert_eq!(a.entrance(), b.entrance());
        prop_assert_eq!(a.exit(), b.exit());
        prop_assert_eq!(a.compass(), b.compass());
        prop_assert_eq!(a.bombs(), b.bombs());
    }

    /// The neighbour count matches a direct count of orthogonal bombs.
    #[test]
    fn prop_neighbour_count_matches(
        (config, seed) in board_strategy(),
        x in 0u16..22,
        y in 0u16..22,
    ) {
        let board = Board::new(config, seed).unwrap();
        let pos = Position::new(x, y);
        let bombs: HashSet<Position> = board.bombs().iter().copied().collect();

        let candidates = [
            (i32::from(x), i32::from(y) - 1),
            (i32::from(x), i32::from(y) + 1),
            (i32::from(x) - 1, i32::from(y)),
            (i32::from(x) + 1, i32::from(y)),
        ];
        let expected = candidates
            .iter()
            .filter(|&&(nx, ny)| nx >= 0 && ny >= 0)
            .filter(|&&(nx, ny)| {
                let n = Position::new(u16::try_from(nx).unwrap(), u16::try_from(ny).unwrap());
                bombs.contains(&n)
            })
            .count();

        prop_assert_eq!(usize::from(board.neighbour_bombs(pos)), expected);
    }

    /// Movement changes at most one coordinate by one and never leaves the grid.
    #[test]
    fn prop_moves_clamped(
        (config, seed) in board_strategy(),
        moves in prop::collection::vec(direction_strategy(), 0..100),
    ) {
        let mut board = Board::new(config, seed).unwrap();
        for direction in moves {
            let before = board.player();
            match board.move_player(direction) {
                MoveOutcome::Ignored => {
                    prop_assert!(!board.is_running());
                    prop_assert_eq!(board.player(), before);
                }
                MoveOutcome::Moved { to, clamped, .. } => {
                    prop_assert_eq!(to, board.player());
                    prop_assert!(board.in_bounds(to));
                    prop_assert!(before.distance(to) <= 1);
                    prop_assert_eq!(clamped, before == to);
                }
            }
            prop_assert!(check_invariants(&board).is_empty());
        }
    }

    /// Once a game ends it stays ended.
    #[test]
    fn prop_terminal_states_stick(
        (config, seed) in board_strategy(),
        moves in prop::collection::vec(direction_strategy(), 0..200),
    ) {
        let mut board = Board::new(config, seed).unwrap();
        let mut ended: Option<(GameState, Position)> = None;
        for direction in moves {
            board.move_player(direction);
            if let Some((state, pos)) = ended {
                prop_assert_eq!(board.state(), state);
                prop_assert_eq!(board.player(), pos);
            } else if board.state().is_terminal() {
                prop_assert!(board.player() == board.exit() || board.is_bomb(board.player()));
                ended = Some((board.state(), board.player()));
            }
        }
    }

    /// Running renders never reveal bombs or the exit; terminal renders do.
    #[test]
    fn prop_render_concealment(
        (config, seed) in board_strategy(),
        moves in prop::collection::vec(direction_strategy(), 0..50),
    ) {
        let mut board = Board::new(config, seed).unwrap();
        for direction in moves {
            if !board.is_running() {
                break;
            }
            board.move_player(direction);
        }

        let running = render_with_state(&board, GameState::Running);
        for (pos, _) in board.iter() {
            let glyph = running.get(pos).unwrap().glyph;
            prop_assert!(glyph != '$' && glyph != 'x');
        }

        let over = render_with_state(&board, GameState::Loss);
        prop_assert_eq!(over.get(board.exit()).unwrap().glyph, '$');
        for &bomb in board.bombs() {
            prop_assert_eq!(over.get(bomb).unwrap().glyph, 'x');
        }
    }

    /// Queries and renders do not change between moves.
    #[test]
    fn prop_queries_idempotent(
        (config, seed) in board_strategy(),
        moves in prop::collection::vec(direction_strategy(), 0..30),
    ) {
        let mut board = Board::new(config, seed).unwrap();
        for direction in moves {
            board.move_player(direction);
        }

        prop_assert_eq!(board.player_neighbour_bombs(), board.player_neighbour_bombs());
        prop_assert_eq!(board.distance_to_exit(), board.distance_to_exit());
        prop_assert_eq!(render(&board), render(&board));
        prop_assert_eq!(board.summary(), board.summary());
    }
}
