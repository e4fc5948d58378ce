#![no_main]

//! Board generation and movement fuzzer.
//!
//! Builds a board from fuzzer-chosen dimensions, bomb count and seed, then
//! feeds it a move sequence mixing parsed text input and direct moves. After
//! every step the board must still satisfy its invariants.

use arbitrary::Arbitrary;
use delve::game::check_invariants;
use delve::render::render_frame;
use delve::{Board, Direction, GameConfig, MoveOutcome};
use libfuzzer_sys::fuzz_target;

/// One fuzzer-generated input.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzMove {
    /// Move by direction index.
    Step(u8),
    /// Move by free-form text.
    Text(String),
}

/// Structured input for a whole game.
#[derive(Arbitrary, Debug)]
struct GameInput {
    width: u8,
    height: u8,
    bombs: u16,
    seed: u64,
    moves: Vec<FuzzMove>,
}

fuzz_target!(|input: GameInput| {
    // Cap sizes to keep runs short
    let width = u16::from(input.width % 32);
    let height = u16::from(input.height % 32);
    let config = GameConfig::new(width, height, u32::from(input.bombs % 1024));

    let Ok(mut board) = Board::new(config, input.seed) else {
        assert!(config.validate().is_err());
        return;
    };
    assert!(check_invariants(&board).is_empty());

    for fuzz_move in input.moves.into_iter().take(512) {
        let was_running = board.is_running();
        let outcome = match fuzz_move {
            FuzzMove::Step(i) => board.move_player(Direction::ALL[usize::from(i % 4)]),
            FuzzMove::Text(text) => match board.apply_input(&text) {
                Ok(outcome) => outcome,
                Err(_) => continue,
            },
        };
        assert_eq!(outcome == MoveOutcome::Ignored, !was_running);

        let violations = check_invariants(&board);
        assert!(violations.is_empty(), "{violations:?}");
    }

    let _ = render_frame(&board);
});
