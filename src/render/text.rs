//! Plain-text frames: the board plus the status the player is allowed to see.

use crate::game::{Board, GameState};
use crate::render::render;

/// Shown when the player reaches the exit.
pub const WIN_MESSAGE: &str = "You win! You cleared this dungeon!";

/// Shown when the player steps on a bomb.
pub const LOSS_MESSAGE: &str = "You lost. This one was a bomb.";

/// Status lines for the current turn.
///
/// The distance to the exit only appears once the compass is picked up.
#[must_use]
pub fn status_lines(board: &Board) -> Vec<String> {
    let mut lines = vec![format!("Bombs nearby: {}", board.player_neighbour_bombs())];

    if board.has_compass() {
        lines.push(format!("Distance to exit: {}", board.distance_to_exit()));
    }

    match board.state() {
        GameState::Win => lines.push(WIN_MESSAGE.to_string()),
        GameState::Loss => lines.push(LOSS_MESSAGE.to_string()),
        GameState::Running => {}
    }

    lines
}

/// Render a full frame: board, blank line, status lines.
///
/// Output format:
/// ```text
/// [>] .  .
///  .  ?  .
///
/// Bombs nearby: 0
/// ```
#[must_use]
pub fn render_frame(board: &Board) -> String {
    let mut output = render(board).to_string();
    output.push('\n');
    for line in status_lines(board) {
        output.push_str(&line);
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BoardLayout, Direction, Position};

    fn board() -> Board {
        Board::from_layout(BoardLayout {
            width: 3,
            height: 2,
            entrance: Position::new(0, 0),
            exit: Position::new(2, 1),
            compass: Some(Position::new(1, 0)),
            bombs: vec![Position::new(0, 1)],
        })
        .unwrap()
    }

    #[test]
    fn test_status_without_compass() {
        let lines = status_lines(&board());
        assert_eq!(lines, vec!["Bombs nearby: 1".to_string()]);
    }

    #[test]
    fn test_status_with_compass() {
        let mut board = board();
        board.move_player(Direction::East);
        let lines = status_lines(&board);
        assert_eq!(
            lines,
            vec![
                "Bombs nearby: 0".to_string(),
                "Distance to exit: 2".to_string()
            ]
        );
    }

    #[test]
    fn test_frame_on_win() {
        let mut board = board();
        board.move_player(Direction::East);
        board.move_player(Direction::East);
        board.move_player(Direction::South);
        assert_eq!(board.state(), GameState::Win);

        let frame = render_frame(&board);
        assert!(frame.starts_with(" >  0  0 \n x  . [$]\n\n"));
        assert!(frame.ends_with(&format!("{WIN_MESSAGE}\n")));
    }

    #[test]
    fn test_frame_on_loss() {
        let mut board = board();
        board.move_player(Direction::South);
        let frame = render_frame(&board);
        assert!(frame.contains("[x]"));
        assert!(frame.contains(LOSS_MESSAGE));
    }
}
