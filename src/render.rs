//! Board rendering.
//!
//! Rendering is pure: a [`BoardView`] is a grid of glyphs computed from the
//! board and a game state, and the text renderers turn it into strings.
//! Nothing here touches a terminal.
//!
//! | State         | Running | Over  |
//! |---------------|---------|-------|
//! | Entrance      | `>`     | `>`   |
//! | Empty         | `.`     | `.`   |
//! | Exit          | `.`     | `$`   |
//! | Bomb          | `.`     | `x`   |
//! | Compass       | `?`     | `?`   |
//! | Visited       | count   | count |

mod text;

pub use text::{render_frame, status_lines, LOSS_MESSAGE, WIN_MESSAGE};

use std::fmt;

use serde::Serialize;

use crate::game::{Board, Cell, CellState, GameState, Position};

/// Glyph for a cell with nothing to show.
pub const HIDDEN_GLYPH: char = '.';

/// Map a cell to its glyph.
///
/// Bombs and the exit only show once the game is over.
#[must_use]
pub fn glyph(cell: &Cell, state: GameState) -> char {
    match cell.state {
        concealed if concealed.is_concealed() && state.is_running() => HIDDEN_GLYPH,
        CellState::Entrance => '>',
        CellState::Exit => '$',
        CellState::Bomb => 'x',
        CellState::VisibleObject => '?',
        CellState::Visited => {
            char::from_digit(u32::from(cell.neighbouring_bombs), 10).unwrap_or('+')
        }
        CellState::Player => '@',
        CellState::Empty => HIDDEN_GLYPH,
    }
}

/// One rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderedCell {
    /// Display character.
    pub glyph: char,
    /// Whether the player stands here.
    pub player: bool,
}

/// A rendered board: one glyph per cell, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    width: u16,
    height: u16,
    cells: Vec<RenderedCell>,
}

impl BoardView {
    /// Get the width of the view.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the view.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the rendered cell at a position.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<RenderedCell> {
        if pos.x < self.width && pos.y < self.height {
            self.cells
                .get(usize::from(pos.y) * usize::from(self.width) + usize::from(pos.x))
                .copied()
        } else {
            None
        }
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[RenderedCell]> {
        self.cells.chunks(usize::from(self.width).max(1))
    }
}

impl fmt::Display for BoardView {
    /// Player cell as `[c]`, every other cell as ` c `, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                if cell.player {
                    write!(f, "[{}]", cell.glyph)?;
                } else {
                    write!(f, " {} ", cell.glyph)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Render the board as it currently stands.
#[must_use]
pub fn render(board: &Board) -> BoardView {
    render_with_state(board, board.state())
}

/// Render the board as if the game were in `state`.
///
/// Passing a terminal state reveals bombs and the exit.
#[must_use]
pub fn render_with_state(board: &Board, state: GameState) -> BoardView {
    let player = board.player();
    let cells = board
        .iter()
        .map(|(pos, cell)| RenderedCell {
            glyph: glyph(cell, state),
            player: pos == player,
        })
        .collect();

    BoardView {
        width: board.width(),
        height: board.height(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BoardLayout, Direction};

    fn board() -> Board {
        Board::from_layout(BoardLayout {
            width: 4,
            height: 2,
            entrance: Position::new(0, 0),
            exit: Position::new(3, 1),
            compass: Some(Position::new(2, 0)),
            bombs: vec![Position::new(1, 1)],
        })
        .unwrap()
    }

    #[test]
    fn test_running_render_hides_bombs_and_exit() {
        let view = render(&board());
        assert_eq!(view.to_string(), "[>] .  ?  . \n .  .  .  . \n");
    }

    #[test]
    fn test_terminal_render_reveals() {
        let view = render_with_state(&board(), GameState::Loss);
        assert_eq!(view.to_string(), "[>] .  ?  . \n .  x  .  $ \n");
    }

    #[test]
    fn test_visited_shows_count() {
        let mut board = board();
        board.move_player(Direction::East);
        let view = render(&board);
        assert_eq!(
            view.get(Position::new(1, 0)),
            Some(RenderedCell {
                glyph: '1',
                player: true
            })
        );
        assert_eq!(view.to_string(), " > [1] ?  . \n .  .  .  . \n");
    }

    #[test]
    fn test_compass_becomes_visited() {
        let mut board = board();
        board.move_player(Direction::East);
        board.move_player(Direction::East);
        assert!(board.has_compass());
        let view = render(&board);
        assert_eq!(view.get(Position::new(2, 0)).unwrap().glyph, '0');
    }

    #[test]
    fn test_glyph_table() {
        let running = GameState::Running;
        let over = GameState::Win;
        assert_eq!(glyph(&Cell::new(CellState::Entrance), running), '>');
        assert_eq!(glyph(&Cell::new(CellState::Empty), over), '.');
        assert_eq!(glyph(&Cell::new(CellState::Exit), running), '.');
        assert_eq!(glyph(&Cell::new(CellState::Exit), over), '$');
        assert_eq!(glyph(&Cell::new(CellState::Bomb), running), '.');
        assert_eq!(glyph(&Cell::new(CellState::Bomb), over), 'x');
        assert_eq!(glyph(&Cell::new(CellState::VisibleObject), over), '?');

        let mut visited = Cell::empty();
        visited.visit(4);
        assert_eq!(glyph(&visited, running), '4');
    }

    #[test]
    fn test_only_concealed_states_hidden_while_running() {
        for state in [
            CellState::Player,
            CellState::Exit,
            CellState::Entrance,
            CellState::Bomb,
            CellState::Visited,
            CellState::VisibleObject,
        ] {
            let cell = Cell::new(state);
            let hidden = glyph(&cell, GameState::Running) == HIDDEN_GLYPH;
            assert_eq!(hidden, state.is_concealed(), "{state:?}");
            assert_ne!(glyph(&cell, GameState::Loss), HIDDEN_GLYPH, "{state:?}");
        }
    }

    #[test]
    fn test_view_dimensions() {
        let view = render(&board());
        assert_eq!(view.width(), 4);
        assert_eq!(view.height(), 2);
        assert_eq!(view.rows().count(), 2);
        assert!(view.get(Position::new(4, 0)).is_none());
    }
}
