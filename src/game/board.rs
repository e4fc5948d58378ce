//! The board: grid state, setup, movement and win/loss rules.

use std::collections::HashSet;

use tracing::{debug, info, trace};

use crate::config::{GameConfig, MAX_AREA};
use crate::error::{BoardError, ParseDirectionError};
use crate::game::placement::Placement;
use crate::game::{Cell, CellState, Direction, GameRng, GameState, GameSummary, Position};

/// Something the player ran into on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// Reached the exit; the game is won.
    Exit,
    /// Stepped on a bomb; the game is lost.
    Bomb,
    /// Picked up the compass.
    Compass,
}

/// Result of a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game had already ended; nothing changed.
    Ignored,
    /// The player moved (or bumped into an edge and stayed put).
    Moved {
        /// Where the player now stands.
        to: Position,
        /// Whether the move was stopped by the edge of the board.
        clamped: bool,
        /// What the player ran into, if anything.
        event: Option<Arrival>,
    },
}

/// An explicit placement of every special cell.
///
/// Lets callers build a known board instead of a random one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    /// Number of columns.
    pub width: u16,
    /// Number of rows.
    pub height: u16,
    /// Starting cell of the player.
    pub entrance: Position,
    /// Winning cell.
    pub exit: Position,
    /// Compass cell, if the board has one.
    pub compass: Option<Position>,
    /// Bomb cells.
    pub bombs: Vec<Position>,
}

/// The state of one game session.
#[derive(Debug, Clone)]
pub struct Board {
    /// Width of the board in cells.
    width: u16,
    /// Height of the board in cells.
    height: u16,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
    /// Current player position.
    player: Position,
    entrance: Position,
    exit: Position,
    compass: Option<Position>,
    /// Bombs in placement order.
    bombs: Vec<Position>,
    /// Same bombs, for lookups.
    bomb_set: HashSet<Position>,
    has_compass: bool,
    state: GameState,
    /// Every position the player arrived at, one entry per move.
    history: Vec<Position>,
    /// Seed the board was generated from. `None` for explicit layouts.
    seed: Option<u64>,
}

impl Board {
    /// Generate a random board from `config`, seeded with `seed`.
    ///
    /// The entrance is drawn first and its orthogonal neighbours are kept
    /// free of other special cells while the grid has room elsewhere. The
    /// compass is only placed when a cell is left over for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot fit on its grid.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, BoardError> {
        config.validate()?;

        let mut rng = GameRng::new(seed);
        let mut placement = Placement::new(config.width, config.height, &mut rng);

        let entrance = placement.draw()?;
        for neighbour in entrance.neighbours() {
            placement.reserve(neighbour);
        }

        let compass = if config.has_room_for_compass() {
            Some(placement.draw()?)
        } else {
            None
        };
        let exit = placement.draw()?;
        let bombs = (0..config.bombs)
            .map(|_| placement.draw())
            .collect::<Result<Vec<_>, _>>()?;

        let layout = BoardLayout {
            width: config.width,
            height: config.height,
            entrance,
            exit,
            compass,
            bombs,
        };

        let mut board = Self::assemble(layout);
        board.seed = Some(seed);

        debug!(
            seed,
            width = config.width,
            height = config.height,
            bombs = config.bombs,
            entrance = %entrance,
            "generated board"
        );

        Ok(board)
    }

    /// Build a board from an explicit layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty or too large, a position lies off
    /// the grid, or two special cells share a position.
    pub fn from_layout(layout: BoardLayout) -> Result<Self, BoardError> {
        if layout.width == 0 || layout.height == 0 {
            return Err(BoardError::ZeroDimension {
                width: layout.width,
                height: layout.height,
            });
        }
        let area = usize::from(layout.width) * usize::from(layout.height);
        if area > MAX_AREA {
            return Err(BoardError::TooLarge {
                area,
                max: MAX_AREA,
            });
        }

        let specials = [layout.entrance, layout.exit]
            .into_iter()
            .chain(layout.compass)
            .chain(layout.bombs.iter().copied());

        let mut seen = HashSet::new();
        for pos in specials {
            if pos.x >= layout.width || pos.y >= layout.height {
                return Err(BoardError::OutOfBounds(pos));
            }
            if !seen.insert(pos) {
                return Err(BoardError::Overlap(pos));
            }
        }

        Ok(Self::assemble(layout))
    }

    /// Lay out a validated layout on a fresh grid.
    fn assemble(layout: BoardLayout) -> Self {
        let width = usize::from(layout.width);
        let index = |pos: Position| usize::from(pos.y) * width + usize::from(pos.x);

        let mut cells = vec![Cell::empty(); width * usize::from(layout.height)];
        cells[index(layout.entrance)] = Cell::new(CellState::Entrance);
        if let Some(compass) = layout.compass {
            cells[index(compass)] = Cell::new(CellState::VisibleObject);
        }
        cells[index(layout.exit)] = Cell::new(CellState::Exit);
        for &bomb in &layout.bombs {
            cells[index(bomb)] = Cell::new(CellState::Bomb);
        }

        Self {
            width: layout.width,
            height: layout.height,
            cells,
            player: layout.entrance,
            entrance: layout.entrance,
            exit: layout.exit,
            compass: layout.compass,
            bomb_set: layout.bombs.iter().copied().collect(),
            bombs: layout.bombs,
            has_compass: false,
            state: GameState::Running,
            history: Vec::new(),
            seed: None,
        }
    }

    /// Get the width of the board.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the board.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The configuration this board satisfies.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn config(&self) -> GameConfig {
        GameConfig::new(self.width, self.height, self.bombs.len() as u32)
    }

    /// Seed the board was generated from, if it was generated.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Current player position.
    #[must_use]
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Where the player started.
    #[must_use]
    pub const fn entrance(&self) -> Position {
        self.entrance
    }

    /// The winning cell.
    #[must_use]
    pub const fn exit(&self) -> Position {
        self.exit
    }

    /// The compass cell, if the board has one.
    #[must_use]
    pub const fn compass(&self) -> Option<Position> {
        self.compass
    }

    /// Bomb positions in placement order.
    #[must_use]
    pub fn bombs(&self) -> &[Position] {
        &self.bombs
    }

    /// Whether the player has picked up the compass.
    #[must_use]
    pub const fn has_compass(&self) -> bool {
        self.has_compass
    }

    /// Current game state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Whether moves are still accepted.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Positions the player arrived at, one per move.
    #[must_use]
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Check if a position is on the board.
    #[must_use]
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(usize::from(pos.y) * usize::from(self.width) + usize::from(pos.x))
        } else {
            None
        }
    }

    /// Get the cell at a position.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|idx| &self.cells[idx])
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).map(|idx| &mut self.cells[idx])
    }

    /// Iterate over all positions and cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> {
        let width = usize::from(self.width);
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            #[allow(clippy::cast_possible_truncation)]
            let pos = Position::new((idx % width) as u16, (idx / width) as u16);
            (pos, cell)
        })
    }

    /// Whether a bomb sits at `pos`.
    #[must_use]
    pub fn is_bomb(&self, pos: Position) -> bool {
        self.bomb_set.contains(&pos)
    }

    /// Count the bombs among the four orthogonal neighbours of `pos`.
    ///
    /// Neighbours off the board never hold a bomb.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn neighbour_bombs(&self, pos: Position) -> u8 {
        pos.neighbours().filter(|n| self.is_bomb(*n)).count() as u8
    }

    /// Bomb count around the player.
    #[must_use]
    pub fn player_neighbour_bombs(&self) -> u8 {
        self.neighbour_bombs(self.player)
    }

    /// Manhattan distance from `pos` to the exit.
    ///
    /// Not gated on the compass; hiding it until pickup is up to the caller.
    #[must_use]
    pub const fn distance_to_exit_from(&self, pos: Position) -> u32 {
        self.exit.distance(pos)
    }

    /// Manhattan distance from the player to the exit.
    #[must_use]
    pub const fn distance_to_exit(&self) -> u32 {
        self.distance_to_exit_from(self.player)
    }

    /// Move the player one cell.
    ///
    /// Movement is clamped at the edges. Empty cells become visited and
    /// remember their bomb count. Arrival is then resolved in order: exit
    /// (win), bomb (loss), compass (pickup).
    ///
    /// Once the game is over the move is ignored. Callers are expected to
    /// check [`Board::is_running`] first.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        if self.state.is_terminal() {
            trace!(%direction, "move after game end ignored");
            return MoveOutcome::Ignored;
        }

        let to = self.player.step(direction, self.width, self.height);
        let clamped = to == self.player;
        self.player = to;

        let count = self.neighbour_bombs(to);
        if let Some(cell) = self.cell_mut(to) {
            if cell.state.is_empty() {
                cell.visit(count);
            }
        }
        self.history.push(to);

        let event = self.resolve_arrival();
        trace!(%direction, to = %to, clamped, ?event, "player moved");

        MoveOutcome::Moved { to, clamped, event }
    }

    /// Parse `input` as a direction and move.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the board untouched, if `input` is not a
    /// direction.
    pub fn apply_input(&mut self, input: &str) -> Result<MoveOutcome, ParseDirectionError> {
        let direction = input.parse::<Direction>()?;
        Ok(self.move_player(direction))
    }

    fn resolve_arrival(&mut self) -> Option<Arrival> {
        let pos = self.player;

        if pos == self.exit {
            self.state = GameState::Win;
            info!(moves = self.history.len(), "player reached the exit");
            return Some(Arrival::Exit);
        }

        if self.is_bomb(pos) {
            self.state = GameState::Loss;
            info!(moves = self.history.len(), at = %pos, "player hit a bomb");
            return Some(Arrival::Bomb);
        }

        if self.compass == Some(pos) {
            let first_pickup = !self.has_compass;
            self.has_compass = true;

            let count = self.neighbour_bombs(pos);
            if let Some(cell) = self.cell_mut(pos) {
                if cell.state == CellState::VisibleObject {
                    cell.visit(count);
                }
            }

            if first_pickup {
                debug!(at = %pos, "compass picked up");
                return Some(Arrival::Compass);
            }
        }

        None
    }

    /// Summarize the session so far.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn summary(&self) -> GameSummary {
        let mut visited: HashSet<Position> = self.history.iter().copied().collect();
        visited.insert(self.entrance);

        GameSummary {
            seed: self.seed,
            width: self.width,
            height: self.height,
            bombs: self.bombs.len() as u32,
            outcome: self.state,
            moves: self.history.len() as u32,
            cells_visited: visited.len() as u32,
            compass_collected: self.has_compass,
        }
    }
}
