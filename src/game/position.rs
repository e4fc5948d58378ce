//! Grid positions and the four movement directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseDirectionError;

/// A cell on the board.
///
/// Ordered by column, then row, so sets of positions iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// The four orthogonal neighbours (north, south, west, east).
    ///
    /// Neighbours past the zero edge do not exist and are skipped. Neighbours
    /// past the far edge are still returned; they are simply never on the grid.
    pub fn neighbours(self) -> impl Iterator<Item = Position> {
        [
            self.y.checked_sub(1).map(|y| Position::new(self.x, y)),
            self.y.checked_add(1).map(|y| Position::new(self.x, y)),
            self.x.checked_sub(1).map(|x| Position::new(x, self.y)),
            self.x.checked_add(1).map(|x| Position::new(x, self.y)),
        ]
        .into_iter()
        .flatten()
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub const fn distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) as u32 + self.y.abs_diff(other.y) as u32
    }

    /// Step one cell in `direction`, clamped to a `width` x `height` grid.
    ///
    /// At an edge the position is returned unchanged.
    #[must_use]
    pub const fn step(self, direction: Direction, width: u16, height: u16) -> Position {
        match direction {
            Direction::North if self.y > 0 => Position::new(self.x, self.y - 1),
            Direction::South if self.y + 1 < height => Position::new(self.x, self.y + 1),
            Direction::West if self.x > 0 => Position::new(self.x - 1, self.y),
            Direction::East if self.x + 1 < width => Position::new(self.x + 1, self.y),
            _ => self,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single step on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards row 0.
    North,
    /// Towards the last row.
    South,
    /// Towards the last column.
    East,
    /// Towards column 0.
    West,
}

impl Direction {
    /// All directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Map a single key to a direction (WASD, case-insensitive).
    #[must_use]
    pub const fn from_key(key: char) -> Option<Direction> {
        match key.to_ascii_lowercase() {
            'w' => Some(Direction::North),
            's' => Some(Direction::South),
            'd' => Some(Direction::East),
            'a' => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(key), None) = (chars.next(), chars.next()) {
            if let Some(direction) = Direction::from_key(key) {
                return Ok(direction);
            }
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "n" | "north" | "up" => Ok(Direction::North),
            "south" | "down" => Ok(Direction::South),
            "e" | "east" | "right" => Ok(Direction::East),
            "west" | "left" => Ok(Direction::West),
            _ => Err(ParseDirectionError {
                input: s.to_string(),
            }),
        }
    }
}
