//! Board configuration.

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Default board width.
pub const DEFAULT_WIDTH: u16 = 12;

/// Default board height.
pub const DEFAULT_HEIGHT: u16 = 12;

/// Default number of bombs.
pub const DEFAULT_BOMBS: u32 = 12;

/// Cells every board needs besides its bombs: the entrance and the exit.
pub const MANDATORY_CELLS: usize = 2;

/// Largest number of cells a board may have (4096 x 4096).
pub const MAX_AREA: usize = 1 << 24;

/// Dimensions and bomb count for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of columns.
    pub width: u16,
    /// Number of rows.
    pub height: u16,
    /// Number of bombs to hide.
    pub bombs: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            bombs: DEFAULT_BOMBS,
        }
    }
}

impl GameConfig {
    /// Create a configuration.
    #[must_use]
    pub const fn new(width: u16, height: u16, bombs: u32) -> Self {
        Self {
            width,
            height,
            bombs,
        }
    }

    /// Number of cells on the grid.
    #[must_use]
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether a cell is left over for the compass once the entrance, exit and
    /// bombs are placed.
    #[must_use]
    pub const fn has_room_for_compass(&self) -> bool {
        self.area() > MANDATORY_CELLS + self.bombs as usize
    }

    /// Check that a board with this configuration can be built.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ZeroDimension`] for an empty grid,
    /// [`BoardError::TooLarge`] for a grid over [`MAX_AREA`] cells and
    /// [`BoardError::InsufficientSpace`] when the entrance, exit and bombs
    /// cannot all get a cell of their own.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.width == 0 || self.height == 0 {
            return Err(BoardError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.area() > MAX_AREA {
            return Err(BoardError::TooLarge {
                area: self.area(),
                max: MAX_AREA,
            });
        }

        let required = MANDATORY_CELLS + self.bombs as usize;
        if required > self.area() {
            return Err(BoardError::InsufficientSpace {
                area: self.area(),
                required,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config, GameConfig::new(12, 12, 12));
        assert!(config.validate().is_ok());
        assert!(config.has_room_for_compass());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            GameConfig::new(0, 5, 0).validate(),
            Err(BoardError::ZeroDimension {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn test_too_many_bombs_rejected() {
        assert_eq!(
            GameConfig::new(3, 3, 8).validate(),
            Err(BoardError::InsufficientSpace {
                area: 9,
                required: 10
            })
        );
        assert!(GameConfig::new(3, 3, 7).validate().is_ok());
    }

    #[test]
    fn test_huge_board_rejected() {
        assert_eq!(
            GameConfig::new(u16::MAX, u16::MAX, 0).validate(),
            Err(BoardError::TooLarge {
                area: 65_535 * 65_535,
                max: MAX_AREA,
            })
        );
        assert!(GameConfig::new(4096, 4096, 0).validate().is_ok());
        assert!(GameConfig::new(4097, 4096, 0).validate().is_err());
    }

    #[test]
    fn test_compass_room() {
        assert!(!GameConfig::new(1, 2, 0).has_room_for_compass());
        assert!(GameConfig::new(1, 3, 0).has_room_for_compass());
        assert!(!GameConfig::new(3, 3, 7).has_room_for_compass());
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::new(20, 10, 30);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
