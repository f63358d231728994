#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use color::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use input::*;
pub use lines::*;
pub use notify::*;
pub use path::*;
pub use types::*;

mod board;
mod color;
mod engine;
mod error;
mod generator;
mod input;
mod lines;
mod notify;
mod path;
mod types;

/// Side length of the classic board.
pub const BOARD_SIZE: Coord = 9;

/// Balls spawned after every move that does not clear a line.
pub const BATCH_SIZE: usize = 3;

/// Shortest run that gets cleared.
pub const MIN_RUN: usize = 5;

/// How long the path of a moved ball stays visible.
pub const MOVE_DELAY: Duration = Duration::from_millis(500);

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub batch_size: usize,
    pub min_run: usize,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, batch_size: usize, min_run: usize) -> Self {
        Self {
            size,
            batch_size,
            min_run,
        }
    }

    pub fn new((size_x, size_y): Coord2, batch_size: usize, min_run: usize) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let batch_size = batch_size.max(1);
        let min_run = min_run.max(2);
        Self::new_unchecked((size_x, size_y), batch_size, min_run)
    }

    pub const fn classic() -> Self {
        Self::new_unchecked((BOARD_SIZE, BOARD_SIZE), BATCH_SIZE, MIN_RUN)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// A batch has to fit with room to spare, otherwise the game would be over before it starts.
    pub fn validate(&self) -> Result<()> {
        let cells = self.total_cells();
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        if self.batch_size >= usize::from(cells) {
            return Err(GameError::InvalidConfig {
                batch_size: self.batch_size.try_into().unwrap_or(CellCount::MAX),
                cells,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_degenerate_values() {
        let config = GameConfig::new((0, 0), 0, 0);

        assert_eq!(config.size, (1, 1));
        assert_eq!(config.batch_size, 1);
        assert_eq!(config.min_run, 2);
    }

    #[test]
    fn validate_rejects_batch_that_cannot_fit() {
        assert_eq!(GameConfig::classic().validate(), Ok(()));
        assert_eq!(
            GameConfig::new((2, 2), 4, 5).validate(),
            Err(GameError::InvalidConfig {
                batch_size: 4,
                cells: 4
            })
        );
        assert_eq!(
            GameConfig::new_unchecked((0, 9), 3, 5).validate(),
            Err(GameError::InvalidBoardShape)
        );
    }
}
