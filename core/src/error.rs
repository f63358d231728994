use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Batch of {batch_size} balls cannot fit on a board of {cells} cells")]
    InvalidConfig { batch_size: CellCount, cells: CellCount },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Board still holds preview or trace cells")]
    UnsettledBoard,
    #[error("A move is still being processed")]
    Busy,
    #[error("No move is waiting to be completed")]
    NotComputing,
    #[error("Game was already started")]
    AlreadyStarted,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
