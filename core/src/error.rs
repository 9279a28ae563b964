use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board size must be at least 1")]
    ZeroSize,
    #[error("Too many mines, requested {mines} but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Revealed cells cannot be flagged")]
    CellRevealed,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Snapshot does not describe a consistent game")]
    InvalidSnapshot,
}

/// Broad classes of [`GameError`], used by callers to decide how to recover.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid board size, mine count or restored snapshot, fatal to session creation.
    Configuration,
    /// Action coordinates outside the grid, the caller may ask again.
    OutOfBounds,
    /// Action not allowed in the current state, nothing was changed.
    InvalidTransition,
}

impl GameError {
    pub const fn kind(self) -> ErrorKind {
        use GameError::*;
        match self {
            ZeroSize => ErrorKind::Configuration,
            TooManyMines { .. } => ErrorKind::Configuration,
            OutOfBounds => ErrorKind::OutOfBounds,
            CellRevealed => ErrorKind::InvalidTransition,
            AlreadyEnded => ErrorKind::InvalidTransition,
            InvalidSnapshot => ErrorKind::Configuration,
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
