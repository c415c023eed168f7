//! Error types for the rules engine and its collaborators
//!
//! All game errors are local and deterministic: they describe why a request
//! was refused so the caller can tell "cell occupied" from "game over".

use std::fmt;

/// Why a move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    OutOfBounds,
    Occupied,
    GameOver,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalReason::OutOfBounds => f.write_str("outside the board"),
            IllegalReason::Occupied => f.write_str("cell already occupied"),
            IllegalReason::GameOver => f.write_str("game is already over"),
        }
    }
}

/// Errors that can occur in game logic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Board size other than 15 or 19
    #[error("Invalid board size {size}: expected 15 or 19")]
    InvalidConfiguration { size: usize },

    /// Move refused by the rules
    #[error("Illegal move at ({row}, {col}): {reason}")]
    IllegalMove {
        row: usize,
        col: usize,
        reason: IllegalReason,
    },

    /// Undo requested with no recorded moves
    #[error("No moves to undo")]
    EmptyHistory,

    /// Snapshot does not describe a reachable game state
    #[error("Invalid snapshot: {message}")]
    InvalidSnapshot { message: String },
}

impl GameError {
    pub(crate) fn invalid_snapshot(message: impl Into<String>) -> Self {
        GameError::InvalidSnapshot {
            message: message.into(),
        }
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;

/// Errors raised by snapshot stores
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed save data: {0}")]
    Serde(#[from] serde_json::Error),
}
