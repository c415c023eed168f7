//! Rules engine: authoritative game state
//!
//! [`Game`] owns the board, the move history and the game status. Every
//! mutation goes through [`Game::apply_move`] and [`Game::undo_move`], which
//! form an exact inverse pair so search can explore variations in place.

pub mod snapshot;
pub mod state;

use serde::{Deserialize, Serialize};

use crate::board::{Player, Pos};

pub use snapshot::{GameSnapshot, StatusKind};
pub use state::Game;

/// A recorded move. `ply` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub pos: Pos,
    pub player: Player,
    pub ply: u32,
}

/// Game status. Terminal once `Won` or `Draw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won { winner: Player, line: [Pos; 5] },
    Draw,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::Won { winner, .. } => Some(*winner),
            _ => None,
        }
    }
}

/// What the presentation layer needs after an accepted move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub status: GameStatus,
    /// Side to move next. Unchanged from `mv.player` when the game ended.
    pub next_turn: Player,
    pub move_count: u32,
}
