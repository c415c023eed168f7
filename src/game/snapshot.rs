//! Full state export/import for persistence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::{BoardSize, Cell, Player, Pos};
use crate::error::{GameError, GameResult};

use super::{Game, GameStatus, Move};

/// Coarse status tag stored alongside the explicit winner and line fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    InProgress,
    Won,
    Draw,
}

/// Serializable picture of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board_size: BoardSize,
    pub grid: Vec<Vec<Cell>>,
    pub turn: Player,
    pub status: StatusKind,
    pub winner: Option<Player>,
    pub winning_line: Option<[Pos; 5]>,
    pub history: Vec<Move>,
    pub move_count: u32,
    pub started_at: DateTime<Utc>,
}

impl Game {
    /// Export the complete game state.
    pub fn snapshot(&self) -> GameSnapshot {
        let status = match self.status() {
            GameStatus::InProgress => StatusKind::InProgress,
            GameStatus::Won { .. } => StatusKind::Won,
            GameStatus::Draw => StatusKind::Draw,
        };
        GameSnapshot {
            board_size: self.size(),
            grid: self.board().to_grid(),
            turn: self.turn(),
            status,
            winner: self.winner(),
            winning_line: self.winning_line(),
            history: self.history().collect(),
            move_count: self.move_count(),
            started_at: self.started_at(),
        }
    }

    /// Rebuild a game from a snapshot.
    ///
    /// The history is replayed through the rules so the undo stack is intact,
    /// then every stored field is checked against the replayed state. Any
    /// disagreement is rejected rather than trusted.
    pub fn restore(snapshot: GameSnapshot) -> GameResult<Game> {
        let size = snapshot.board_size;
        let n = size.side();

        if snapshot.grid.len() != n || snapshot.grid.iter().any(|row| row.len() != n) {
            return Err(GameError::invalid_snapshot(format!(
                "grid is not {size}"
            )));
        }
        if snapshot.move_count as usize != snapshot.history.len() {
            return Err(GameError::invalid_snapshot(format!(
                "move count {} but {} moves recorded",
                snapshot.move_count,
                snapshot.history.len()
            )));
        }

        let mut game = Game::with_size(size);
        for (i, mv) in snapshot.history.iter().enumerate() {
            if mv.ply as usize != i + 1 || mv.player != game.turn() {
                return Err(GameError::invalid_snapshot(format!(
                    "history entry {} is out of sequence",
                    i + 1
                )));
            }
            game.apply_move(mv.pos.row as usize, mv.pos.col as usize)
                .map_err(|e| GameError::invalid_snapshot(format!("history replay failed: {e}")))?;
        }

        if game.board().to_grid() != snapshot.grid {
            return Err(GameError::invalid_snapshot("grid does not match move history"));
        }
        if game.turn() != snapshot.turn {
            return Err(GameError::invalid_snapshot("turn does not match move history"));
        }
        let replayed = game.snapshot();
        if replayed.status != snapshot.status
            || replayed.winner != snapshot.winner
            || replayed.winning_line != snapshot.winning_line
        {
            return Err(GameError::invalid_snapshot("status does not match move history"));
        }

        game.set_started_at(snapshot.started_at);
        Ok(game)
    }
}
