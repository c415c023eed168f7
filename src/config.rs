//! Game configuration
//!
//! Defaults: 15x15 board, Medium difficulty, player vs engine with the
//! human playing Black. A JSON file may override any subset of fields.

use std::fmt;
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::board::{BoardSize, Player};
use crate::engine::Difficulty;
use crate::error::{GameResult, StoreError};

/// Who sits at the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Human against the engine
    #[default]
    #[value(name = "pve")]
    PvE,
    /// Two humans sharing the board
    #[value(name = "pvp")]
    PvP,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::PvE => f.write_str("player vs engine"),
            GameMode::PvP => f.write_str("player vs player"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    /// Human colour in PvE; ignored in PvP
    pub human: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 15,
            difficulty: Difficulty::default(),
            mode: GameMode::default(),
            human: Player::Black,
        }
    }
}

impl GameConfig {
    /// Read a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check the board size, returning it in validated form.
    pub fn validate(&self) -> GameResult<BoardSize> {
        BoardSize::try_from(self.board_size)
    }

    /// Side the engine plays, if any
    pub fn engine_player(&self) -> Option<Player> {
        match self.mode {
            GameMode::PvE => Some(self.human.opponent()),
            GameMode::PvP => None,
        }
    }
}
