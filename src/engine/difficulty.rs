//! Difficulty tiers
//!
//! | Tier   | Depth | Randomization |
//! |--------|-------|---------------|
//! | Easy   | 1     | 30%           |
//! | Medium | 2     | 10%           |
//! | Hard   | 3     | 0%            |
//!
//! Randomization is the chance of replacing the searched move with one of
//! the top three candidates.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Minimax depth in plies
    pub fn depth(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Probability of substituting a lesser candidate for the searched move
    pub fn randomization(self) -> f64 {
        match self {
            Difficulty::Easy => 0.3,
            Difficulty::Medium => 0.1,
            Difficulty::Hard => 0.0,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy (1 ply, noisy)",
            Difficulty::Medium => "Medium (2 ply)",
            Difficulty::Hard => "Hard (3 ply, precise)",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
