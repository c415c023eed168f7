//! Game rules for standard Gomoku
//!
//! - Five or more in a row (any of four directions) wins
//! - Full board without a five is a draw
//! - No captures, no forbidden moves

pub mod moves;
pub mod win;

// Re-exports for convenient access
pub use moves::candidate_moves;
pub use win::{find_five_line_at_pos, has_five_anywhere, has_five_at_pos, WIN_LENGTH};
