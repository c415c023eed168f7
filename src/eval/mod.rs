//! Evaluation module for Gomoku AI
//!
//! Contains:
//! - Window score table
//! - Static board evaluation for search leaves
//! - Single-move scoring used for move explanations and ranking

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, line_score, move_score};
pub use patterns::{score_window, PatternScore};
