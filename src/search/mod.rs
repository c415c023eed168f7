//! Search module for Gomoku AI
//!
//! Contains the minimax searcher with alpha-beta pruning. Move ordering is
//! the candidate generation order; there is no transposition table.

pub mod alphabeta;

pub use alphabeta::{SearchResult, Searcher, CANDIDATE_RADIUS};
