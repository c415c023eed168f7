//! Gomoku rules engine with an alpha-beta computer opponent
//!
//! Five-in-a-row on a 15x15 or 19x19 board:
//! - Black moves first, turns alternate
//! - Five or more in a row (overlines count) wins
//! - A full board without a win is a draw
//! - No captures, no forbidden moves
//!
//! # Architecture
//!
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Win detection and candidate move generation
//! - [`game`]: The rules engine, with reversible moves and snapshots
//! - [`eval`]: Window-based static evaluation
//! - [`search`]: Minimax with alpha-beta pruning
//! - [`engine`]: Computer opponent integrating all components
//! - [`session`], [`config`], [`persistence`]: what a front end drives
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Difficulty, Game, Player};
//!
//! let mut game = Game::new(15).unwrap();
//! let mut engine = AIEngine::with_seed(Player::White, Difficulty::Medium, 1);
//!
//! game.apply_move(7, 7).unwrap();
//!
//! // Engine responds as White
//! if let Some(pos) = engine.get_move(&mut game) {
//!     game.apply_move(pos.row as usize, pos.col as usize).unwrap();
//!     println!("Engine plays at {pos}");
//! }
//! assert_eq!(game.move_count(), 2);
//! ```
//!
//! # Search Priority
//!
//! 1. Immediate winning move
//! 2. Block the opponent's immediate win
//! 3. Alpha-Beta search to the difficulty's depth
//! 4. Random cell near the centre

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod persistence;
pub mod rules;
pub mod search;
pub mod session;

// Re-export commonly used types for convenience
pub use board::{Board, BoardSize, Cell, Player, Pos};
pub use config::{GameConfig, GameMode};
pub use engine::{AIEngine, Difficulty, MoveExplanation, MoveKind, MoveResult, PositionAnalysis, SearchType};
pub use error::{GameError, GameResult, IllegalReason, StoreError};
pub use game::{Game, GameSnapshot, GameStatus, Move, MoveOutcome};
pub use persistence::{JsonFileStore, MemoryStore, SnapshotStore};
pub use session::Session;
