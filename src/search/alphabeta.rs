//! Minimax search with alpha-beta pruning
//!
//! The search explores variations in place: every trial move is played with
//! [`Game::apply_move`] and taken back with [`Game::undo_move`], so the game
//! handed in is returned in exactly its original state.
//!
//! # Example
//!
//! ```
//! use gomoku::game::Game;
//! use gomoku::search::Searcher;
//!
//! let mut game = Game::new(15).unwrap();
//! game.apply_move(7, 7).unwrap();
//!
//! let mut searcher = Searcher::new();
//! let side = game.turn();
//! let result = searcher.search(&mut game, side, 2).unwrap();
//! assert!(result.best_move.is_some());
//! assert_eq!(game.move_count(), 1);
//! ```

use crate::board::{Player, Pos};
use crate::error::GameResult;
use crate::eval::evaluate;
use crate::game::Game;

/// Infinity score for alpha-beta bounds
const INF: i32 = i32::MAX;

/// Search considers only empty cells this close to an existing stone.
pub const CANDIDATE_RADIUS: u8 = 2;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Minimax value from the searching player's point of view
    pub score: i32,
    /// Depth searched
    pub depth: u8,
    /// Total nodes visited
    pub nodes: u64,
}

/// Alpha-beta searcher.
///
/// Holds only per-search counters; the game itself is borrowed for the
/// duration of [`Searcher::search`].
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `depth` plies for the best move, scoring leaves for `player`.
    ///
    /// Layers where `player` is to move maximize; the others minimize. Ties
    /// keep the first move found in candidate order.
    ///
    /// A rules error from a trial move is returned as is, after every trial
    /// move above it has been taken back.
    pub fn search(&mut self, game: &mut Game, player: Player, depth: u8) -> GameResult<SearchResult> {
        self.nodes = 0;
        let maximizing = game.turn() == player;
        let (score, best_move) = self.minimax(game, player, depth, -INF, INF, maximizing)?;

        Ok(SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
        })
    }

    fn minimax(
        &mut self,
        game: &mut Game,
        player: Player,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> GameResult<(i32, Option<Pos>)> {
        self.nodes += 1;

        if depth == 0 || game.is_over() {
            return Ok((evaluate(game, player), None));
        }

        let moves = game.candidate_moves(CANDIDATE_RADIUS);
        if moves.is_empty() {
            return Ok((evaluate(game, player), None));
        }

        let mut best_move = None;
        let mut best_score = if maximizing { -INF } else { INF };

        for mov in moves {
            game.apply_move(usize::from(mov.row), usize::from(mov.col))?;
            let child = self.minimax(game, player, depth - 1, alpha, beta, !maximizing);
            game.undo_move()?;
            let (score, _) = child?;

            if maximizing {
                if score > best_score || best_move.is_none() {
                    best_score = score;
                    best_move = Some(mov);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score || best_move.is_none() {
                    best_score = score;
                    best_move = Some(mov);
                }
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                break;
            }
        }

        Ok((best_score, best_move))
    }
}
