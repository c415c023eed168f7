//! Computer opponent: move selection, hints, explanations
//!
//! Move selection follows a fixed priority:
//!
//! 1. **Immediate win**: a cell that completes five for the engine side
//! 2. **Immediate block**: a cell that would complete five for the opponent
//! 3. **Alpha-Beta**: minimax over candidate cells near existing stones
//! 4. **Fallback**: a random empty cell near the centre, then anywhere
//!
//! After step 3 the difficulty's randomization may swap the searched move
//! for one of the three best-looking candidates.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Difficulty, Game, Player};
//!
//! let mut game = Game::new(15).unwrap();
//! game.apply_move(7, 7).unwrap();
//!
//! let mut engine = AIEngine::with_seed(Player::White, Difficulty::Easy, 7);
//! let result = engine.select_move(&mut game);
//! let pos = result.best_move.unwrap();
//! assert!(game.is_legal(pos.row as usize, pos.col as usize));
//! ```

pub mod analysis;
pub mod difficulty;

use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::board::{Player, Pos};
use crate::error::GameResult;
use crate::eval::{move_score, PatternScore};
use crate::game::Game;
use crate::search::{SearchResult, Searcher, CANDIDATE_RADIUS};

pub use analysis::{Assessment, MoveExplanation, MoveKind, PositionAnalysis};
pub use difficulty::Difficulty;

/// Fallback picks come from this Chebyshev radius around the centre.
const FALLBACK_RADIUS: u8 = 3;

/// Randomized picks come from this many top-ranked candidates.
const RANDOM_POOL: usize = 3;

/// Which step of the selection priority produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Completes five for the engine side
    ImmediateWin,
    /// Occupies the opponent's winning cell
    Block,
    /// Regular alpha-beta search result
    AlphaBeta,
    /// Search result replaced by a random top candidate
    Randomized,
    /// No search result; random cell near the centre
    Fallback,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Evaluation score for the engine side
    pub score: i32,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn immediate_win(pos: Pos, start: Instant) -> Self {
        Self {
            best_move: Some(pos),
            score: PatternScore::FIVE,
            search_type: SearchType::ImmediateWin,
            time_ms: elapsed_ms(start),
            nodes: 0,
        }
    }

    #[inline]
    fn block(pos: Pos, start: Instant) -> Self {
        Self {
            best_move: Some(pos),
            score: 0,
            search_type: SearchType::Block,
            time_ms: elapsed_ms(start),
            nodes: 0,
        }
    }

    #[inline]
    fn from_alphabeta(result: &SearchResult, start: Instant) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            time_ms: elapsed_ms(start),
            nodes: result.nodes,
        }
    }

    #[inline]
    fn fallback(pos: Option<Pos>, start: Instant) -> Self {
        Self {
            best_move: pos,
            score: 0,
            search_type: SearchType::Fallback,
            time_ms: elapsed_ms(start),
            nodes: 0,
        }
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Computer opponent bound to one side of the board.
///
/// The engine never owns the game: every call borrows it, and any trial
/// moves made while searching are undone before the call returns.
pub struct AIEngine {
    searcher: Searcher,
    difficulty: Difficulty,
    engine_player: Player,
    rng: StdRng,
}

impl AIEngine {
    /// Engine playing `engine_player`, seeded from the OS.
    #[must_use]
    pub fn new(engine_player: Player, difficulty: Difficulty) -> Self {
        Self::with_rng(engine_player, difficulty, StdRng::from_os_rng())
    }

    /// Engine with a fixed seed, for reproducible games and tests.
    #[must_use]
    pub fn with_seed(engine_player: Player, difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(engine_player, difficulty, StdRng::seed_from_u64(seed))
    }

    fn with_rng(engine_player: Player, difficulty: Difficulty, rng: StdRng) -> Self {
        Self {
            searcher: Searcher::new(),
            difficulty,
            engine_player,
            rng,
        }
    }

    pub fn engine_player(&self) -> Player {
        self.engine_player
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Best move for the engine side, or `None` if there is nothing to play.
    #[must_use]
    pub fn get_move(&mut self, game: &mut Game) -> Option<Pos> {
        self.select_move(game).best_move
    }

    /// Choose a move for the engine side with search statistics.
    ///
    /// Callers must only ask on an unfinished game; a finished game yields
    /// `best_move: None`. The game is left exactly as it was passed in.
    #[must_use]
    pub fn select_move(&mut self, game: &mut Game) -> MoveResult {
        let start = Instant::now();
        let me = self.engine_player;

        if game.is_over() {
            warn!(status = ?game.status(), "move requested on a finished game");
            return MoveResult::fallback(None, start);
        }
        if game.turn() != me {
            warn!(engine = %me, turn = %game.turn(), "move requested out of turn");
        }

        // 1. Our own five
        if let Some(pos) = find_immediate_win(game, me) {
            debug!(%pos, "immediate win");
            return MoveResult::immediate_win(pos, start);
        }

        // 2. Opponent's five
        if let Some(pos) = find_immediate_win(game, me.opponent()) {
            debug!(%pos, "blocking opponent five");
            return MoveResult::block(pos, start);
        }

        // 3. Search
        let depth = self.difficulty.depth();
        let searched = match self.searcher.search(game, me, depth) {
            Ok(searched) => searched.best_move.map(|best| (searched, best)),
            Err(err) => {
                warn!(error = %err, "search failed, falling back");
                None
            }
        };
        if let Some((searched, best)) = searched {
            let mut result = MoveResult::from_alphabeta(&searched, start);
            if let Some(random) = self.maybe_randomize(game, best) {
                result.best_move = Some(random);
                result.search_type = SearchType::Randomized;
            }
            info!(
                pos = ?result.best_move,
                score = result.score,
                nodes = result.nodes,
                depth,
                search_type = ?result.search_type,
                time_ms = result.time_ms,
                "search finished"
            );
            return result;
        }

        // 4. Nothing from search
        let pos = self.fallback_move(game);
        debug!(pos = ?pos, "fallback move");
        MoveResult::fallback(pos, start)
    }

    /// Suggest a move for whichever side is to move.
    ///
    /// Temporarily plays as the side to move, then restores the engine side.
    #[must_use]
    pub fn hint(&mut self, game: &mut Game) -> MoveResult {
        let original = self.engine_player;
        self.engine_player = game.turn();
        let result = self.select_move(game);
        self.engine_player = original;
        result
    }

    /// With the difficulty's probability, pick one of the top candidates
    /// instead of the searched move.
    fn maybe_randomize(&mut self, game: &Game, best: Pos) -> Option<Pos> {
        let p = self.difficulty.randomization();
        if p <= 0.0 || !self.rng.random_bool(p) {
            return None;
        }
        let pool = ranked_candidates(game, self.engine_player);
        let pick = pool.iter().take(RANDOM_POOL).copied().collect::<Vec<_>>();
        let chosen = pick.choose(&mut self.rng).copied()?;
        if chosen != best {
            debug!(searched = %best, %chosen, "randomized move");
        }
        Some(chosen)
    }

    /// Random empty cell near the centre, else any empty cell.
    fn fallback_move(&mut self, game: &Game) -> Option<Pos> {
        let board = game.board();
        let center = board.size().center();
        let near: Vec<Pos> = board
            .empty_cells()
            .filter(|p| p.chebyshev(center) <= FALLBACK_RADIUS)
            .collect();
        if let Some(&pos) = near.choose(&mut self.rng) {
            return Some(pos);
        }
        let anywhere: Vec<Pos> = board.empty_cells().collect();
        anywhere.choose(&mut self.rng).copied()
    }

    /// Explain what playing `(row, col)` would do for the side to move.
    pub fn explain_move(
        &self,
        game: &Game,
        row: usize,
        col: usize,
    ) -> GameResult<MoveExplanation> {
        analysis::explain_move(game, row, col)
    }

    /// Qualitative assessment of the position for the side to move.
    #[must_use]
    pub fn analyze_position(&self, game: &Game) -> PositionAnalysis {
        analysis::analyze_position(game)
    }
}

/// First empty cell, row-major, where `player` would complete five.
pub fn find_immediate_win(game: &Game, player: Player) -> Option<Pos> {
    game.board()
        .empty_cells()
        .find(|&pos| game.would_complete_five(pos, player))
}

/// Candidate cells ordered by their single-move score for `player`, best
/// first. Equal scores keep generation order.
fn ranked_candidates(game: &Game, player: Player) -> Vec<Pos> {
    let board = game.board();
    let mut scored: Vec<(Pos, i32)> = game
        .candidate_moves(CANDIDATE_RADIUS)
        .into_iter()
        .map(|pos| (pos, move_score(board, pos, player)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(pos, _)| pos).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn game_from(size: usize, moves: &[(usize, usize)]) -> Game {
        let mut game = Game::new(size).unwrap();
        for &(r, c) in moves {
            game.apply_move(r, c).unwrap();
        }
        game
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        // Black has an open four on row 7; White has nothing
        let mut game = game_from(15, &[
            (7, 4), (0, 0), (7, 5), (0, 14), (7, 6), (14, 0), (7, 7), (14, 14),
        ]);
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut engine = AIEngine::with_seed(Player::Black, difficulty, 1);
            let result = engine.select_move(&mut game);
            assert_eq!(result.search_type, SearchType::ImmediateWin);
            assert_eq!(result.best_move, Some(Pos::new(7, 3)));
        }
    }

    #[test]
    fn test_engine_blocks_opponent_win() {
        // White has four on column 2, Black to move
        let mut game = game_from(15, &[
            (10, 10), (2, 2), (10, 12), (3, 2), (12, 12), (4, 2), (12, 10), (5, 2),
        ]);
        let mut engine = AIEngine::with_seed(Player::Black, Difficulty::Hard, 1);
        let result = engine.select_move(&mut game);
        assert_eq!(result.search_type, SearchType::Block);
        assert_eq!(result.best_move, Some(Pos::new(1, 2)));
    }

    #[test]
    fn test_engine_win_beats_block() {
        // Both sides have four; the engine should win rather than block
        let mut game = game_from(15, &[
            (7, 0), (9, 0), (7, 1), (9, 1), (7, 2), (9, 2), (7, 3), (9, 3),
        ]);
        let mut engine = AIEngine::with_seed(Player::Black, Difficulty::Medium, 3);
        let result = engine.select_move(&mut game);
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert_eq!(result.best_move, Some(Pos::new(7, 4)));
    }

    #[test]
    fn test_engine_opening_near_center() {
        let mut game = Game::new(19).unwrap();
        let mut engine = AIEngine::with_seed(Player::Black, Difficulty::Hard, 9);
        let result = engine.select_move(&mut game);
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        let pos = result.best_move.unwrap();
        assert!(pos.chebyshev(Pos::new(9, 9)) <= 1);
    }

    #[test]
    fn test_engine_leaves_game_untouched() {
        let mut game = game_from(15, &[(7, 7), (8, 8), (7, 8)]);
        let before = game.snapshot();
        let mut engine = AIEngine::with_seed(Player::White, Difficulty::Medium, 5);
        let _ = engine.select_move(&mut game);
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_engine_on_finished_game() {
        let mut game = game_from(15, &[
            (0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2), (0, 3), (1, 3), (0, 4),
        ]);
        let mut engine = AIEngine::with_seed(Player::White, Difficulty::Easy, 5);
        assert!(engine.select_move(&mut game).best_move.is_none());
    }

    #[test]
    fn test_hint_restores_engine_player() {
        let mut game = game_from(15, &[(7, 7)]);
        let mut engine = AIEngine::with_seed(Player::Black, Difficulty::Easy, 11);
        let result = engine.hint(&mut game);
        assert_eq!(engine.engine_player(), Player::Black);
        let pos = result.best_move.unwrap();
        assert_eq!(game.cell(pos.row as usize, pos.col as usize), Some(Cell::Empty));
    }

    #[test]
    fn test_hint_plays_for_side_to_move() {
        // White to move and White can win at (5, 4); Black engine must not block instead
        let mut game = game_from(15, &[
            (10, 10), (5, 0), (10, 12), (5, 1), (12, 12), (5, 2), (14, 0), (5, 3),
            (12, 8),
        ]);
        assert_eq!(game.turn(), Player::White);
        let mut engine = AIEngine::with_seed(Player::Black, Difficulty::Medium, 2);
        let result = engine.hint(&mut game);
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert_eq!(result.best_move, Some(Pos::new(5, 4)));
    }

    #[test]
    fn test_ranked_candidates_prefers_threats() {
        let game = game_from(15, &[(7, 5), (0, 0), (7, 6), (0, 14), (7, 7)]);
        let ranked = ranked_candidates(&game, Player::Black);
        let top = &ranked[..2];
        assert!(top.contains(&Pos::new(7, 4)));
        assert!(top.contains(&Pos::new(7, 8)));
    }

    #[test]
    fn test_randomized_move_from_top_three() {
        let game_moves = [(7, 5), (0, 0), (7, 6), (0, 14), (7, 7), (14, 0)];
        let base = game_from(15, &game_moves);
        let top: Vec<Pos> = ranked_candidates(&base, Player::Black)
            .into_iter()
            .take(RANDOM_POOL)
            .collect();

        // Easy randomizes 30% of the time; over many seeds some picks must be randomized
        let mut randomized = 0;
        for seed in 0..40 {
            let mut game = base.clone();
            let mut engine = AIEngine::with_seed(Player::Black, Difficulty::Easy, seed);
            let result = engine.select_move(&mut game);
            let pos = result.best_move.unwrap();
            assert!(game.is_legal(pos.row as usize, pos.col as usize));
            if result.search_type == SearchType::Randomized {
                randomized += 1;
                assert!(top.contains(&pos), "{pos} not in top candidates {top:?}");
            }
        }
        assert!(randomized > 0);
        assert!(randomized < 40);
    }

    #[test]
    fn test_hard_never_randomizes() {
        let base = game_from(15, &[(7, 7), (7, 8)]);
        for seed in 0..2 {
            let mut game = base.clone();
            let mut engine = AIEngine::with_seed(Player::Black, Difficulty::Hard, seed);
            let result = engine.select_move(&mut game);
            assert_eq!(result.search_type, SearchType::AlphaBeta);
        }
    }

    #[test]
    fn test_fallback_near_center() {
        let game = Game::new(15).unwrap();
        let mut engine = AIEngine::with_seed(Player::Black, Difficulty::Easy, 4);
        let pos = engine.fallback_move(&game).unwrap();
        assert!(pos.chebyshev(Pos::new(7, 7)) <= FALLBACK_RADIUS);
    }

    /// All 225 moves of a 15x15 game that never makes five: columns grouped
    /// in pairs, colouring flipped every row. Each side plays the cells
    /// matching `first` before its other cells.
    fn drawn_sequence(first: impl Fn(usize, usize) -> bool) -> Vec<(usize, usize)> {
        let mut blacks = Vec::new();
        let mut whites = Vec::new();
        for r in 0..15 {
            for c in 0..15 {
                if (c / 2 + r) % 2 == 0 {
                    blacks.push((r, c));
                } else {
                    whites.push((r, c));
                }
            }
        }
        blacks.sort_by_key(|&(r, c)| !first(r, c));
        whites.sort_by_key(|&(r, c)| !first(r, c));
        (0..225)
            .map(|i| if i % 2 == 0 { blacks[i / 2] } else { whites[i / 2] })
            .collect()
    }

    #[test]
    fn test_fallback_outside_full_center() {
        let in_block = |r: usize, c: usize| (4..=10).contains(&r) && (4..=10).contains(&c);
        let mut game = Game::new(15).unwrap();
        for (r, c) in drawn_sequence(in_block) {
            let block_full = (4..=10).all(|r| (4..=10).all(|c| game.cell(r, c) != Some(Cell::Empty)));
            if block_full {
                break;
            }
            game.apply_move(r, c).unwrap();
        }
        assert!(!game.is_over());

        let mut engine = AIEngine::with_seed(Player::Black, Difficulty::Easy, 4);
        for _ in 0..10 {
            let pos = engine.fallback_move(&game).unwrap();
            assert!(pos.chebyshev(Pos::new(7, 7)) > FALLBACK_RADIUS);
            assert!(game.is_legal(pos.row as usize, pos.col as usize));
        }
    }

    #[test]
    fn test_drawn_board_scores_zero_and_has_no_move() {
        let mut game = Game::new(15).unwrap();
        for (r, c) in drawn_sequence(|_, _| false) {
            game.apply_move(r, c).unwrap();
        }
        assert_eq!(game.status(), crate::game::GameStatus::Draw);
        assert_eq!(crate::eval::evaluate(&game, Player::Black), 0);
        assert_eq!(crate::eval::evaluate(&game, Player::White), 0);

        let mut engine = AIEngine::with_seed(game.turn(), Difficulty::Hard, 1);
        let result = engine.select_move(&mut game);
        assert!(result.best_move.is_none());
        assert_eq!(result.search_type, SearchType::Fallback);
        assert!(engine.fallback_move(&game).is_none());
    }

    #[test]
    fn test_crowded_board_still_gets_a_move() {
        let mut base = Game::new(15).unwrap();
        for (r, c) in drawn_sequence(|_, _| false).into_iter().take(220) {
            base.apply_move(r, c).unwrap();
        }
        assert!(!base.is_over());
        assert_eq!(base.board().empty_cells().count(), 5);

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            for seed in 0..4 {
                let mut game = base.clone();
                let before = game.snapshot();
                let mut engine = AIEngine::with_seed(game.turn(), difficulty, seed);
                let pos = engine.select_move(&mut game).best_move.unwrap();
                assert!(game.is_legal(pos.row as usize, pos.col as usize));
                assert_eq!(game.snapshot(), before);
            }
        }
    }

    #[test]
    fn test_find_immediate_win_row_major() {
        // Black four with both ends open: the lower-index end comes first
        let game = game_from(15, &[(4, 4), (0, 0), (4, 5), (0, 14), (4, 6), (14, 0), (4, 7)]);
        assert_eq!(find_immediate_win(&game, Player::Black), Some(Pos::new(4, 3)));
        assert_eq!(find_immediate_win(&game, Player::White), None);
    }
}
