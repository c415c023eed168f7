//! Static evaluation for the minimax search
//!
//! Every five-cell window starting at every cell, in each of the four
//! directions, is scored for both sides with [`score_window`]. The position
//! value is the engine side's total minus the opponent's.
//!
//! A window without any of a side's stones scores 0 for that side, so only
//! windows reached from that side's stones are visited.

use crate::board::{Bitboard, Board, Player, Pos, DIRECTIONS};
use crate::game::{Game, GameStatus};
use crate::rules::WIN_LENGTH;

use super::patterns::{score_window, PatternScore};

/// Evaluate the game from the perspective of `player`.
///
/// Terminal positions score `±PatternScore::FIVE` (won/lost) or 0 (draw).
#[must_use]
pub fn evaluate(game: &Game, player: Player) -> i32 {
    match game.status() {
        GameStatus::Won { winner, .. } if winner == player => PatternScore::FIVE,
        GameStatus::Won { .. } => -PatternScore::FIVE,
        GameStatus::Draw => 0,
        GameStatus::InProgress => {
            let board = game.board();
            line_score(board, player) - line_score(board, player.opponent())
        }
    }
}

/// Sum of window scores for `player` over the whole board.
#[must_use]
pub fn line_score(board: &Board, player: Player) -> i32 {
    let size = board.size();
    // Window starts already scored, one set per direction
    let mut seen = [Bitboard::new(); 4];
    let mut total = 0;

    for stone in board.stones(player).iter_ones() {
        for (d, &(dr, dc)) in DIRECTIONS.iter().enumerate() {
            for k in 0..WIN_LENGTH as i32 {
                let Some(start) = stone.offset(-dr, -dc, k, size) else {
                    break;
                };
                if seen[d].get(start) {
                    continue;
                }
                seen[d].set(start);
                let (own, blocks) = window_counts(board, start, dr, dc, player);
                total += score_window(own, blocks);
            }
        }
    }
    total
}

/// Own stones and blocks (off-board or opponent cells) in the window of
/// five starting at `start` along `(dr, dc)`.
#[inline]
fn window_counts(board: &Board, start: Pos, dr: i32, dc: i32, player: Player) -> (u32, u32) {
    let size = board.size();
    let opponent = player.opponent();
    let mut own = 0;
    let mut blocks = 0;
    for k in 0..WIN_LENGTH as i32 {
        match start.offset(dr, dc, k, size) {
            None => blocks += 1,
            Some(p) if board.is_player(p, player) => own += 1,
            Some(p) if board.is_player(p, opponent) => blocks += 1,
            Some(_) => {}
        }
        if blocks >= 2 {
            break;
        }
    }
    (own, blocks)
}

/// Score of a single prospective move: for each direction, the contiguous
/// run through `pos` (with the stone hypothetically placed) scored by its
/// length and blocked ends. Summed over the four directions.
#[must_use]
pub fn move_score(board: &Board, pos: Pos, player: Player) -> i32 {
    let size = board.size();
    let mut total = 0;

    for &(dr, dc) in &DIRECTIONS {
        let mut count = 1u32;
        let mut blocks = 0u32;
        for sign in [1, -1] {
            let mut k = 1;
            loop {
                match pos.offset(dr * sign, dc * sign, k, size) {
                    Some(p) if board.is_player(p, player) => {
                        count += 1;
                        k += 1;
                    }
                    Some(p) if board.is_empty(p) => break,
                    _ => {
                        blocks += 1;
                        break;
                    }
                }
            }
        }

        total += if count as usize >= WIN_LENGTH {
            PatternScore::FIVE
        } else {
            score_window(count, blocks)
        };
    }

    total
}
