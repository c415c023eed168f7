//! Five-in-a-row detection
//!
//! A win can only first appear through the cell just played, so the engine
//! checks the four lines through that cell instead of scanning the board.
//! The full-board scan is kept for verification in tests.

use crate::board::{Board, Player, Pos, DIRECTIONS};

/// Length of a winning run
pub const WIN_LENGTH: usize = 5;

/// Collect the contiguous run of `player` stones through `pos` along
/// `(dr, dc)`. The negative direction is walked first (prepending), then the
/// positive direction (appending), so the result is ordered from the
/// negative end.
///
/// `pos` itself is treated as belonging to `player` whether or not the
/// stone has been placed yet.
fn run_through(board: &Board, pos: Pos, dr: i32, dc: i32, player: Player) -> Vec<Pos> {
    let size = board.size();
    let mut line = vec![pos];

    let mut k = 1;
    while let Some(prev) = pos.offset(-dr, -dc, k, size) {
        if !board.is_player(prev, player) {
            break;
        }
        line.insert(0, prev);
        k += 1;
    }

    k = 1;
    while let Some(next) = pos.offset(dr, dc, k, size) {
        if !board.is_player(next, player) {
            break;
        }
        line.push(next);
        k += 1;
    }

    line
}

/// Length of the run through `pos` along one direction, without allocating.
#[inline]
pub(crate) fn run_length(board: &Board, pos: Pos, dr: i32, dc: i32, player: Player) -> usize {
    let size = board.size();
    let mut count = 1;
    for sign in [1, -1] {
        let mut k = 1;
        while let Some(p) = pos.offset(dr * sign, dc * sign, k, size) {
            if !board.is_player(p, player) {
                break;
            }
            count += 1;
            k += 1;
        }
    }
    count
}

/// Find the winning line through `pos` for `player`.
///
/// Directions are tried in [`DIRECTIONS`] order; the first with a run of
/// five or more wins. Overlong runs are truncated to their first five cells
/// in scan order.
pub fn find_five_line_at_pos(board: &Board, pos: Pos, player: Player) -> Option<[Pos; 5]> {
    for &(dr, dc) in &DIRECTIONS {
        let line = run_through(board, pos, dr, dc, player);
        if line.len() >= WIN_LENGTH {
            return Some([line[0], line[1], line[2], line[3], line[4]]);
        }
    }
    None
}

/// Fast five-in-a-row check at a specific position. No allocation.
///
/// Also answers "would placing here win?" for an empty cell, since `pos` is
/// counted regardless of its contents.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, player: Player) -> bool {
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| run_length(board, pos, dr, dc, player) >= WIN_LENGTH)
}

/// Scan every stone of `player` for a run of five. Used to cross-check the
/// incremental detector.
pub fn has_five_anywhere(board: &Board, player: Player) -> bool {
    board
        .stones(player)
        .iter_ones()
        .any(|pos| has_five_at_pos(board, pos, player))
}
