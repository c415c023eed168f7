//! Candidate move generation
//!
//! A pruning heuristic, not a legality filter: it narrows what search
//! considers to cells near existing stones.

use crate::board::{Board, Pos};

/// Empty cells within Chebyshev distance `radius` of any stone, in discovery
/// order (stones scanned row-major, each neighbourhood scanned row-major).
///
/// An empty board yields the 3x3 block around the centre.
#[must_use]
pub fn candidate_moves(board: &Board, radius: u8) -> Vec<Pos> {
    let size = board.size();

    if board.is_board_empty() {
        let center = size.center();
        return square_offsets(1)
            .filter_map(|(dr, dc)| center.offset(dr, dc, 1, size))
            .collect();
    }

    let mut moves = Vec::with_capacity(64);
    let mut seen = [false; crate::board::TOTAL_CELLS];

    for stone in board.occupied() {
        for (dr, dc) in square_offsets(radius) {
            let Some(pos) = stone.offset(dr, dc, 1, size) else {
                continue;
            };
            let idx = pos.to_index();
            if seen[idx] || !board.is_empty(pos) {
                continue;
            }
            seen[idx] = true;
            moves.push(pos);
        }
    }

    moves
}

/// Row-major offsets of the `(2r+1)^2` square around a cell, centre included.
fn square_offsets(radius: u8) -> impl Iterator<Item = (i32, i32)> {
    let r = i32::from(radius);
    (-r..=r).flat_map(move |dr| (-r..=r).map(move |dc| (dr, dc)))
}
