//! Window scores for Gomoku evaluation
//!
//! A window is five consecutive cells in one direction. Its value depends on
//! how many of the five hold the scoring side's stones and whether anything
//! blocks it (an opponent stone or the board edge).

/// Score table, indexed by stone count.
pub struct PatternScore;

impl PatternScore {
    /// Five in a row, also the terminal score magnitude
    pub const FIVE: i32 = 10_000;
    pub const OPEN_FOUR: i32 = 5_000;
    pub const BLOCKED_FOUR: i32 = 1_000;
    pub const OPEN_THREE: i32 = 500;
    pub const BLOCKED_THREE: i32 = 100;
    pub const OPEN_TWO: i32 = 50;
    pub const BLOCKED_TWO: i32 = 10;
    pub const OPEN_ONE: i32 = 5;
    pub const BLOCKED_ONE: i32 = 1;
}

/// Score one window from its own-stone count and its block count.
///
/// Two or more blocks make the window worthless. Counts above five are
/// treated as five.
#[inline]
#[must_use]
pub fn score_window(own: u32, blocks: u32) -> i32 {
    if blocks >= 2 {
        return 0;
    }
    let open = blocks == 0;
    match own {
        0 => 0,
        1 if open => PatternScore::OPEN_ONE,
        1 => PatternScore::BLOCKED_ONE,
        2 if open => PatternScore::OPEN_TWO,
        2 => PatternScore::BLOCKED_TWO,
        3 if open => PatternScore::OPEN_THREE,
        3 => PatternScore::BLOCKED_THREE,
        4 if open => PatternScore::OPEN_FOUR,
        4 => PatternScore::BLOCKED_FOUR,
        _ => PatternScore::FIVE,
    }
}
