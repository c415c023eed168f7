//! Board representation for Gomoku

pub mod bitboard;
pub mod board;


use serde::{Deserialize, Serialize};

use crate::error::GameError;

// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Largest supported board side. Bitboard indices use this as the row stride
/// so both board sizes share one representation.
pub const MAX_BOARD_SIZE: usize = 19;
pub const TOTAL_CELLS: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE; // 361

/// Direction vectors for line checking, in scan order.
pub const DIRECTIONS: [(i32, i32); 4] = [
    (1, 0),  // Vertical
    (0, 1),  // Horizontal
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Supported board sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum BoardSize {
    Fifteen,
    Nineteen,
}

impl BoardSize {
    /// Side length in cells
    #[inline]
    pub fn side(self) -> usize {
        match self {
            BoardSize::Fifteen => 15,
            BoardSize::Nineteen => 19,
        }
    }

    /// Number of cells on the board
    #[inline]
    pub fn cells(self) -> usize {
        self.side() * self.side()
    }

    /// Centre cell (`N/2`, `N/2`)
    #[inline]
    pub fn center(self) -> Pos {
        let mid = (self.side() / 2) as u8;
        Pos::new(mid, mid)
    }

    /// Check signed coordinates against this board
    #[inline]
    pub fn contains(self, row: i32, col: i32) -> bool {
        let n = self.side() as i32;
        row >= 0 && row < n && col >= 0 && col < n
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = GameError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        match size {
            15 => Ok(BoardSize::Fifteen),
            19 => Ok(BoardSize::Nineteen),
            _ => Err(GameError::InvalidConfiguration { size }),
        }
    }
}

impl From<BoardSize> for usize {
    fn from(size: BoardSize) -> usize {
        size.side()
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0}x{0}", self.side())
    }
}

/// Stone colors. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

impl std::str::FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "b" | "x" => Ok(Player::Black),
            "white" | "w" | "o" => Ok(Player::White),
            other => Err(format!("unknown player '{other}'")),
        }
    }
}

/// Contents of a single intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    #[inline]
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(p) => Some(p),
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < MAX_BOARD_SIZE && (col as usize) < MAX_BOARD_SIZE);
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * MAX_BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / MAX_BOARD_SIZE) as u8,
            col: (idx % MAX_BOARD_SIZE) as u8,
        }
    }

    /// Step `k` cells along `(dr, dc)`, returning `None` if it leaves the board.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, k: i32, size: BoardSize) -> Option<Pos> {
        let r = self.row as i32 + dr * k;
        let c = self.col as i32 + dc * k;
        size.contains(r, c).then(|| Pos::new(r as u8, c as u8))
    }

    /// Chebyshev distance between two cells
    #[inline]
    pub fn chebyshev(self, other: Pos) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
