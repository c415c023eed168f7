//! Board structure: stone placement only, no rule knowledge

use super::bitboard::Bitboard;
use super::{BoardSize, Cell, Player, Pos};

/// Square grid of side 15 or 19
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: BoardSize,
    /// Black stones bitboard
    black: Bitboard,
    /// White stones bitboard
    white: Bitboard,
}

impl Board {
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.size.side()
    }

    /// Get cell contents at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        if self.black.get(pos) {
            Cell::Occupied(Player::Black)
        } else if self.white.get(pos) {
            Cell::Occupied(Player::White)
        } else {
            Cell::Empty
        }
    }

    /// Check whether `player` owns the stone at `pos`
    #[inline]
    pub fn is_player(&self, pos: Pos, player: Player) -> bool {
        self.stones(player).get(pos)
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone. Callers are responsible for legality.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, player: Player) {
        debug_assert!(self.is_empty(pos), "place_stone on occupied {pos}");
        self.stones_mut(player).set(pos);
    }

    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.black.clear(pos);
        self.white.clear(pos);
    }

    #[inline]
    pub fn stones(&self, player: Player) -> &Bitboard {
        match player {
            Player::Black => &self.black,
            Player::White => &self.white,
        }
    }

    #[inline]
    fn stones_mut(&mut self, player: Player) -> &mut Bitboard {
        match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        }
    }

    /// All occupied positions in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = Pos> {
        self.black.union(&self.white).iter_ones()
    }

    /// All empty positions in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let n = self.side() as u8;
        (0..n)
            .flat_map(move |r| (0..n).map(move |c| Pos::new(r, c)))
            .filter(|&p| self.is_empty(p))
    }

    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == self.size.cells()
    }

    /// Rows of cells, for snapshots and rendering
    pub fn to_grid(&self) -> Vec<Vec<Cell>> {
        let n = self.side() as u8;
        (0..n)
            .map(|r| (0..n).map(|c| self.get(Pos::new(r, c))).collect())
            .collect()
    }
}
