//! Game state with reversible moves

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::board::{Board, BoardSize, Cell, Player, Pos};
use crate::error::{GameError, GameResult, IllegalReason};
use crate::rules::{candidate_moves, find_five_line_at_pos, has_five_at_pos};

use super::{GameStatus, Move, MoveOutcome};

/// Everything `apply_move` changes besides the cell itself, captured so
/// `undo_move` can restore it in one step.
#[derive(Debug, Clone, Copy)]
struct MoveRecord {
    mv: Move,
    prev_turn: Player,
    prev_status: GameStatus,
}

/// The rules engine
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Player,
    status: GameStatus,
    history: Vec<MoveRecord>,
    started_at: DateTime<Utc>,
}

impl Game {
    /// Start a game on a `size` x `size` board. Only 15 and 19 are accepted.
    pub fn new(size: usize) -> GameResult<Self> {
        Ok(Self::with_size(BoardSize::try_from(size)?))
    }

    /// Start a game with an already validated size. Black moves first.
    pub fn with_size(size: BoardSize) -> Self {
        Self {
            board: Board::new(size),
            turn: Player::Black,
            status: GameStatus::InProgress,
            history: Vec::with_capacity(size.cells()),
            started_at: Utc::now(),
        }
    }

    #[inline]
    pub fn size(&self) -> BoardSize {
        self.board.size()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move
    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    pub fn winning_line(&self) -> Option<[Pos; 5]> {
        match self.status {
            GameStatus::Won { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Moves played so far, oldest first
    pub fn history(&self) -> impl ExactSizeIterator<Item = Move> + '_ {
        self.history.iter().map(|record| record.mv)
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|record| record.mv)
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub(crate) fn set_started_at(&mut self, at: DateTime<Utc>) {
        self.started_at = at;
    }

    /// Cell contents, or `None` outside the board
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.pos(row, col).map(|pos| self.board.get(pos))
    }

    fn pos(&self, row: usize, col: usize) -> Option<Pos> {
        let n = self.board.side();
        (row < n && col < n).then(|| Pos::new(row as u8, col as u8))
    }

    /// Resolve `(row, col)` to a position if a stone may be played there,
    /// or say why not.
    pub fn validate_move(&self, row: usize, col: usize) -> GameResult<Pos> {
        let illegal = |reason| GameError::IllegalMove { row, col, reason };
        let pos = self.pos(row, col).ok_or(illegal(IllegalReason::OutOfBounds))?;
        if self.status.is_terminal() {
            return Err(illegal(IllegalReason::GameOver));
        }
        if !self.board.is_empty(pos) {
            return Err(illegal(IllegalReason::Occupied));
        }
        Ok(pos)
    }

    /// True iff in bounds, empty, and the game is in progress.
    pub fn is_legal(&self, row: usize, col: usize) -> bool {
        self.validate_move(row, col).is_ok()
    }

    /// Play a stone for the side to move.
    ///
    /// Win and draw are evaluated only at the played cell. The turn passes
    /// to the opponent unless the move ended the game.
    pub fn apply_move(&mut self, row: usize, col: usize) -> GameResult<MoveOutcome> {
        let pos = self.validate_move(row, col)?;
        let player = self.turn;
        let mv = Move {
            pos,
            player,
            ply: self.move_count() + 1,
        };

        self.history.push(MoveRecord {
            mv,
            prev_turn: self.turn,
            prev_status: self.status,
        });
        self.board.place_stone(pos, player);

        if let Some(line) = find_five_line_at_pos(&self.board, pos, player) {
            self.status = GameStatus::Won {
                winner: player,
                line,
            };
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
        } else {
            self.turn = player.opponent();
        }

        trace!(ply = mv.ply, %player, %pos, "move applied");
        if self.status.is_terminal() {
            debug!(status = ?self.status, ply = mv.ply, "game finished");
        }

        Ok(MoveOutcome {
            mv,
            status: self.status,
            next_turn: self.turn,
            move_count: self.move_count(),
        })
    }

    /// Take back the most recent move.
    ///
    /// Restores the turn to the undone move's player and the status to what
    /// it was before that move. Moves are refused once the game is over, so
    /// on a finished game the top of the stack is always the move that
    /// finished it and undo returns the game to `InProgress`.
    pub fn undo_move(&mut self) -> GameResult<Move> {
        let record = self.history.pop().ok_or(GameError::EmptyHistory)?;
        self.board.remove_stone(record.mv.pos);
        self.turn = record.prev_turn;
        self.status = record.prev_status;
        trace!(ply = record.mv.ply, pos = %record.mv.pos, "move undone");
        Ok(record.mv)
    }

    /// Empty cells near existing stones; see [`candidate_moves`].
    pub fn candidate_moves(&self, radius: u8) -> Vec<Pos> {
        candidate_moves(&self.board, radius)
    }

    /// Would `player` complete five by playing the empty cell `pos`?
    /// Does not mutate the game.
    pub fn would_complete_five(&self, pos: Pos, player: Player) -> bool {
        self.board.is_empty(pos) && has_five_at_pos(&self.board, pos, player)
    }
}
