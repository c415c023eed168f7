//! Move explanations and position assessment
//!
//! Both are read-only views over a [`Game`]: nothing here plays a stone.

use std::fmt;

use crate::board::{Player, Pos};
use crate::error::GameResult;
use crate::eval::{evaluate, move_score, PatternScore};
use crate::game::Game;

use super::find_immediate_win;

/// Evaluation margin beyond which one side is considered ahead.
const ADVANTAGE_MARGIN: i32 = 100;

/// What a move accomplishes, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Completes five for the mover
    Winning,
    /// Takes the cell where the opponent would complete five
    Blocking,
    /// Creates a four
    MakesFour,
    /// Creates an open three or a blocked four
    StrongThreat,
    /// Extends a short line
    BuildsShape,
    /// Anything else
    Develops,
}

impl MoveKind {
    fn from_score(score: i32) -> Self {
        if score >= PatternScore::OPEN_FOUR {
            MoveKind::MakesFour
        } else if score >= PatternScore::OPEN_THREE {
            MoveKind::StrongThreat
        } else if score >= PatternScore::OPEN_TWO {
            MoveKind::BuildsShape
        } else {
            MoveKind::Develops
        }
    }
}

/// Rationale for playing one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveExplanation {
    pub pos: Pos,
    pub player: Player,
    pub kind: MoveKind,
    /// Single-move line score for `player` at `pos`
    pub score: i32,
}

impl fmt::Display for MoveExplanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { pos, player, .. } = self;
        match self.kind {
            MoveKind::Winning => write!(f, "{player} at {pos} completes five in a row and wins."),
            MoveKind::Blocking => write!(
                f,
                "{player} at {pos} blocks {} from completing five.",
                player.opponent()
            ),
            MoveKind::MakesFour => write!(f, "{player} at {pos} makes a four."),
            MoveKind::StrongThreat => write!(f, "{player} at {pos} creates a strong threat."),
            MoveKind::BuildsShape => write!(f, "{player} at {pos} builds on an existing line."),
            MoveKind::Develops => write!(f, "{player} at {pos} develops a new position."),
        }
    }
}

/// Who the static evaluation favours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    Advantage,
    Equal,
    Disadvantage,
}

/// Snapshot assessment for the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionAnalysis {
    pub side_to_move: Player,
    /// Static evaluation for `side_to_move`
    pub score: i32,
    pub assessment: Assessment,
    /// Cell where the side to move completes five
    pub winning_move: Option<Pos>,
    /// Cell where the opponent would complete five
    pub must_defend: Option<Pos>,
}

impl fmt::Display for PositionAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side_to_move;
        match self.assessment {
            Assessment::Advantage => write!(f, "{side} is ahead")?,
            Assessment::Equal => write!(f, "The position is balanced")?,
            Assessment::Disadvantage => write!(f, "{side} is behind")?,
        }
        write!(f, " (score {}).", self.score)?;
        if let Some(pos) = self.winning_move {
            write!(f, " {side} can win at {pos}.")?;
        }
        if let Some(pos) = self.must_defend {
            write!(f, " {side} must defend {pos}.")?;
        }
        Ok(())
    }
}

/// Explain what playing `(row, col)` would do for the side to move.
///
/// Fails with `IllegalMove` when the cell cannot be played.
pub fn explain_move(game: &Game, row: usize, col: usize) -> GameResult<MoveExplanation> {
    let pos = game.validate_move(row, col)?;
    let player = game.turn();
    let score = move_score(game.board(), pos, player);

    let kind = if game.would_complete_five(pos, player) {
        MoveKind::Winning
    } else if game.would_complete_five(pos, player.opponent()) {
        MoveKind::Blocking
    } else {
        MoveKind::from_score(score)
    };

    Ok(MoveExplanation {
        pos,
        player,
        kind,
        score,
    })
}

/// Assess the position for the side to move.
#[must_use]
pub fn analyze_position(game: &Game) -> PositionAnalysis {
    let side = game.turn();
    let score = evaluate(game, side);
    let assessment = if score > ADVANTAGE_MARGIN {
        Assessment::Advantage
    } else if score < -ADVANTAGE_MARGIN {
        Assessment::Disadvantage
    } else {
        Assessment::Equal
    };

    let (winning_move, must_defend) = if game.is_over() {
        (None, None)
    } else {
        (
            find_immediate_win(game, side),
            find_immediate_win(game, side.opponent()),
        )
    };

    PositionAnalysis {
        side_to_move: side,
        score,
        assessment,
        winning_move,
        must_defend,
    }
}
