//! Game session: one game, its configuration and the computer opponent
//!
//! The session is what a front end drives. It forwards human moves to the
//! rules engine, lets the engine answer in PvE, and takes back whole
//! exchanges on undo so the human is always the one to move afterwards.

use tracing::{debug, info};

use crate::board::Player;
use crate::config::{GameConfig, GameMode};
use crate::engine::{AIEngine, MoveExplanation, MoveResult, PositionAnalysis};
use crate::error::{GameResult, StoreError};
use crate::game::{Game, Move, MoveOutcome};
use crate::persistence::SnapshotStore;

/// Engine reply together with the move it produced
#[derive(Debug, Clone)]
pub struct EngineReply {
    pub result: MoveResult,
    pub outcome: MoveOutcome,
}

pub struct Session {
    game: Game,
    config: GameConfig,
    engine: AIEngine,
}

impl Session {
    /// Start a session. `seed` fixes the engine's random choices.
    pub fn new(config: GameConfig, seed: Option<u64>) -> GameResult<Self> {
        let size = config.validate()?;
        let engine_player = config.engine_player().unwrap_or(Player::White);
        let engine = match seed {
            Some(seed) => AIEngine::with_seed(engine_player, config.difficulty, seed),
            None => AIEngine::new(engine_player, config.difficulty),
        };
        info!(size = %size, mode = %config.mode, difficulty = %config.difficulty, "session started");
        Ok(Self {
            game: Game::with_size(size),
            config,
            engine,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Is the engine expected to move now?
    pub fn is_engine_turn(&self) -> bool {
        !self.game.is_over() && self.config.engine_player() == Some(self.game.turn())
    }

    /// Play a human move for the side to move.
    pub fn play(&mut self, row: usize, col: usize) -> GameResult<MoveOutcome> {
        self.game.apply_move(row, col)
    }

    /// Let the engine move if it is its turn.
    pub fn engine_reply(&mut self) -> GameResult<Option<EngineReply>> {
        if !self.is_engine_turn() {
            return Ok(None);
        }
        let result = self.engine.select_move(&mut self.game);
        let Some(pos) = result.best_move else {
            return Ok(None);
        };
        let outcome = self
            .game
            .apply_move(usize::from(pos.row), usize::from(pos.col))?;
        debug!(%pos, search_type = ?result.search_type, "engine moved");
        Ok(Some(EngineReply { result, outcome }))
    }

    /// Take back moves until a human is to move.
    ///
    /// In PvP this is one ply. In PvE it undoes the engine's reply together
    /// with the human move before it, so usually two plies.
    pub fn undo(&mut self) -> GameResult<Vec<Move>> {
        let mut undone = vec![self.game.undo_move()?];
        if self.config.mode == GameMode::PvE {
            while self.is_engine_turn() && self.game.move_count() > 0 {
                undone.push(self.game.undo_move()?);
            }
        }
        debug!(plies = undone.len(), "undo");
        Ok(undone)
    }

    /// Suggested move for the side to move.
    pub fn hint(&mut self) -> MoveResult {
        self.engine.hint(&mut self.game)
    }

    pub fn explain(&self, row: usize, col: usize) -> GameResult<MoveExplanation> {
        self.engine.explain_move(&self.game, row, col)
    }

    pub fn analyze(&self) -> PositionAnalysis {
        self.engine.analyze_position(&self.game)
    }

    /// Fresh game with the same configuration.
    pub fn new_game(&mut self) {
        self.game = Game::with_size(self.game.size());
        info!("new game");
    }

    pub fn save(&self, store: &mut dyn SnapshotStore) -> Result<(), StoreError> {
        store.save(&self.game.snapshot())
    }

    /// Replace the current game with the stored one.
    ///
    /// Returns `Ok(false)` when the store is empty. A stored game of another
    /// board size is accepted and changes the session's size.
    pub fn load(&mut self, store: &dyn SnapshotStore) -> GameResult<bool> {
        let Some(snapshot) = store.load() else {
            return Ok(false);
        };
        let game = Game::restore(snapshot)?;
        self.config.board_size = game.size().into();
        self.game = game;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Difficulty;
    use crate::error::GameError;
    use crate::persistence::MemoryStore;

    fn pve(human: Player) -> Session {
        let config = GameConfig {
            difficulty: Difficulty::Easy,
            human,
            ..GameConfig::default()
        };
        Session::new(config, Some(42)).unwrap()
    }

    #[test]
    fn test_rejects_bad_size() {
        let config = GameConfig {
            board_size: 9,
            ..GameConfig::default()
        };
        assert!(matches!(
            Session::new(config, None),
            Err(GameError::InvalidConfiguration { size: 9 })
        ));
    }

    #[test]
    fn test_engine_answers_human() {
        let mut session = pve(Player::Black);
        assert!(!session.is_engine_turn());
        assert!(session.engine_reply().unwrap().is_none());

        session.play(7, 7).unwrap();
        assert!(session.is_engine_turn());
        let reply = session.engine_reply().unwrap().unwrap();
        assert_eq!(reply.outcome.mv.player, Player::White);
        assert_eq!(session.game().move_count(), 2);
        assert!(!session.is_engine_turn());
    }

    #[test]
    fn test_engine_opens_when_human_is_white() {
        let mut session = pve(Player::White);
        assert!(session.is_engine_turn());
        let reply = session.engine_reply().unwrap().unwrap();
        assert_eq!(reply.outcome.mv.player, Player::Black);
    }

    #[test]
    fn test_pve_undo_takes_back_exchange() {
        let mut session = pve(Player::Black);
        session.play(7, 7).unwrap();
        session.engine_reply().unwrap();
        let undone = session.undo().unwrap();
        assert_eq!(undone.len(), 2);
        assert_eq!(session.game().move_count(), 0);
        assert_eq!(session.game().turn(), Player::Black);
    }

    #[test]
    fn test_pvp_undo_single_ply() {
        let config = GameConfig {
            mode: GameMode::PvP,
            ..GameConfig::default()
        };
        let mut session = Session::new(config, Some(1)).unwrap();
        session.play(7, 7).unwrap();
        session.play(7, 8).unwrap();
        assert!(session.engine_reply().unwrap().is_none());
        assert_eq!(session.undo().unwrap().len(), 1);
        assert_eq!(session.game().turn(), Player::White);
    }

    #[test]
    fn test_undo_on_empty_game() {
        let mut session = pve(Player::Black);
        assert_eq!(session.undo().unwrap_err(), GameError::EmptyHistory);
    }

    #[test]
    fn test_save_load_and_new_game() {
        let mut session = pve(Player::Black);
        session.play(7, 7).unwrap();
        session.engine_reply().unwrap();
        let saved = session.game().snapshot();

        let mut store = MemoryStore::new();
        session.save(&mut store).unwrap();

        session.new_game();
        assert_eq!(session.game().move_count(), 0);

        assert!(session.load(&store).unwrap());
        assert_eq!(session.game().snapshot(), saved);
        assert!(!session.load(&MemoryStore::new()).unwrap());
    }
}
