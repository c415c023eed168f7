//! Property tests for the rules engine and move selection

use gomoku::rules::has_five_anywhere;
use gomoku::{AIEngine, Difficulty, Game, GameStatus, Player, Pos};
use proptest::prelude::*;

/// Play a random game prefix: each pick selects one of the empty cells.
/// Stops early if the game ends.
fn play_picks(size: usize, picks: &[u16]) -> Game {
    let mut game = Game::new(size).unwrap();
    for &pick in picks {
        if game.is_over() {
            break;
        }
        let empty: Vec<Pos> = game.board().empty_cells().collect();
        let pos = empty[pick as usize % empty.len()];
        game.apply_move(pos.row as usize, pos.col as usize).unwrap();
    }
    game
}

fn board_size() -> impl Strategy<Value = usize> {
    prop_oneof![Just(15usize), Just(19usize)]
}

proptest! {
    #[test]
    fn apply_then_undo_restores_state(
        size in board_size(),
        picks in prop::collection::vec(any::<u16>(), 0..80),
        next in any::<u16>(),
    ) {
        let mut game = play_picks(size, &picks);
        prop_assume!(!game.is_over());

        let before = game.snapshot();
        let empty: Vec<Pos> = game.board().empty_cells().collect();
        let pos = empty[next as usize % empty.len()];
        game.apply_move(pos.row as usize, pos.col as usize).unwrap();
        game.undo_move().unwrap();

        prop_assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn undo_everything_gives_empty_board(
        size in board_size(),
        picks in prop::collection::vec(any::<u16>(), 0..80),
    ) {
        let mut game = play_picks(size, &picks);
        while game.move_count() > 0 {
            game.undo_move().unwrap();
        }
        prop_assert!(game.board().is_board_empty());
        prop_assert_eq!(game.turn(), Player::Black);
        prop_assert_eq!(game.status(), GameStatus::InProgress);
        prop_assert!(game.undo_move().is_err());
    }

    #[test]
    fn winning_line_is_five_contiguous_winner_stones(
        size in board_size(),
        picks in prop::collection::vec(0u16..40, 0..200),
    ) {
        // Small picks keep play in the top rows so wins actually happen
        let game = play_picks(size, &picks);
        if let GameStatus::Won { winner, line } = game.status() {
            let last = game.last_move().unwrap();
            prop_assert_eq!(last.player, winner);
            prop_assert!(line.contains(&last.pos));

            let dr = line[1].row as i32 - line[0].row as i32;
            let dc = line[1].col as i32 - line[0].col as i32;
            prop_assert!(dr.abs() <= 1 && dc.abs() <= 1 && (dr, dc) != (0, 0));
            for pair in line.windows(2) {
                prop_assert_eq!(pair[1].row as i32 - pair[0].row as i32, dr);
                prop_assert_eq!(pair[1].col as i32 - pair[0].col as i32, dc);
            }
            for pos in line {
                prop_assert!(game.board().is_player(pos, winner));
            }
        }
    }

    #[test]
    fn incremental_detection_matches_full_scan(
        size in board_size(),
        picks in prop::collection::vec(0u16..60, 0..200),
    ) {
        let mut game = Game::new(size).unwrap();
        for pick in picks {
            if game.is_over() {
                break;
            }
            let empty: Vec<Pos> = game.board().empty_cells().collect();
            let pos = empty[pick as usize % empty.len()];
            let outcome = game.apply_move(pos.row as usize, pos.col as usize).unwrap();
            let mover = outcome.mv.player;

            let won = matches!(outcome.status, GameStatus::Won { .. });
            prop_assert_eq!(won, has_five_anywhere(game.board(), mover));
            // Play stops at the first five, so the other side never has one
            prop_assert!(!has_five_anywhere(game.board(), mover.opponent()));
        }
    }

    #[test]
    fn draw_only_on_full_board(
        size in board_size(),
        picks in prop::collection::vec(any::<u16>(), 0..120),
    ) {
        let game = play_picks(size, &picks);
        let cells = (size * size) as u32;
        if game.status() == GameStatus::Draw {
            prop_assert_eq!(game.move_count(), cells);
        }
        if game.move_count() < cells {
            prop_assert_ne!(game.status(), GameStatus::Draw);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn engine_always_returns_legal_move(
        picks in prop::collection::vec(any::<u16>(), 0..30),
        seed in any::<u64>(),
    ) {
        let mut game = play_picks(15, &picks);
        prop_assume!(!game.is_over());

        let before = game.snapshot();
        let mut engine = AIEngine::with_seed(game.turn(), Difficulty::Easy, seed);
        let result = engine.select_move(&mut game);

        let pos = result.best_move.unwrap();
        prop_assert!(game.is_legal(pos.row as usize, pos.col as usize));
        prop_assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn engine_takes_open_four_at_any_depth(
        row in 0u8..15,
        start in 1u8..7,
        seed in any::<u64>(),
    ) {
        // Black four along `row` with both ends open; White stones well away
        let mut game = Game::new(15).unwrap();
        let away = if row < 7 { 14 } else { 0 };
        for k in 0..4u8 {
            game.apply_move(row as usize, (start + k) as usize).unwrap();
            game.apply_move(away, (k * 3) as usize).unwrap();
        }
        prop_assume!(!game.is_over());

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut engine = AIEngine::with_seed(Player::Black, difficulty, seed);
            let pos = engine.get_move(&mut game).unwrap();
            game.apply_move(pos.row as usize, pos.col as usize).unwrap();
            prop_assert_eq!(game.winner(), Some(Player::Black));
            game.undo_move().unwrap();
        }
    }
}
