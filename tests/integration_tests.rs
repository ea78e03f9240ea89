//! Integration tests for the game state machine

use classic_tetris::core::{line_clear_score, score_lock, GameState, SequenceRng};
use classic_tetris::types::{GameAction, GameStatus, PieceKind};

/// Game that only ever spawns O pieces (spawn column 4)
fn o_game() -> GameState<SequenceRng> {
    GameState::with_rng(SequenceRng::constant(PieceKind::O.index()))
}

/// Shift the active O so its left column is `x`, then hard drop it.
fn drop_o_at(game: &mut GameState<SequenceRng>, x: i32) {
    let dx = x - game.active().unwrap().x();
    let step = if dx < 0 {
        GameAction::MoveLeft
    } else {
        GameAction::MoveRight
    };
    for _ in 0..dx.abs() {
        assert!(game.apply_action(step));
    }
    assert!(game.apply_action(GameAction::HardDrop));
}

/// Five O pieces side by side clear the bottom two rows.
fn clear_two_lines(game: &mut GameState<SequenceRng>) {
    for x in [0, 2, 4, 6, 8] {
        drop_o_at(game, x);
    }
}

#[test]
fn test_game_lifecycle() {
    let state = GameState::new(12345);
    assert_eq!(state.status(), GameStatus::Running);
    assert!(state.active().is_some());
    assert_eq!(state.active().unwrap().y(), 0);
    assert_eq!((state.score(), state.level(), state.lines()), (0, 1, 0));
}

#[test]
fn test_scoring_examples() {
    assert_eq!(line_clear_score(4, 3), 3600);
    assert_eq!(line_clear_score(1, 1), 40);

    let up = score_lock(1, 1, 9);
    assert_eq!(up.total_lines, 10);
    assert!(up.level_up);

    let stay = score_lock(1, 1, 8);
    assert_eq!(stay.total_lines, 9);
    assert!(!stay.level_up);
}

#[test]
fn test_two_line_clear_scores_at_level_one() {
    let mut game = o_game();
    clear_two_lines(&mut game);

    assert_eq!(game.lines(), 2);
    assert_eq!(game.score(), 100);
    assert!(game.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_interval_recomputes_after_ten_lines() {
    let mut game = o_game();
    assert_eq!(game.gravity_interval_ms(), 1000);

    for round in 1..=5 {
        clear_two_lines(&mut game);
        assert_eq!(game.lines(), round * 2);
    }

    assert_eq!(game.level(), 2);
    assert_eq!(game.gravity_interval_ms(), 900);
    assert_eq!(game.score(), 500);

    // Gravity now fires at 900ms instead of 1000ms.
    let y = game.active().unwrap().y();
    assert!(!game.tick(899));
    assert!(game.tick(1));
    assert_eq!(game.active().unwrap().y(), y + 1);

    // Next clear is scored at level 2.
    clear_two_lines(&mut game);
    assert_eq!(game.score(), 700);
}

#[test]
fn test_game_over_freezes_board_until_restart() {
    let mut game = o_game();
    for _ in 0..10 {
        assert_eq!(game.status(), GameStatus::Running);
        drop_o_at(&mut game, 4);
    }

    assert_eq!(game.status(), GameStatus::GameOver);
    assert_eq!(game.lines(), 0);
    assert!(game.board().top_row_occupied());

    let frozen = game.board().clone();
    for _ in 0..50 {
        game.tick(1000);
    }
    for action in [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Pause,
    ] {
        assert!(!game.apply_action(action));
    }
    assert_eq!(game.board(), &frozen);

    assert!(game.apply_action(GameAction::Restart));
    assert_eq!(game.status(), GameStatus::Running);
    assert!(!game.board().top_row_occupied());
    assert_eq!((game.score(), game.level(), game.lines()), (0, 1, 0));
}

#[test]
fn test_pause_freezes_everything() {
    let mut game = GameState::new(99);
    game.tick(600);
    assert!(game.apply_action(GameAction::Pause));

    let snap = game.snapshot();
    for _ in 0..20 {
        game.tick(1000);
        game.apply_action(GameAction::MoveRight);
        game.apply_action(GameAction::HardDrop);
    }
    assert_eq!(game.snapshot(), snap);

    assert!(game.apply_action(GameAction::Pause));
    // Resume restarts the gravity timer; the earlier 600ms are gone.
    assert!(!game.tick(500));
    assert!(game.tick(500));
}

#[test]
fn test_seeded_games_are_reproducible() {
    let mut a = GameState::new(4242);
    let mut b = GameState::new(4242);
    for _ in 0..30 {
        a.apply_action(GameAction::HardDrop);
        b.apply_action(GameAction::HardDrop);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
