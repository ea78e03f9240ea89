//! Key mapping from terminal events to game actions.

use crate::types::{GameAction, GameStatus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Once the game is over only the restart keys (Enter, Space, `r`) produce
/// an action.
pub fn handle_key_event(key: KeyEvent, status: GameStatus) -> Option<GameAction> {
    if status == GameStatus::GameOver {
        return match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => {
                Some(GameAction::Restart)
            }
            _ => None,
        };
    }

    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(GameAction::SoftDrop),

        // Rotation (clockwise only)
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameAction::Rotate),

        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn running(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code), GameStatus::Running)
    }

    fn over(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code), GameStatus::GameOver)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(running(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(running(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(running(KeyCode::Down), Some(GameAction::SoftDrop));

        assert_eq!(running(KeyCode::Char('a')), Some(GameAction::MoveLeft));
        assert_eq!(running(KeyCode::Char('L')), Some(GameAction::MoveRight));
        assert_eq!(running(KeyCode::Char('j')), Some(GameAction::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(running(KeyCode::Up), Some(GameAction::Rotate));
        assert_eq!(running(KeyCode::Char('w')), Some(GameAction::Rotate));
        assert_eq!(running(KeyCode::Char('K')), Some(GameAction::Rotate));
        assert_eq!(running(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(running(KeyCode::Char(' ')), Some(GameAction::HardDrop));
        assert_eq!(running(KeyCode::Char('p')), Some(GameAction::Pause));
        assert_eq!(running(KeyCode::Char('r')), Some(GameAction::Restart));
        assert_eq!(running(KeyCode::Enter), None);
        assert_eq!(running(KeyCode::Char('c')), None);
    }

    #[test]
    fn test_paused_keys_still_map() {
        let key = KeyEvent::from(KeyCode::Char('p'));
        assert_eq!(handle_key_event(key, GameStatus::Paused), Some(GameAction::Pause));
    }

    #[test]
    fn test_game_over_only_restarts() {
        assert_eq!(over(KeyCode::Enter), Some(GameAction::Restart));
        assert_eq!(over(KeyCode::Char(' ')), Some(GameAction::Restart));
        assert_eq!(over(KeyCode::Char('r')), Some(GameAction::Restart));
        assert_eq!(over(KeyCode::Left), None);
        assert_eq!(over(KeyCode::Char('p')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
