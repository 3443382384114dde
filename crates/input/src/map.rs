//! Key mapping from terminal events to front-end intents.

use crate::types::{Command, PieceKind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Everything a key press can ask the front end to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Play the focused board
    Command(Command),
    /// Focus board by zero-based index
    FocusBoard(usize),
    /// Flip the focused board between human and autonomous control
    ToggleAutonomous,
    /// Take over the focused autonomous board for a few pieces
    ManualOverride,
    Reset,
    /// Begin a force-next-piece chord; the next key names the kind
    ForceNextPrefix,
    ForceNext(PieceKind),
    ToggleHardDrop,
    Quit,
}

/// Map a single key press, without chord state.
pub fn handle_key_event(key: KeyEvent) -> Option<Intent> {
    if should_quit(key) {
        return Some(Intent::Quit);
    }
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Intent::Command(Command::MoveLeft))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Intent::Command(Command::MoveRight))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Intent::Command(Command::SoftDrop))
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Intent::Command(Command::Rotate))
        }
        KeyCode::Char(' ') => Some(Intent::Command(Command::HardDrop)),

        // Board management
        KeyCode::Char(c @ '1'..='9') => Some(Intent::FocusBoard(c as usize - '1' as usize)),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Intent::ToggleAutonomous),
        KeyCode::Char('o') | KeyCode::Char('O') => Some(Intent::ManualOverride),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Intent::Reset),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Intent::ForceNextPrefix),
        KeyCode::Char('u') | KeyCode::Char('U') => Some(Intent::ToggleHardDrop),

        _ => None,
    }
}

/// Piece named by the second key of a force-next chord
pub fn piece_for_key(key: KeyEvent) -> Option<PieceKind> {
    match key.code {
        KeyCode::Char(c) => PieceKind::from_str(&c.to_string()),
        _ => None,
    }
}

/// Check if key should quit.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(Intent::Command(Command::MoveLeft))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('D'))),
            Some(Intent::Command(Command::MoveRight))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('s'))),
            Some(Intent::Command(Command::SoftDrop))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(Intent::Command(Command::Rotate))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(Intent::Command(Command::HardDrop))
        );
    }

    #[test]
    fn test_board_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('1'))),
            Some(Intent::FocusBoard(0))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('9'))),
            Some(Intent::FocusBoard(8))
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('0'))), None);
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('m'))),
            Some(Intent::ToggleAutonomous)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('U'))),
            Some(Intent::ToggleHardDrop)
        );
    }

    #[test]
    fn test_piece_keys() {
        assert_eq!(piece_for_key(KeyEvent::from(KeyCode::Char('t'))), Some(PieceKind::T));
        assert_eq!(piece_for_key(KeyEvent::from(KeyCode::Char('I'))), Some(PieceKind::I));
        assert_eq!(piece_for_key(KeyEvent::from(KeyCode::Char('x'))), None);
        assert_eq!(piece_for_key(KeyEvent::from(KeyCode::Enter)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('Q'))),
            Some(Intent::Quit)
        );
    }
}
