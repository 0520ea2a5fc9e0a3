//! Mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Char(' ')
        | KeyCode::Enter
        | KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(GameAction::Flap),
        _ => None,
    }
}

/// Map any terminal event to a game action.
///
/// Key presses and left clicks flap. Focus loss and gain stand in for the
/// host being hidden and shown again. Key repeats and releases are ignored so
/// holding a key does not machine-gun flaps.
pub fn handle_event(event: &Event) -> Option<GameAction> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(*key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(GameAction::Flap),
            _ => None,
        },
        Event::FocusLost => Some(GameAction::Hidden),
        Event::FocusGained => Some(GameAction::Visible),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_flap_keys() {
        for code in [
            KeyCode::Char(' '),
            KeyCode::Enter,
            KeyCode::Up,
            KeyCode::Char('k'),
            KeyCode::Char('W'),
        ] {
            assert_eq!(
                handle_key_event(KeyEvent::from(code)),
                Some(GameAction::Flap),
                "{code:?}"
            );
        }
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Left)), None);
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_key_repeat_is_ignored() {
        let repeat = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Repeat,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_event(&Event::Key(repeat)), None);
        assert_eq!(
            handle_event(&Event::Key(KeyEvent::from(KeyCode::Char(' ')))),
            Some(GameAction::Flap)
        );
    }

    #[test]
    fn test_mouse_down_flaps() {
        assert_eq!(
            handle_event(&mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(GameAction::Flap)
        );
        assert_eq!(
            handle_event(&mouse(MouseEventKind::Up(MouseButton::Left))),
            None
        );
        assert_eq!(handle_event(&mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn test_focus_maps_to_visibility() {
        assert_eq!(handle_event(&Event::FocusLost), Some(GameAction::Hidden));
        assert_eq!(handle_event(&Event::FocusGained), Some(GameAction::Visible));
        assert_eq!(handle_event(&Event::Resize(80, 24)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char(' '))));
    }
}
