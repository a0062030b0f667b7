//! Event handling for the focus screen.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::MypaError;
use crate::tui::app::{Action, App};

/// Longest wait for input before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Wait briefly for a key press and decode it.
///
/// The wait never outlasts the next due tick, so the clock on screen stays
/// current.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &App) -> Result<Option<Action>, MypaError> {
    let timeout = app
        .schedule()
        .until_next(Instant::now())
        .map_or(POLL_INTERVAL, |wait| wait.min(POLL_INTERVAL));

    if !event::poll(timeout).map_err(|e| MypaError::Terminal(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }

    match event::read().map_err(|e| MypaError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            Ok(decode_key(key, app.confirming_stop))
        }
        _ => Ok(None),
    }
}

/// Map a key to an action.
fn decode_key(key: KeyEvent, confirming: bool) -> Option<Action> {
    // Ctrl+C behaves like stop
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(if confirming { Action::Confirm } else { Action::Stop });
    }

    if confirming {
        return match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::Decline),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ' | 'p') => Some(Action::TogglePause),
        KeyCode::Char('c') => Some(Action::Complete),
        KeyCode::Char('s' | 'q') | KeyCode::Esc => Some(Action::Stop),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_decode_running_keys() {
        assert_eq!(decode_key(key(KeyCode::Char(' ')), false), Some(Action::TogglePause));
        assert_eq!(decode_key(key(KeyCode::Char('p')), false), Some(Action::TogglePause));
        assert_eq!(decode_key(key(KeyCode::Char('c')), false), Some(Action::Complete));
        assert_eq!(decode_key(key(KeyCode::Char('s')), false), Some(Action::Stop));
        assert_eq!(decode_key(key(KeyCode::Char('q')), false), Some(Action::Stop));
        assert_eq!(decode_key(key(KeyCode::Char('y')), false), None);
    }

    #[test]
    fn test_decode_confirmation_keys() {
        assert_eq!(decode_key(key(KeyCode::Char('y')), true), Some(Action::Confirm));
        assert_eq!(decode_key(key(KeyCode::Char('n')), true), Some(Action::Decline));
        assert_eq!(decode_key(key(KeyCode::Esc), true), Some(Action::Decline));
        assert_eq!(decode_key(key(KeyCode::Char('c')), true), None);
    }

    #[test]
    fn test_decode_ctrl_c() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(decode_key(ctrl_c, false), Some(Action::Stop));
        assert_eq!(decode_key(ctrl_c, true), Some(Action::Confirm));
    }
}
