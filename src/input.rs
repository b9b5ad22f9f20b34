//! Terminal keys to game events.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Event;

/// `text_mode` is set while the player is typing a name: letters are then
/// text rather than commands, and only Esc leaves the game.
pub fn translate(key: KeyEvent, text_mode: bool) -> Option<Event> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Event::Quit),
            _ => None,
        };
    }

    match (text_mode, key.code) {
        (_, KeyCode::Esc) => Some(Event::Quit),
        (true, KeyCode::Enter) => Some(Event::Confirm),
        (true, KeyCode::Backspace) => Some(Event::Backspace),
        (true, KeyCode::Char(c)) => Some(Event::Text(c)),
        (false, KeyCode::Char('q')) => Some(Event::Quit),
        (false, KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter) => Some(Event::Jump),
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
    fn test_play_keys() {
        assert_eq!(translate(key(KeyCode::Char(' ')), false), Some(Event::Jump));
        assert_eq!(translate(key(KeyCode::Up), false), Some(Event::Jump));
        assert_eq!(translate(key(KeyCode::Enter), false), Some(Event::Jump));
        assert_eq!(translate(key(KeyCode::Char('q')), false), Some(Event::Quit));
        assert_eq!(translate(key(KeyCode::Char('a')), false), None);
        assert_eq!(translate(key(KeyCode::Backspace), false), None);
    }

    #[test]
    fn test_name_entry_keys() {
        assert_eq!(translate(key(KeyCode::Char('q')), true), Some(Event::Text('q')));
        assert_eq!(translate(key(KeyCode::Char(' ')), true), Some(Event::Text(' ')));
        assert_eq!(translate(key(KeyCode::Enter), true), Some(Event::Confirm));
        assert_eq!(translate(key(KeyCode::Backspace), true), Some(Event::Backspace));
        assert_eq!(translate(key(KeyCode::Up), true), None);
    }

    #[test]
    fn test_quit_keys_everywhere() {
        for text_mode in [false, true] {
            assert_eq!(translate(key(KeyCode::Esc), text_mode), Some(Event::Quit));
            let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
            assert_eq!(translate(ctrl_c, text_mode), Some(Event::Quit));
        }
    }

    #[test]
    fn test_shifted_letters_are_text() {
        let upper = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(translate(upper, true), Some(Event::Text('A')));
    }

    #[test]
    fn test_release_is_ignored() {
        let mut release = key(KeyCode::Char(' '));
        release.kind = KeyEventKind::Release;
        assert_eq!(translate(release, false), None);
    }
}
