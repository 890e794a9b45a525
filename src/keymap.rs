use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::NavKey;

/// Chords the host watches even while navigation mode is off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlobalChord {
    /// Ctrl+Shift+E: toggle navigation mode.
    ToggleNavigation,
    /// Ctrl+Shift+B: the host's own panel toggle, observed only so an
    /// active session can end with it.
    TogglePanel,
}

/// Decodes the host-level chords.
pub fn decode_global(key: KeyEvent) -> Option<GlobalChord> {
    if !key
        .modifiers
        .contains(KeyModifiers::CONTROL | KeyModifiers::SHIFT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char('e' | 'E') => Some(GlobalChord::ToggleNavigation),
        KeyCode::Char('b' | 'B') => Some(GlobalChord::TogglePanel),
        _ => None,
    }
}

/// Decodes a key event into the navigation key surface.
///
/// Only plain (optionally shifted) characters, Enter and Escape take part;
/// anything else is not ours.
pub fn decode_nav(key: KeyEvent) -> Option<NavKey> {
    match key.code {
        KeyCode::Esc => Some(NavKey::Escape),
        KeyCode::Enter => Some(NavKey::Enter),
        KeyCode::Char(c)
            if key
                .modifiers
                .difference(KeyModifiers::SHIFT)
                .is_empty() =>
        {
            Some(NavKey::Char(c))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_and_shifted_characters_decode() {
        assert_eq!(
            decode_nav(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(NavKey::Char('j'))
        );
        assert_eq!(
            decode_nav(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(NavKey::Char('G'))
        );
        assert_eq!(
            decode_nav(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(NavKey::Enter)
        );
        assert_eq!(
            decode_nav(key(KeyCode::Esc, KeyModifiers::NONE)),
            Some(NavKey::Escape)
        );
    }

    #[test]
    fn modified_characters_do_not_decode_as_navigation() {
        assert_eq!(
            decode_nav(key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(decode_nav(key(KeyCode::Tab, KeyModifiers::NONE)), None);
    }

    #[test]
    fn global_chords_require_ctrl_shift() {
        let ctrl_shift = KeyModifiers::CONTROL | KeyModifiers::SHIFT;
        assert_eq!(
            decode_global(key(KeyCode::Char('E'), ctrl_shift)),
            Some(GlobalChord::ToggleNavigation)
        );
        assert_eq!(
            decode_global(key(KeyCode::Char('b'), ctrl_shift)),
            Some(GlobalChord::TogglePanel)
        );
        assert_eq!(
            decode_global(key(KeyCode::Char('e'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(decode_global(key(KeyCode::Char('x'), ctrl_shift)), None);
    }
}
