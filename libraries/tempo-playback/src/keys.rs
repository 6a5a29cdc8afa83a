//! Keyboard surface
//!
//! | Key         | Action                          |
//! |-------------|---------------------------------|
//! | Space       | Toggle play (suppresses scroll) |
//! | `m`         | Toggle mute                     |
//! | `n`         | Next track                      |
//! | `p`         | Previous track                  |
//! | Right arrow | Seek forward                    |
//! | Left arrow  | Seek backward                   |

use serde::{Deserialize, Serialize};

/// Keys the player listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    M,
    N,
    P,
    ArrowRight,
    ArrowLeft,
}

impl Key {
    /// Parse a key name
    ///
    /// Accepts DOM `KeyboardEvent.key` values (`" "`, `"ArrowRight"`, ...)
    /// and short terminal spellings (`"space"`, `"right"`), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == " " {
            return Some(Self::Space);
        }

        match name.trim().to_lowercase().as_str() {
            "space" | "spacebar" => Some(Self::Space),
            "m" => Some(Self::M),
            "n" => Some(Self::N),
            "p" => Some(Self::P),
            "arrowright" | "right" => Some(Self::ArrowRight),
            "arrowleft" | "left" => Some(Self::ArrowLeft),
            _ => None,
        }
    }

    /// Action bound to this key
    pub fn action(self) -> KeyAction {
        match self {
            Self::Space => KeyAction::TogglePlay,
            Self::M => KeyAction::ToggleMute,
            Self::N => KeyAction::Next,
            Self::P => KeyAction::Previous,
            Self::ArrowRight => KeyAction::SeekForward,
            Self::ArrowLeft => KeyAction::SeekBackward,
        }
    }
}

/// Player actions reachable from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    TogglePlay,
    ToggleMute,
    Next,
    Previous,
    SeekForward,
    SeekBackward,
}

/// What the host should do with the original key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// The key mapped to an action
    pub handled: bool,

    /// The host should suppress the default behavior (page scroll on Space)
    pub prevent_default: bool,
}

impl KeyOutcome {
    pub(crate) fn for_key(key: Key) -> Self {
        Self {
            handled: true,
            prevent_default: key == Key::Space,
        }
    }

    pub(crate) fn ignored() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_key_names() {
        assert_eq!(Key::from_name(" "), Some(Key::Space));
        assert_eq!(Key::from_name("m"), Some(Key::M));
        assert_eq!(Key::from_name("N"), Some(Key::N));
        assert_eq!(Key::from_name("p"), Some(Key::P));
        assert_eq!(Key::from_name("ArrowRight"), Some(Key::ArrowRight));
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::ArrowLeft));
    }

    #[test]
    fn terminal_key_names() {
        assert_eq!(Key::from_name("space"), Some(Key::Space));
        assert_eq!(Key::from_name("right"), Some(Key::ArrowRight));
        assert_eq!(Key::from_name(" LEFT "), Some(Key::ArrowLeft));
    }

    #[test]
    fn unknown_keys_unmapped() {
        assert_eq!(Key::from_name("x"), None);
        assert_eq!(Key::from_name(""), None);
        assert_eq!(Key::from_name("Enter"), None);
    }

    #[test]
    fn bindings() {
        assert_eq!(Key::Space.action(), KeyAction::TogglePlay);
        assert_eq!(Key::M.action(), KeyAction::ToggleMute);
        assert_eq!(Key::N.action(), KeyAction::Next);
        assert_eq!(Key::P.action(), KeyAction::Previous);
        assert_eq!(Key::ArrowRight.action(), KeyAction::SeekForward);
        assert_eq!(Key::ArrowLeft.action(), KeyAction::SeekBackward);
    }

    #[test]
    fn only_space_prevents_default() {
        assert!(KeyOutcome::for_key(Key::Space).prevent_default);
        assert!(!KeyOutcome::for_key(Key::N).prevent_default);
        assert!(!KeyOutcome::ignored().handled);
    }
}
