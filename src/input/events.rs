//! Generic input event types for cross-backend compatibility.

use bitflags::bitflags;

/// Generic key representation for cross-backend compatibility.
///
/// The backend maps its native key codes to these generic values for
/// unified input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Tab key
    Tab,
    /// Space bar
    Space,
    /// Arrow keys (cursor movement)
    Left,
    Right,
    Up,
    Down,
    /// F10 function key (toggle help)
    F10,
    /// F12 function key (toggle status bar)
    F12,
    /// Unmapped or unrecognized key
    Unknown,
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (primary drawing button)
    Left,
    /// Right mouse button (cancel action)
    Right,
    /// Middle mouse button (currently unused)
    Middle,
}

bitflags! {
    /// Set of mouse buttons held during a motion event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

impl From<MouseButton> for Buttons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Buttons::LEFT,
            MouseButton::Right => Buttons::RIGHT,
            MouseButton::Middle => Buttons::MIDDLE,
        }
    }
}
