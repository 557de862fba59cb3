//! Keyboard modifier state.

/// Modifier keys reported alongside an input event.
///
/// The terminal reports modifiers with every key and mouse event, so no
/// press/release tracking is needed; a value travels with each event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key held
    pub shift: bool,
    /// Ctrl key held
    pub ctrl: bool,
    /// Alt key held
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Only Ctrl held.
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
    };

    /// Whether any modifier is held.
    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}
