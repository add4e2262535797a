//! Key events.
//!
//! Everything the terminal can tell us arrives as a [`Key`]: keyboard input,
//! mouse reports (the coordinate rides in the code, the gesture in the
//! modifiers), focus changes, and the synthetic resize notification.

use bitflags::bitflags;

use crate::types::DisplayCoord;

bitflags! {
    /// Key modifiers, including the mouse gesture bits.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Modifiers: u16 {
        const SHIFT               = 1 << 0;
        const ALT                 = 1 << 1;
        const CONTROL             = 1 << 2;
        const MOUSE_POS           = 1 << 3;
        const MOUSE_PRESS_LEFT    = 1 << 4;
        const MOUSE_PRESS_RIGHT   = 1 << 5;
        const MOUSE_RELEASE_LEFT  = 1 << 6;
        const MOUSE_RELEASE_RIGHT = 1 << 7;
        const SCROLL              = 1 << 8;
    }
}

/// What was pressed (or reported).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Return,
    Tab,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    F(u8),
    FocusIn,
    FocusOut,
    /// Mouse report coordinate, in window coordinates.
    Mouse(DisplayCoord),
    /// Signed scroll amount of a wheel event.
    Scroll(i32),
    /// Synthetic: the terminal was resized to the given dimensions.
    Resize(DisplayCoord),
}

/// A decoded input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub mods: Modifiers,
    pub code: KeyCode,
}

impl Key {
    pub const fn new(mods: Modifiers, code: KeyCode) -> Self {
        Self { mods, code }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(Modifiers::empty(), code)
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(Modifiers::CONTROL, KeyCode::Char(c))
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(Modifiers::SHIFT, code)
    }

    /// The same key with the Alt modifier added.
    pub fn with_alt(mut self) -> Self {
        self.mods |= Modifiers::ALT;
        self
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Key::plain(code)
    }
}
