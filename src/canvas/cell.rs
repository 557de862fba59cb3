//! The single terminal cell, the unit of the drawing surface.

use serde::{Deserialize, Serialize};

use super::color::{BLACK, Color, WHITE};

/// One terminal cell: a glyph plus foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Displayed glyph. Blank cells hold a space.
    pub ch: char,
    /// Foreground color the glyph is drawn with.
    pub fg: Color,
    /// Background color behind the glyph.
    pub bg: Color,
}

impl Cell {
    /// The empty cell: a space over the default background.
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: WHITE,
        bg: BLACK,
    };

    /// Creates a cell showing `ch` in `fg` over the default background.
    pub fn glyph(ch: char, fg: Color) -> Self {
        Self { ch, fg, bg: BLACK }
    }

    /// Whether the cell displays nothing.
    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
