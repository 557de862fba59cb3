//! Resolution modes and the logical-pixel coordinate model.
//!
//! A logical position addresses the finest grid of the active resolution:
//! cell address times density plus sub-cell offset, per axis. All math here
//! is pure; clamping happens against a cell extent supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::util::Pos;

/// Pixel density of one terminal cell.
///
/// Each mode maps to a glyph family in [`super::glyph`]; the density vector
/// gives the number of addressable sub-pixels per cell and axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// One pixel per cell, rendered as a full block.
    #[default]
    Full,
    /// Two pixels stacked per cell (half blocks).
    Half,
    /// 2x2 pixels per cell (quadrant blocks).
    Quarter,
    /// 2x3 pixels per cell (block sextants).
    Sextant,
    /// 2x4 pixels per cell (braille patterns).
    Braille,
}

impl Resolution {
    /// Every mode, coarsest first.
    pub const ALL: [Resolution; 5] = [
        Resolution::Full,
        Resolution::Half,
        Resolution::Quarter,
        Resolution::Sextant,
        Resolution::Braille,
    ];

    /// Sub-pixels per cell, per axis.
    pub fn density(self) -> (i32, i32) {
        match self {
            Resolution::Full => (1, 1),
            Resolution::Half => (1, 2),
            Resolution::Quarter => (2, 2),
            Resolution::Sextant => (2, 3),
            Resolution::Braille => (2, 4),
        }
    }

    /// Display name for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            Resolution::Full => "full",
            Resolution::Half => "half",
            Resolution::Quarter => "quarter",
            Resolution::Sextant => "sextant",
            Resolution::Braille => "braille",
        }
    }

    /// Splits a logical position into its cell address and sub-cell offset.
    pub fn to_cell_and_offset(self, logical: Pos) -> (Pos, Pos) {
        let (dx, dy) = self.density();
        let cell = Pos::new(logical.x.div_euclid(dx), logical.y.div_euclid(dy));
        let offset = Pos::new(logical.x.rem_euclid(dx), logical.y.rem_euclid(dy));
        (cell, offset)
    }

    /// Inverse of [`to_cell_and_offset`](Self::to_cell_and_offset).
    pub fn to_logical(self, cell: Pos, offset: Pos) -> Pos {
        let (dx, dy) = self.density();
        Pos::new(cell.x * dx + offset.x, cell.y * dy + offset.y)
    }

    /// Logical extent of a canvas of `cells` terminal cells.
    pub fn logical_extent(self, cells: Pos) -> Pos {
        let (dx, dy) = self.density();
        Pos::new(cells.x * dx, cells.y * dy)
    }

    /// Clamps a logical position into the drawable area of `cells`.
    ///
    /// Movement past the canvas edge clamps silently; there is no error
    /// path for boundary violations.
    pub fn clamp(self, logical: Pos, cells: Pos) -> Pos {
        logical.clamp_to(self.logical_extent(cells))
    }

    /// Re-expresses a logical position held at `self` in `target` density.
    ///
    /// The cell address is preserved and the sub-cell offset resets to zero,
    /// so the visual cursor never jumps cells when toggling resolution.
    pub fn rebase(self, logical: Pos, target: Resolution) -> Pos {
        let (cell, _) = self.to_cell_and_offset(logical);
        target.to_logical(cell, Pos::new(0, 0))
    }
}
