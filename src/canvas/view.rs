//! Density-scoped pixel view over the cell buffer.
//!
//! A [`PixelView`] exposes the drawing-surface contract in logical pixel
//! coordinates for one [`Resolution`]: reading, setting and resetting
//! individual sub-pixels, and rasterizing straight lines. Writes re-encode
//! the target cell's glyph through the mode's codec; foreign glyphs (typed
//! text, another family) count as an empty mask and are overwritten.

use super::buffer::CellBuffer;
use super::cell::Cell;
use super::color::Color;
use super::glyph;
use super::resolution::Resolution;
use crate::util::Pos;

/// Mutable pixel-level access to a [`CellBuffer`] at a fixed density and
/// foreground color.
pub struct PixelView<'a> {
    buf: &'a mut CellBuffer,
    res: Resolution,
    fg: Color,
}

impl<'a> PixelView<'a> {
    pub fn new(buf: &'a mut CellBuffer, res: Resolution, fg: Color) -> Self {
        Self { buf, res, fg }
    }

    pub fn resolution(&self) -> Resolution {
        self.res
    }

    /// Logical extent of the underlying buffer at this density.
    pub fn extent(&self) -> Pos {
        self.res.logical_extent(self.buf.size())
    }

    /// Whether the sub-pixel at `logical` is set in the active foreground.
    ///
    /// A pixel in a cell whose foreground differs from the active color
    /// counts as unset: painting it claims the cell for the active color.
    pub fn is_set(&self, logical: Pos) -> bool {
        let (cell_pos, offset) = self.res.to_cell_and_offset(logical);
        let cell = self.buf.get(cell_pos);
        if cell.is_blank() {
            return false;
        }
        match glyph::decode(self.res, cell.ch) {
            Some(mask) => mask & glyph::bit(self.res, offset) != 0 && cell.fg == self.fg,
            None => false,
        }
    }

    /// Sets the sub-pixel at `logical`, recoloring the cell to the active
    /// foreground.
    pub fn set(&mut self, logical: Pos) {
        self.write(logical, true);
    }

    /// Clears the sub-pixel at `logical`. A cell whose mask empties out
    /// becomes blank.
    pub fn reset(&mut self, logical: Pos) {
        self.write(logical, false);
    }

    /// Rasterizes a straight line from `a` to `b` inclusive (Bresenham),
    /// setting or clearing each pixel along it.
    pub fn line(&mut self, a: Pos, b: Pos, erase: bool) {
        let dx = (b.x - a.x).abs();
        let dy = -(b.y - a.y).abs();
        let sx = if a.x < b.x { 1 } else { -1 };
        let sy = if a.y < b.y { 1 } else { -1 };
        let mut err = dx + dy;
        let mut p = a;

        loop {
            self.write(p, !erase);
            if p == b {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                p.x += sx;
            }
            if e2 <= dx {
                err += dx;
                p.y += sy;
            }
        }
    }

    fn write(&mut self, logical: Pos, on: bool) {
        let extent = self.extent();
        if logical.x < 0 || logical.y < 0 || logical.x >= extent.x || logical.y >= extent.y {
            // The surface contract drops out-of-bounds positions silently.
            return;
        }

        let (cell_pos, offset) = self.res.to_cell_and_offset(logical);
        let cell = self.buf.get(cell_pos);
        let mask = glyph::decode(self.res, cell.ch).unwrap_or(0);
        let bit = glyph::bit(self.res, offset);
        let new_mask = if on { mask | bit } else { mask & !bit };

        let new_cell = if new_mask == 0 {
            Cell::BLANK
        } else {
            Cell {
                ch: glyph::encode(self.res, new_mask),
                fg: self.fg,
                bg: cell.bg,
            }
        };
        self.buf.put(cell_pos, new_cell);
    }
}
