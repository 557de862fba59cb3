//! The paint and erase brushes.
//!
//! Both tools share one state machine; an explicit polarity flag decides
//! whether commits set or clear pixels. The toggle operation is polarity
//! independent, since the read of the current pixel already decides the
//! direction.

use log::debug;

use crate::canvas::{CellBuffer, Color, PixelView, Resolution};
use crate::util::Pos;

/// Pixel brush over a density-scoped view of the canvas.
#[derive(Debug)]
pub struct BrushTool {
    /// Commit polarity: `false` paints, `true` erases.
    erase: bool,
    /// Last committed position, the interpolation source for line drawing.
    /// Absent until the first commit of a stroke.
    anchor: Option<Pos>,
    /// Sticky continuous-painting flag: while on, every cursor movement
    /// commits a trail at the position it left.
    continuous: bool,
}

impl BrushTool {
    pub fn new(erase: bool) -> Self {
        Self {
            erase,
            anchor: None,
            continuous: false,
        }
    }

    pub fn is_erase(&self) -> bool {
        self.erase
    }

    pub fn continuous(&self) -> bool {
        self.continuous
    }

    pub fn anchor(&self) -> Option<Pos> {
        self.anchor
    }

    /// Tool activation hook.
    pub fn start(&mut self) {
        debug!("brush started (erase: {})", self.erase);
    }

    /// Tool deactivation hook; drops per-stroke memory.
    pub fn stop(&mut self) {
        self.reset();
        self.continuous = false;
    }

    /// Clears the interpolation anchor (new stroke, mode toggle).
    pub fn reset(&mut self) {
        self.anchor = None;
    }

    /// Reads the pixel under `pos` and inverts it: unset pixels are
    /// committed (and become the new anchor), set pixels are cleared
    /// (anchor untouched).
    pub fn toggle_point(&mut self, buf: &mut CellBuffer, res: Resolution, fg: Color, pos: Pos) {
        let mut view = PixelView::new(buf, res, fg);
        if view.is_set(pos) {
            view.reset(pos);
        } else {
            view.set(pos);
            self.anchor = Some(pos);
        }
    }

    /// Commits at `pos`. With `interpolate` and a present anchor, draws the
    /// full segment from the anchor instead and clears the anchor;
    /// otherwise commits a single pixel and `pos` becomes the new anchor.
    pub fn set_point(
        &mut self,
        buf: &mut CellBuffer,
        res: Resolution,
        fg: Color,
        pos: Pos,
        interpolate: bool,
    ) {
        let mut view = PixelView::new(buf, res, fg);
        match self.anchor {
            Some(anchor) if interpolate => {
                view.line(anchor, pos, self.erase);
                self.anchor = None;
            }
            _ => {
                if self.erase {
                    view.reset(pos);
                } else {
                    view.set(pos);
                }
                self.anchor = Some(pos);
            }
        }
    }

    /// Position-change tick: while continuous painting is on, leaving a
    /// position commits at it, painting a trail as the cursor moves.
    pub fn position_changed(
        &mut self,
        buf: &mut CellBuffer,
        res: Resolution,
        fg: Color,
        old: Pos,
        new: Pos,
    ) {
        if self.continuous && old != new {
            self.set_point(buf, res, fg, old, false);
        }
    }

    /// Flips the sticky continuous-painting flag, clearing the anchor.
    /// Returns the new state.
    pub fn toggle_continuous(&mut self) -> bool {
        self.continuous = !self.continuous;
        self.anchor = None;
        debug!("continuous painting: {}", self.continuous);
        self.continuous
    }
}
