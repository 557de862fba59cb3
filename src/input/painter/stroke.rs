//! Stroke grouping for undo.
//!
//! A stroke spans one continuous pointer drag (button held across move
//! events) or one continuous-painting span. Every mutation inside it joins
//! one undo group, so a single undo reverts the whole stroke.

use crate::canvas::CellBuffer;
use crate::util::Pos;

/// Wraps stroke mutations in exactly one undo group and filters duplicate
/// positions before they reach the active tool.
#[derive(Debug, Default)]
pub struct StrokeCoordinator {
    open: bool,
    last: Option<Pos>,
}

impl StrokeCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a stroke, starting an undo group on the surface. Idempotent:
    /// opening an already-open stroke is a no-op.
    pub fn begin(&mut self, buf: &mut CellBuffer) {
        if !self.open {
            buf.undo_group_start();
            self.open = true;
            self.last = None;
        }
    }

    /// Closes the stroke and its undo group; no-op when none is open.
    pub fn end(&mut self, buf: &mut CellBuffer) {
        if self.open {
            buf.undo_group_end();
            self.open = false;
            self.last = None;
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Duplicate-position suppression: returns whether `pos` differs from
    /// the previously accepted position and should reach the tool.
    ///
    /// Without this, terminals reporting several motion events per cell
    /// would record one undo patch per duplicate event.
    pub fn accept(&mut self, pos: Pos) -> bool {
        if self.last == Some(pos) {
            return false;
        }
        self.last = Some(pos);
        true
    }
}
