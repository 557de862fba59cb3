//! Mouse dispatch: strokes, drags and flood fill.

use log::debug;

use crate::input::events::{Buttons, MouseButton};
use crate::util::Pos;

use super::core::{ActiveTool, Painter};

impl Painter {
    /// Processes a mouse button press at a terminal cell.
    ///
    /// A left press opens a stroke and commits at the press position via
    /// the active tool; for the path tool it re-seeds the cursor set
    /// instead.
    pub fn on_mouse_press(&mut self, button: MouseButton, cell: Pos) {
        if button != MouseButton::Left {
            return;
        }
        let revision = self.buffer.revision();
        self.press_mark = Some((self.buffer.undo_depth(), revision));

        let old = self.pos;
        self.pos = self.logical_for_cell(cell);
        if self.pos != old {
            self.tick_position(old);
        }

        self.stroke.begin(&mut self.buffer);
        if self.stroke.accept(self.pos) {
            self.commit_click(cell);
        }
        self.needs_redraw = true;
        self.note_mutations(revision);
    }

    /// Processes mouse motion. The position always follows the pointer;
    /// with the left button held the motion extends the current stroke,
    /// with duplicate positions dropped before they reach the tool.
    pub fn on_mouse_motion(&mut self, cell: Pos, buttons: Buttons) {
        let revision = self.buffer.revision();

        let old = self.pos;
        let logical = self.logical_for_cell(cell);
        if logical != old {
            self.pos = logical;
            self.tick_position(old);
            self.needs_redraw = true;
        }

        if buttons.contains(Buttons::LEFT) {
            // A drag can enter the canvas mid-gesture; opening here is
            // idempotent.
            self.stroke.begin(&mut self.buffer);
            if self.stroke.accept(self.pos) {
                if let ActiveTool::Paint(brush) | ActiveTool::Erase(brush) = &mut self.tool {
                    brush.set_point(&mut self.buffer, self.resolution, self.fg, self.pos, false);
                }
            }
        }

        self.note_mutations(revision);
    }

    /// Processes a mouse button release, closing the open stroke.
    pub fn on_mouse_release(&mut self, button: MouseButton, _cell: Pos) {
        if button != MouseButton::Left {
            return;
        }
        self.stroke.end(&mut self.buffer);
    }

    /// Processes a double-click: flood fill at the clicked cell.
    ///
    /// The first click of the pair already committed a pixel; if it
    /// recorded anything it is retracted first, so the fill sees the
    /// region as it was before the gesture.
    pub fn on_mouse_double_click(&mut self, cell: Pos) {
        let revision = self.buffer.revision();

        if let Some((depth, rev)) = self.press_mark.take() {
            if self.buffer.revision() != rev && self.buffer.undo_depth() > depth {
                debug!("retracting single-click commit before flood fill");
                self.buffer.undo();
            }
        }
        self.flood_fill_at(cell);
        self.note_mutations(revision);
    }

    fn commit_click(&mut self, cell: Pos) {
        match &mut self.tool {
            ActiveTool::Paint(brush) | ActiveTool::Erase(brush) => {
                brush.set_point(&mut self.buffer, self.resolution, self.fg, self.pos, false);
            }
            ActiveTool::PathType(tool) => {
                tool.toggle_point(&self.buffer, cell);
            }
        }
    }
}
