//! Path-following text typing.
//!
//! Lets free-form typed text follow a pre-existing drawn path: activated on
//! a solid (full-block) cell it walks the path cell by cell; activated on
//! anything else it types along a straight line in the current movement
//! direction. Every keystroke lands on all active cursors, which lets text
//! branch where the path branches; at ambiguous junctions this can
//! duplicate characters; that is documented behavior rather than a defect.

use log::debug;

use crate::canvas::{Cell, CellBuffer, Color, FULL_BLOCK};
use crate::util::Pos;

/// Whether cursors advance along a straight line or follow drawn cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    Line,
    Path,
}

/// Cell-space typing tool. Operates on whole cells whatever the active
/// painting resolution, since glyphs occupy whole cells.
#[derive(Debug)]
pub struct PathTypeTool {
    mode: PathMode,
    /// Unit delta applied to cursors in line mode.
    direction: Pos,
    /// Direction at the previous position tick, used for the single-cursor
    /// retraction rule.
    prev_direction: Option<Pos>,
    /// Cell positions eligible to receive the next typed character.
    cursors: Vec<Pos>,
    /// Undo stack of (position, previous cell) pairs for character-level
    /// backspace.
    rendered: Vec<(Pos, Cell)>,
}

impl Default for PathTypeTool {
    fn default() -> Self {
        Self::new()
    }
}

impl PathTypeTool {
    pub fn new() -> Self {
        Self {
            mode: PathMode::Line,
            direction: Pos::new(1, 0),
            prev_direction: None,
            cursors: Vec::new(),
            rendered: Vec::new(),
        }
    }

    pub fn mode(&self) -> PathMode {
        self.mode
    }

    pub fn cursors(&self) -> &[Pos] {
        &self.cursors
    }

    /// Tool activation hook.
    pub fn start(&mut self) {
        debug!("path-type tool started");
    }

    /// Tool deactivation hook; drops cursors and the backspace stack.
    pub fn stop(&mut self) {
        self.cursors.clear();
        self.rendered.clear();
        self.prev_direction = None;
    }

    /// Seeds the cursor set at `cell`. Clicking a solid path cell enters
    /// path-following mode, anything else line mode.
    pub fn toggle_point(&mut self, buf: &CellBuffer, cell: Pos) {
        self.mode = if buf.get(cell).ch == FULL_BLOCK {
            PathMode::Path
        } else {
            PathMode::Line
        };
        self.cursors = vec![cell];
        self.prev_direction = None;
        debug!("path-type seeded at {cell:?} in {:?} mode", self.mode);
    }

    /// Position-change tick: re-derives the typing direction from the cell
    /// delta and advances the cursors.
    ///
    /// With a single line-mode cursor and an unchanged direction, the cursor
    /// first retracts one step so position-driven advances stay neutral;
    /// when the direction just changed the plain advance turns the corner
    /// without skipping a cell.
    pub fn position_changed(&mut self, buf: &CellBuffer, old_cell: Pos, new_cell: Pos) {
        if old_cell == new_cell {
            return;
        }
        let direction = old_cell.step_toward(new_cell);
        if self.mode == PathMode::Line && self.cursors.len() == 1 {
            if let Some(prev) = self.prev_direction {
                if prev == direction {
                    let retracted = self.cursors[0] - prev;
                    self.cursors[0] = retracted;
                }
            }
        }
        self.prev_direction = Some(direction);
        self.direction = direction;
        self.advance(buf);
    }

    /// Writes `ch` at every active cursor (or at `fallback` when none is
    /// active), recording each overwritten cell for backspace, then
    /// advances the cursors.
    pub fn handle_char(&mut self, buf: &mut CellBuffer, fg: Color, fallback: Pos, ch: char) {
        if self.cursors.is_empty() {
            self.cursors.push(fallback);
        }
        for &cursor in &self.cursors {
            if !buf.contains(cursor) {
                continue;
            }
            self.rendered.push((cursor, buf.get(cursor)));
            buf.put(cursor, Cell::glyph(ch, fg));
        }
        self.advance(buf);
    }

    /// Restores the most recently typed cell and collapses the cursor set
    /// onto it. Returns whether anything was restored.
    pub fn backspace(&mut self, buf: &mut CellBuffer) -> bool {
        match self.rendered.pop() {
            Some((pos, cell)) => {
                buf.put(pos, cell);
                self.cursors = vec![pos];
                true
            }
            None => false,
        }
    }

    /// Moves every cursor one step: by the current direction in line mode,
    /// onto qualifying neighbor cells in path mode.
    ///
    /// Path mode examines the 8 neighbors of each cursor for the full-block
    /// marker. Orthogonal neighbors win over diagonal ones, so a stepped
    /// line does not fork into two cursors at a corner; diagonals are used
    /// only when no orthogonal neighbor qualifies. The union over all
    /// cursors, deduplicated, becomes the new cursor set.
    fn advance(&mut self, buf: &CellBuffer) {
        match self.mode {
            PathMode::Line => {
                let direction = self.direction;
                for cursor in &mut self.cursors {
                    *cursor = *cursor + direction;
                }
            }
            PathMode::Path => {
                let mut next: Vec<Pos> = Vec::new();
                for &cursor in &self.cursors {
                    let mut orthogonal = Vec::new();
                    let mut diagonal = Vec::new();
                    for dy in -1..=1 {
                        for dx in -1..=1 {
                            if dx == 0 && dy == 0 {
                                continue;
                            }
                            let neighbor = cursor.offset(dx, dy);
                            if buf.get(neighbor).ch == FULL_BLOCK {
                                if dx == 0 || dy == 0 {
                                    orthogonal.push(neighbor);
                                } else {
                                    diagonal.push(neighbor);
                                }
                            }
                        }
                    }
                    let chosen = if orthogonal.is_empty() {
                        diagonal
                    } else {
                        orthogonal
                    };
                    for neighbor in chosen {
                        if !next.contains(&neighbor) {
                            next.push(neighbor);
                        }
                    }
                }
                self.cursors = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::color::RED;

    fn path_buffer(cells: &[(i32, i32)]) -> CellBuffer {
        let mut buf = CellBuffer::new(12, 12);
        for &(x, y) in cells {
            buf.put(Pos::new(x, y), Cell::glyph(FULL_BLOCK, RED));
        }
        buf
    }

    #[test]
    fn seeding_on_solid_cell_selects_path_mode() {
        let buf = path_buffer(&[(3, 3)]);
        let mut tool = PathTypeTool::new();
        tool.toggle_point(&buf, Pos::new(3, 3));
        assert_eq!(tool.mode(), PathMode::Path);

        tool.toggle_point(&buf, Pos::new(5, 5));
        assert_eq!(tool.mode(), PathMode::Line);
    }

    #[test]
    fn typing_writes_at_cursor_and_advances() {
        let mut buf = CellBuffer::new(12, 12);
        let mut tool = PathTypeTool::new();
        tool.toggle_point(&buf, Pos::new(2, 2));

        tool.handle_char(&mut buf, RED, Pos::new(2, 2), 'h');
        tool.handle_char(&mut buf, RED, Pos::new(2, 2), 'i');

        assert_eq!(buf.get(Pos::new(2, 2)).ch, 'h');
        assert_eq!(buf.get(Pos::new(3, 2)).ch, 'i');
        assert_eq!(tool.cursors(), &[Pos::new(4, 2)]);
    }

    #[test]
    fn typing_with_no_cursor_falls_back_to_the_given_position() {
        let mut buf = CellBuffer::new(12, 12);
        let mut tool = PathTypeTool::new();
        tool.handle_char(&mut buf, RED, Pos::new(5, 5), 'a');
        assert_eq!(buf.get(Pos::new(5, 5)).ch, 'a');
        assert_eq!(tool.cursors(), &[Pos::new(6, 5)]);
    }

    #[test]
    fn path_advance_prefers_orthogonal_neighbors() {
        // Cursor at (5, 5); solid cells to the right (orthogonal) and
        // down-right (diagonal).
        let buf = path_buffer(&[(6, 5), (6, 6)]);
        let mut tool = PathTypeTool::new();
        tool.cursors = vec![Pos::new(5, 5)];
        tool.mode = PathMode::Path;

        tool.advance(&buf);
        assert_eq!(tool.cursors(), &[Pos::new(6, 5)]);
    }

    #[test]
    fn path_advance_uses_diagonals_when_no_orthogonal_qualifies() {
        let buf = path_buffer(&[(6, 6)]);
        let mut tool = PathTypeTool::new();
        tool.cursors = vec![Pos::new(5, 5)];
        tool.mode = PathMode::Path;

        tool.advance(&buf);
        assert_eq!(tool.cursors(), &[Pos::new(6, 6)]);
    }

    #[test]
    fn typing_follows_a_drawn_path() {
        // Horizontal path from (2, 4) to (6, 4).
        let mut buf = path_buffer(&[(2, 4), (3, 4), (4, 4), (5, 4), (6, 4)]);
        let mut tool = PathTypeTool::new();
        tool.toggle_point(&buf, Pos::new(2, 4));
        assert_eq!(tool.mode(), PathMode::Path);

        for ch in "word".chars() {
            tool.handle_char(&mut buf, RED, Pos::new(2, 4), ch);
        }
        assert_eq!(buf.get(Pos::new(2, 4)).ch, 'w');
        assert_eq!(buf.get(Pos::new(3, 4)).ch, 'o');
        assert_eq!(buf.get(Pos::new(4, 4)).ch, 'r');
        assert_eq!(buf.get(Pos::new(5, 4)).ch, 'd');
        // The rest of the path is untouched.
        assert_eq!(buf.get(Pos::new(6, 4)).ch, FULL_BLOCK);
    }

    #[test]
    fn branching_path_replicates_keystrokes() {
        // A fork: the path continues both up-right and down-right.
        let mut buf = path_buffer(&[(4, 4), (5, 3), (5, 5)]);
        let mut tool = PathTypeTool::new();
        tool.toggle_point(&buf, Pos::new(4, 4));

        tool.handle_char(&mut buf, RED, Pos::new(4, 4), 'a');
        assert_eq!(tool.cursors().len(), 2);

        tool.handle_char(&mut buf, RED, Pos::new(4, 4), 'b');
        assert_eq!(buf.get(Pos::new(5, 3)).ch, 'b');
        assert_eq!(buf.get(Pos::new(5, 5)).ch, 'b');
    }

    #[test]
    fn backspace_restores_glyph_and_collapses_cursors() {
        let mut buf = path_buffer(&[(2, 2)]);
        let mut tool = PathTypeTool::new();
        tool.toggle_point(&buf, Pos::new(2, 2));

        tool.handle_char(&mut buf, RED, Pos::new(2, 2), 'z');
        assert_eq!(buf.get(Pos::new(2, 2)).ch, 'z');

        assert!(tool.backspace(&mut buf));
        assert_eq!(buf.get(Pos::new(2, 2)).ch, FULL_BLOCK);
        assert_eq!(tool.cursors(), &[Pos::new(2, 2)]);
        assert!(!tool.backspace(&mut buf));
    }

    #[test]
    fn stable_direction_keeps_single_line_cursor_neutral() {
        let buf = CellBuffer::new(12, 12);
        let mut tool = PathTypeTool::new();
        tool.toggle_point(&buf, Pos::new(3, 3));

        // First tick establishes the direction and advances once.
        tool.position_changed(&buf, Pos::new(3, 3), Pos::new(4, 3));
        assert_eq!(tool.cursors(), &[Pos::new(4, 3)]);

        // A second tick in the same direction retracts before advancing.
        tool.position_changed(&buf, Pos::new(4, 3), Pos::new(5, 3));
        assert_eq!(tool.cursors(), &[Pos::new(4, 3)]);

        // Changing direction advances without retraction.
        tool.position_changed(&buf, Pos::new(5, 3), Pos::new(5, 4));
        assert_eq!(tool.cursors(), &[Pos::new(4, 4)]);
    }
}
