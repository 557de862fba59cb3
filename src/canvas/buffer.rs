//! The cell buffer: the drawing surface at character-cell granularity.
//!
//! Owns the cell grid and its undo log. All mutation funnels through
//! [`CellBuffer::put`], which records patches and bumps the revision counter
//! the controller uses to derive its dirty flag. Sub-cell painting goes
//! through [`super::view::PixelView`], which layers a density on top of this
//! buffer.

use log::debug;

use super::cell::Cell;
use super::undo::{CellPatch, UndoLog};
use crate::util::Pos;

/// Grid of terminal cells with grouped undo/redo.
#[derive(Debug)]
pub struct CellBuffer {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    history: UndoLog,
    revision: u64,
}

impl CellBuffer {
    /// Creates a blank buffer of `width` x `height` cells.
    ///
    /// Dimensions must be positive; they come pre-clamped from config
    /// validation or the terminal size.
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(1) * height.max(1)) as usize;
        Self {
            width: width.max(1),
            height: height.max(1),
            cells: vec![Cell::BLANK; len],
            history: UndoLog::new(),
            revision: 0,
        }
    }

    /// Creates a buffer pre-populated with `cells`, without recording
    /// history. Used when restoring a snapshot; out-of-bounds entries are
    /// dropped.
    pub fn with_contents(
        width: i32,
        height: i32,
        cells: impl IntoIterator<Item = (Pos, Cell)>,
    ) -> Self {
        let mut buf = Self::new(width, height);
        for (pos, cell) in cells {
            if buf.contains(pos) {
                let index = buf.index(pos);
                buf.cells[index] = cell;
            }
        }
        buf
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Cell extent as a [`Pos`].
    pub fn size(&self) -> Pos {
        Pos::new(self.width, self.height)
    }

    /// Monotonic mutation counter. Every recorded cell change bumps it;
    /// undo and redo bump it too, since they also change visible state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether `cell` addresses a cell inside the buffer.
    pub fn contains(&self, cell: Pos) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Reads the cell at `cell`. Out-of-bounds reads return a blank cell;
    /// the surface contract rejects out-of-bounds positions silently.
    pub fn get(&self, cell: Pos) -> Cell {
        if self.contains(cell) {
            self.cells[self.index(cell)]
        } else {
            Cell::BLANK
        }
    }

    /// Writes the cell at `cell`, recording the change for undo.
    ///
    /// Out-of-bounds writes and writes of the current value are dropped
    /// silently; the latter keeps duplicate events from polluting undo
    /// groups.
    pub fn put(&mut self, cell: Pos, value: Cell) {
        if !self.contains(cell) {
            return;
        }
        let index = self.index(cell);
        let before = self.cells[index];
        if before == value {
            return;
        }
        self.cells[index] = value;
        self.history.record(CellPatch {
            index,
            before,
            after: value,
        });
        self.revision += 1;
    }

    /// Opens an undo group; all subsequent `put`s join it until
    /// [`undo_group_end`](Self::undo_group_end). Idempotent.
    pub fn undo_group_start(&mut self) {
        self.history.group_start();
    }

    /// Closes the open undo group; no-op when none is open.
    pub fn undo_group_end(&mut self) {
        self.history.group_end();
    }

    /// Whether an undo group is currently open.
    pub fn undo_group_open(&self) -> bool {
        self.history.group_open()
    }

    /// Reverts the most recent undo group. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_undo() {
            Some(group) => {
                for patch in group.iter().rev() {
                    self.cells[patch.index] = patch.before;
                }
                self.revision += 1;
                debug!("undo: reverted {} cell(s)", group.len());
                true
            }
            None => false,
        }
    }

    /// Re-applies the most recently undone group. Returns whether anything
    /// changed.
    pub fn redo(&mut self) -> bool {
        match self.history.pop_redo() {
            Some(group) => {
                for patch in &group {
                    self.cells[patch.index] = patch.after;
                }
                self.revision += 1;
                debug!("redo: re-applied {} cell(s)", group.len());
                true
            }
            None => false,
        }
    }

    /// Number of stored undo groups (test and status surface).
    pub fn undo_depth(&self) -> usize {
        self.history.depth()
    }

    /// Blanks the whole canvas as a single undo group.
    pub fn clear(&mut self) {
        self.undo_group_start();
        for y in 0..self.height {
            for x in 0..self.width {
                self.put(Pos::new(x, y), Cell::BLANK);
            }
        }
        self.undo_group_end();
    }

    /// Copies every non-blank cell of `source` into this buffer at
    /// `origin`. Cells falling outside the buffer are dropped.
    pub fn blit(&mut self, origin: Pos, source: &CellBuffer) {
        for y in 0..source.height {
            for x in 0..source.width {
                let cell = source.get(Pos::new(x, y));
                if !cell.is_blank() {
                    self.put(Pos::new(origin.x + x, origin.y + y), cell);
                }
            }
        }
    }

    /// Flood-fills the connected region of cells equal to the seed cell
    /// with `fill`, using 4-connectivity.
    ///
    /// A no-op when the seed already equals `fill` or lies out of bounds.
    pub fn floodfill(&mut self, seed: Pos, fill: Cell) {
        if !self.contains(seed) {
            return;
        }
        let target = self.get(seed);
        if target == fill {
            return;
        }

        let mut frontier = vec![seed];
        while let Some(cell) = frontier.pop() {
            if !self.contains(cell) || self.get(cell) != target {
                continue;
            }
            self.put(cell, fill);
            frontier.push(cell.offset(1, 0));
            frontier.push(cell.offset(-1, 0));
            frontier.push(cell.offset(0, 1));
            frontier.push(cell.offset(0, -1));
        }
    }

    /// Iterates rows of cells, top to bottom. Used by the renderer and the
    /// exporters.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    fn index(&self, cell: Pos) -> usize {
        (cell.y * self.width + cell.x) as usize
    }
}
