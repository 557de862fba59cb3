//! Grouped undo/redo log for cell mutations.
//!
//! Mutations are recorded as cell patches. While a group is open every patch
//! joins it; a mutation outside any group forms its own single-patch group,
//! so isolated commits stay individually undoable while a whole stroke
//! reverts in one step.

use super::cell::Cell;

/// Default cap on stored undo groups.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// One recorded cell mutation.
#[derive(Debug, Clone, Copy)]
pub struct CellPatch {
    /// Index into the buffer's cell vector.
    pub index: usize,
    /// Cell value before the mutation.
    pub before: Cell,
    /// Cell value after the mutation.
    pub after: Cell,
}

/// Undo/redo stacks of patch groups.
#[derive(Debug)]
pub struct UndoLog {
    undo: Vec<Vec<CellPatch>>,
    redo: Vec<Vec<CellPatch>>,
    open: Option<Vec<CellPatch>>,
    limit: usize,
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoLog {
    pub fn new() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            open: None,
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Opens a patch group. Idempotent: a second open while one group is
    /// active is a no-op, so nested stroke-opens collapse into one group.
    pub fn group_start(&mut self) {
        if self.open.is_none() {
            self.open = Some(Vec::new());
        }
    }

    /// Closes the open group, if any. Groups that recorded nothing are
    /// dropped instead of producing empty undo entries.
    pub fn group_end(&mut self) {
        if let Some(group) = self.open.take() {
            if !group.is_empty() {
                self.push_group(group);
            }
        }
    }

    /// Whether a group is currently open.
    pub fn group_open(&self) -> bool {
        self.open.is_some()
    }

    /// Records one mutation, either into the open group or as its own group.
    ///
    /// Any new mutation invalidates the redo stack.
    pub fn record(&mut self, patch: CellPatch) {
        self.redo.clear();
        match &mut self.open {
            Some(group) => group.push(patch),
            None => self.push_group(vec![patch]),
        }
    }

    /// Reverts the most recent group. Returns the patches to apply
    /// (callers write `before` values back), or `None` when nothing is left.
    pub fn pop_undo(&mut self) -> Option<Vec<CellPatch>> {
        // An open group is sealed first so undo during a stroke cannot
        // interleave with its patches.
        self.group_end();
        let group = self.undo.pop()?;
        self.redo.push(group.clone());
        Some(group)
    }

    /// Re-applies the most recently undone group (callers write `after`
    /// values back), or `None` when the redo stack is empty.
    pub fn pop_redo(&mut self) -> Option<Vec<CellPatch>> {
        let group = self.redo.pop()?;
        self.undo.push(group.clone());
        Some(group)
    }

    /// Number of stored undo groups.
    pub fn depth(&self) -> usize {
        self.undo.len()
    }

    fn push_group(&mut self, group: Vec<CellPatch>) {
        if self.limit > 0 && self.undo.len() >= self.limit {
            self.undo.remove(0);
        }
        self.undo.push(group);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::color::RED;

    fn patch(index: usize) -> CellPatch {
        CellPatch {
            index,
            before: Cell::BLANK,
            after: Cell::glyph('█', RED),
        }
    }

    #[test]
    fn ungrouped_mutations_form_single_patch_groups() {
        let mut log = UndoLog::new();
        log.record(patch(0));
        log.record(patch(1));
        assert_eq!(log.depth(), 2);

        let group = log.pop_undo().unwrap();
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].index, 1);
    }

    #[test]
    fn grouped_mutations_revert_together() {
        let mut log = UndoLog::new();
        log.group_start();
        log.record(patch(0));
        log.record(patch(1));
        log.record(patch(2));
        log.group_end();

        assert_eq!(log.depth(), 1);
        assert_eq!(log.pop_undo().unwrap().len(), 3);
        assert!(log.pop_undo().is_none());
    }

    #[test]
    fn nested_group_start_is_idempotent() {
        let mut log = UndoLog::new();
        log.group_start();
        log.group_start();
        log.record(patch(0));
        log.group_end();
        assert_eq!(log.depth(), 1);
        assert!(!log.group_open());
    }

    #[test]
    fn empty_groups_leave_no_undo_entry() {
        let mut log = UndoLog::new();
        log.group_start();
        log.group_end();
        assert_eq!(log.depth(), 0);
    }

    #[test]
    fn new_mutation_clears_redo() {
        let mut log = UndoLog::new();
        log.record(patch(0));
        log.pop_undo().unwrap();
        assert!(log.pop_redo().is_some());

        log.pop_undo();
        log.record(patch(1));
        assert!(log.pop_redo().is_none());
    }

    #[test]
    fn history_is_bounded() {
        let mut log = UndoLog::new();
        log.limit = 4;
        for i in 0..10 {
            log.record(patch(i));
        }
        assert_eq!(log.depth(), 4);
        // The oldest entries were dropped; the newest survives.
        assert_eq!(log.pop_undo().unwrap()[0].index, 9);
    }
}
