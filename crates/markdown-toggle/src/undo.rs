//! Grouped undo/redo history.
//!
//! Every `apply_edits` call on a [`crate::RopeBuffer`] pushes one [`UndoStep`]. Steps pushed
//! while a group is open share its id and are undone/redone together, which is how a
//! multi-cursor toggle becomes a single undo unit.

use crate::edit::TextChange;

/// Default maximum number of steps kept in the undo stack.
///
/// The limit drops whole groups, oldest first, and never touches the newest group, so a
/// single group larger than the limit stays undoable as one unit.
pub const DEFAULT_MAX_UNDO: usize = 1000;

/// One recorded `apply_edits` call.
#[derive(Debug, Clone)]
pub struct UndoStep {
    /// Undo group this step belongs to.
    pub group_id: usize,
    /// Changes in application order.
    pub edits: Vec<TextChange>,
}

impl UndoStep {
    /// Changes that revert this step, in the order they must be applied.
    pub fn inverse_edits(&self) -> Vec<TextChange> {
        self.edits.iter().rev().map(TextChange::inverse).collect()
    }
}

/// Linear undo/redo history with explicit grouping.
#[derive(Debug)]
pub struct UndoHistory {
    undo_stack: Vec<UndoStep>,
    redo_stack: Vec<UndoStep>,
    max_undo: usize,
    /// Clean point tracking. Uses `undo_stack.len()` as the saved position in the linear history.
    /// When `redo_stack` is non-empty, `clean_index` may be greater than `undo_stack.len()`.
    clean_index: Option<usize>,
    next_group_id: usize,
    open_group_id: Option<usize>,
}

impl UndoHistory {
    /// Create an empty history keeping at most `max_undo` steps (see [`DEFAULT_MAX_UNDO`]).
    pub fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo: max_undo.max(1),
            clean_index: Some(0),
            next_group_id: 0,
            open_group_id: None,
        }
    }

    /// Returns `true` if there is a step to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns `true` if there is a step to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of steps (not groups) on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of steps (not groups) on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// The currently open group, if any.
    pub fn current_group_id(&self) -> Option<usize> {
        self.open_group_id
    }

    /// Returns `true` if the history is at the last saved point.
    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.undo_stack.len())
    }

    /// Record the current position as saved.
    pub fn mark_clean(&mut self) {
        self.clean_index = Some(self.undo_stack.len());
    }

    /// Open a group; every step pushed until [`UndoHistory::end_group`] joins it.
    ///
    /// Opening while a group is already open keeps the existing group.
    pub fn begin_group(&mut self) -> usize {
        if let Some(group_id) = self.open_group_id {
            return group_id;
        }
        let group_id = self.allocate_group_id();
        self.open_group_id = Some(group_id);
        group_id
    }

    /// Close the open group, if any.
    pub fn end_group(&mut self) {
        self.open_group_id = None;
    }

    fn allocate_group_id(&mut self) -> usize {
        let group_id = self.next_group_id;
        self.next_group_id = self.next_group_id.wrapping_add(1);
        group_id
    }

    fn clear_redo_and_adjust_clean(&mut self) {
        if self.redo_stack.is_empty() {
            return;
        }

        // If clean point is in redo area, it becomes unreachable after clearing redo.
        if let Some(clean_index) = self.clean_index
            && clean_index > self.undo_stack.len()
        {
            self.clean_index = None;
        }

        self.redo_stack.clear();
    }

    /// Record `edits` as a new step and return its group id.
    pub fn push(&mut self, edits: Vec<TextChange>) -> usize {
        self.clear_redo_and_adjust_clean();

        let group_id = match self.open_group_id {
            Some(group_id) => group_id,
            None => self.allocate_group_id(),
        };

        self.undo_stack.push(UndoStep { group_id, edits });
        self.trim_to_limit();
        group_id
    }

    /// Drop the oldest complete groups until the stack fits `max_undo`.
    fn trim_to_limit(&mut self) {
        while self.undo_stack.len() > self.max_undo {
            let oldest = self.undo_stack[0].group_id;
            if self.undo_stack.last().map(|s| s.group_id) == Some(oldest) {
                break;
            }
            let count = self
                .undo_stack
                .iter()
                .take_while(|step| step.group_id == oldest)
                .count();
            self.undo_stack.drain(..count);

            self.clean_index = match self.clean_index {
                Some(clean_index) if clean_index >= count => Some(clean_index - count),
                _ => None,
            };
        }
    }

    /// Pop every step of the newest undo group, newest first, moving them to the redo stack.
    pub fn pop_undo_group(&mut self) -> Option<Vec<UndoStep>> {
        self.end_group();
        let last_group_id = self.undo_stack.last().map(|s| s.group_id)?;
        let mut steps: Vec<UndoStep> = Vec::new();

        while let Some(step) = self.undo_stack.pop_if(|step| step.group_id == last_group_id) {
            steps.push(step);
        }

        // Same pop order (newest->oldest) so redo pops oldest first.
        self.redo_stack.extend(steps.iter().cloned());
        Some(steps)
    }

    /// Pop every step of the newest redo group, oldest first, moving them back to undo.
    pub fn pop_redo_group(&mut self) -> Option<Vec<UndoStep>> {
        self.end_group();
        let last_group_id = self.redo_stack.last().map(|s| s.group_id)?;
        let mut steps: Vec<UndoStep> = Vec::new();

        while let Some(step) = self.redo_stack.pop_if(|step| step.group_id == last_group_id) {
            steps.push(step);
        }

        self.undo_stack.extend(steps.iter().cloned());
        Some(steps)
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNDO)
    }
}
