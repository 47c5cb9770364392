//! Text buffer adapter.
//!
//! [`TextBuffer`] is the minimal capability set the toggle needs from a host text model:
//! offset/position conversion, range extraction, edit application and undo grouping.
//! [`RopeBuffer`] is the bundled implementation on top of a [`ropey::Rope`].
//!
//! # Units
//!
//! - Offsets are 0-based **UTF-16 code unit** indices into the document.
//! - Positions are 1-based; columns are UTF-16 code units within the line.
//! - Only `'\n'` separates lines. `RopeBuffer` normalizes CRLF/CR input on load.

use crate::edit::{EditOperation, TextChange, TextDelta};
use crate::error::BufferError;
use crate::line_ending::LineEnding;
use crate::position::Position;
use crate::undo::UndoHistory;
use ropey::Rope;

/// Host text model used by the toggle.
///
/// `offset_at` and `position_at` must be mutually inverse over the current content.
pub trait TextBuffer {
    /// Convert a position to an offset, clamping out-of-range positions.
    fn offset_at(&self, position: Position) -> usize;

    /// Convert an offset to a position, clamping out-of-range offsets.
    fn position_at(&self, offset: usize) -> Position;

    /// Text in the half-open offset range `start..end`.
    fn text_in_range(&self, start: usize, end: usize) -> String;

    /// Document length in offset units.
    fn document_length(&self) -> usize;

    /// Column just past the last character of `line` (1-based; an empty line yields `1`).
    fn line_max_column(&self, line: usize) -> usize;

    /// Apply a batch of edits whose ranges all refer to the current (pre-batch) state.
    fn apply_edits(&mut self, edits: &[EditOperation]) -> Result<(), BufferError>;

    /// Open an undo group; edits until [`TextBuffer::end_undo_group`] undo as one unit.
    fn begin_undo_group(&mut self);

    /// Close the undo group opened by [`TextBuffer::begin_undo_group`].
    fn end_undo_group(&mut self);
}

/// Rope-backed [`TextBuffer`] with grouped undo/redo.
///
/// # Example
///
/// ```rust
/// use markdown_toggle::{Position, RopeBuffer, TextBuffer};
///
/// let buffer = RopeBuffer::new("Hello\nWorld");
/// assert_eq!(buffer.line_count(), 2);
/// assert_eq!(buffer.offset_at(Position::new(2, 1)), 6);
/// assert_eq!(buffer.position_at(8), Position::new(2, 3));
/// ```
#[derive(Debug)]
pub struct RopeBuffer {
    rope: Rope,
    line_ending: LineEnding,
    history: UndoHistory,
    last_text_delta: Option<TextDelta>,
}

impl RopeBuffer {
    /// Create a buffer from `text`, normalizing line endings to LF.
    pub fn new(text: &str) -> Self {
        let line_ending = LineEnding::detect_in_text(text);
        let normalized = LineEnding::normalize(text);
        Self {
            rope: Rope::from_str(&normalized),
            line_ending,
            history: UndoHistory::default(),
            last_text_delta: None,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Replace the undo history limit (drops existing history).
    pub fn with_max_undo(mut self, max_undo: usize) -> Self {
        self.history = UndoHistory::new(max_undo);
        self
    }

    /// Complete LF-normalized text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Complete text converted to the detected line ending.
    pub fn text_for_saving(&self) -> String {
        self.line_ending.apply_to_text(&self.text())
    }

    /// Line ending detected on load.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Override the line ending used by [`RopeBuffer::text_for_saving`].
    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Number of logical lines (an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of a 1-based line, excluding the newline.
    pub fn line_text(&self, line: usize) -> Option<String> {
        let (start, end) = self.line_char_bounds(line.checked_sub(1)?)?;
        Some(self.rope.slice(start..end).to_string())
    }

    /// Undo/redo history.
    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// Returns `true` if there is an undo group to revert.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns `true` if there is an undo group to reapply.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns `true` if the document is at the last saved point.
    pub fn is_clean(&self) -> bool {
        self.history.is_clean()
    }

    /// Record the current state as saved.
    pub fn mark_clean(&mut self) {
        self.history.mark_clean();
    }

    /// Delta produced by the most recent edit, undo or redo.
    pub fn last_text_delta(&self) -> Option<&TextDelta> {
        self.last_text_delta.as_ref()
    }

    /// Take the most recent delta, leaving `None`.
    pub fn take_last_text_delta(&mut self) -> Option<TextDelta> {
        self.last_text_delta.take()
    }

    /// Revert the newest undo group. Returns `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&TextDelta> {
        let steps = self.history.pop_undo_group()?;
        let before_len = self.document_length();
        let undo_group_id = steps.first().map(|s| s.group_id);

        let mut edits = Vec::new();
        for step in &steps {
            for change in step.inverse_edits() {
                self.apply_change(&change);
                edits.push(change);
            }
        }

        self.last_text_delta = Some(TextDelta {
            before_len,
            after_len: self.document_length(),
            edits,
            undo_group_id,
        });
        self.last_text_delta.as_ref()
    }

    /// Reapply the newest redo group. Returns `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&TextDelta> {
        let steps = self.history.pop_redo_group()?;
        let before_len = self.document_length();
        let undo_group_id = steps.first().map(|s| s.group_id);

        let mut edits = Vec::new();
        for step in &steps {
            for change in &step.edits {
                self.apply_change(change);
                edits.push(change.clone());
            }
        }

        self.last_text_delta = Some(TextDelta {
            before_len,
            after_len: self.document_length(),
            edits,
            undo_group_id,
        });
        self.last_text_delta.as_ref()
    }

    fn char_at(&self, offset: usize) -> usize {
        self.rope
            .utf16_cu_to_char(offset.min(self.rope.len_utf16_cu()))
    }

    /// Char range of a 0-based line, excluding its trailing newline.
    fn line_char_bounds(&self, line_idx: usize) -> Option<(usize, usize)> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let start = self.rope.line_to_char(line_idx);
        let end = if line_idx + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line_idx + 1) - 1 // -1 for newline
        } else {
            self.rope.len_chars()
        };
        Some((start, end))
    }

    fn apply_change(&mut self, change: &TextChange) {
        let start = self.char_at(change.start);
        let end = (start + change.deleted_text.chars().count()).min(self.rope.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
        if !change.inserted_text.is_empty() {
            self.rope.insert(start, &change.inserted_text);
        }
    }

    fn validate_edits<'a>(
        &self,
        edits: &'a [EditOperation],
    ) -> Result<Vec<&'a EditOperation>, BufferError> {
        let len = self.document_length();
        let mut ops: Vec<&EditOperation> = edits.iter().filter(|e| !e.is_noop()).collect();

        for op in &ops {
            if op.range_start > len {
                return Err(BufferError::InvalidOffset(op.range_start));
            }
            if op.range_start > op.range_end || op.range_end > len {
                return Err(BufferError::InvalidRange {
                    start: op.range_start,
                    end: op.range_end,
                });
            }
        }

        // Stable: inserts at the same offset keep their listed order.
        ops.sort_by_key(|op| (op.range_start, op.range_end));
        for pair in ops.windows(2) {
            if pair[1].range_start < pair[0].range_end {
                return Err(BufferError::OverlappingEdits {
                    first_start: pair[0].range_start,
                    first_end: pair[0].range_end,
                    second_start: pair[1].range_start,
                    second_end: pair[1].range_end,
                });
            }
        }

        Ok(ops)
    }
}

impl Default for RopeBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl TextBuffer for RopeBuffer {
    fn offset_at(&self, position: Position) -> usize {
        if position.line == 0 {
            return 0;
        }
        let Some((start, _)) = self.line_char_bounds(position.line - 1) else {
            return self.document_length();
        };
        let column = position
            .column
            .clamp(1, self.line_max_column(position.line));
        self.rope.char_to_utf16_cu(start) + column - 1
    }

    fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.document_length());
        let char_idx = self.rope.utf16_cu_to_char(offset);
        let line_idx = self.rope.char_to_line(char_idx);
        let line_start = self.rope.char_to_utf16_cu(self.rope.line_to_char(line_idx));
        Position::new(line_idx + 1, offset - line_start + 1)
    }

    fn text_in_range(&self, start: usize, end: usize) -> String {
        let (start, end) = (start.min(end), start.max(end));
        let start = self.char_at(start);
        let end = self.char_at(end);
        self.rope.slice(start..end).to_string()
    }

    fn document_length(&self) -> usize {
        self.rope.len_utf16_cu()
    }

    fn line_max_column(&self, line: usize) -> usize {
        let Some((start, end)) = line
            .checked_sub(1)
            .and_then(|idx| self.line_char_bounds(idx))
        else {
            return 1;
        };
        self.rope.char_to_utf16_cu(end) - self.rope.char_to_utf16_cu(start) + 1
    }

    fn apply_edits(&mut self, edits: &[EditOperation]) -> Result<(), BufferError> {
        let ops = self.validate_edits(edits)?;
        let before_len = self.document_length();

        // Apply back to front so earlier ranges keep their pre-batch offsets.
        let mut changes = Vec::with_capacity(ops.len());
        for op in ops.into_iter().rev() {
            let change = TextChange {
                start: op.range_start,
                deleted_text: self.text_in_range(op.range_start, op.range_end),
                inserted_text: op.replacement.clone(),
            };
            self.apply_change(&change);
            changes.push(change);
        }

        let undo_group_id = if changes.is_empty() {
            None
        } else {
            Some(self.history.push(changes.clone()))
        };

        self.last_text_delta = Some(TextDelta {
            before_len,
            after_len: self.document_length(),
            edits: changes,
            undo_group_id,
        });
        Ok(())
    }

    fn begin_undo_group(&mut self) {
        self.history.begin_group();
    }

    fn end_undo_group(&mut self) {
        self.history.end_group();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_position_round_trip() {
        let buffer = RopeBuffer::new("ABC\nDEF\nGHI");
        for offset in 0..=buffer.document_length() {
            let pos = buffer.position_at(offset);
            assert_eq!(buffer.offset_at(pos), offset, "offset {offset} via {pos:?}");
        }
        assert_eq!(buffer.position_at(4), Position::new(2, 1));
        assert_eq!(buffer.position_at(3), Position::new(1, 4));
    }

    #[test]
    fn test_offsets_count_utf16_units() {
        let buffer = RopeBuffer::new("a😀b\n你好");
        assert_eq!(buffer.document_length(), 7);
        assert_eq!(buffer.line_max_column(1), 5);
        assert_eq!(buffer.offset_at(Position::new(1, 4)), 3);
        assert_eq!(buffer.text_in_range(1, 3), "😀");
        assert_eq!(buffer.position_at(6), Position::new(2, 2));
    }

    #[test]
    fn test_out_of_range_positions_are_clamped() {
        let buffer = RopeBuffer::new("abc\nde");
        assert_eq!(buffer.offset_at(Position::new(0, 5)), 0);
        assert_eq!(buffer.offset_at(Position::new(1, 99)), 3);
        assert_eq!(buffer.offset_at(Position::new(1, 0)), 0);
        assert_eq!(buffer.offset_at(Position::new(9, 1)), 6);
        assert_eq!(buffer.position_at(100), Position::new(2, 3));
    }

    #[test]
    fn test_line_max_column() {
        let buffer = RopeBuffer::new("hello\n\nx");
        assert_eq!(buffer.line_max_column(1), 6);
        assert_eq!(buffer.line_max_column(2), 1);
        assert_eq!(buffer.line_max_column(3), 2);
        assert_eq!(buffer.line_max_column(4), 1);
    }

    #[test]
    fn test_apply_edits_uses_pre_batch_offsets() {
        let mut buffer = RopeBuffer::new("hello world");
        buffer
            .apply_edits(&[
                EditOperation::insert(6, "**"),
                EditOperation::insert(11, "**"),
            ])
            .unwrap();
        assert_eq!(buffer.text(), "hello **world**");

        let delta = buffer.last_text_delta().unwrap();
        assert_eq!(delta.before_len, 11);
        assert_eq!(delta.after_len, 15);
        // Applied back to front.
        assert_eq!(delta.edits[0].start, 11);
    }

    #[test]
    fn test_apply_edits_rejects_bad_ranges() {
        let mut buffer = RopeBuffer::new("abc");
        assert_eq!(
            buffer.apply_edits(&[EditOperation::delete(2, 9)]),
            Err(BufferError::InvalidRange { start: 2, end: 9 })
        );
        assert_eq!(
            buffer.apply_edits(&[EditOperation::insert(7, "x")]),
            Err(BufferError::InvalidOffset(7))
        );
        assert!(matches!(
            buffer.apply_edits(&[EditOperation::delete(0, 2), EditOperation::delete(1, 3)]),
            Err(BufferError::OverlappingEdits { .. })
        ));
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn test_noop_edits_do_not_touch_history() {
        let mut buffer = RopeBuffer::new("abc");
        buffer.apply_edits(&[EditOperation::delete(1, 1)]).unwrap();
        assert!(!buffer.can_undo());
        assert!(buffer.last_text_delta().unwrap().is_empty());
    }

    #[test]
    fn test_grouped_undo_redo() {
        let mut buffer = RopeBuffer::new("a b");
        buffer.begin_undo_group();
        buffer.apply_edits(&[EditOperation::replace(2, 3, "_b_")]).unwrap();
        buffer.apply_edits(&[EditOperation::replace(0, 1, "_a_")]).unwrap();
        buffer.end_undo_group();
        assert_eq!(buffer.text(), "_a_ _b_");

        let delta = buffer.undo().unwrap();
        assert_eq!(delta.edits.len(), 2);
        assert_eq!(buffer.text(), "a b");
        assert!(buffer.undo().is_none());

        buffer.redo().unwrap();
        assert_eq!(buffer.text(), "_a_ _b_");
    }

    #[test]
    fn test_crlf_is_normalized_and_restored() {
        let buffer = RopeBuffer::new("a\r\nb\r\n");
        assert_eq!(buffer.text(), "a\nb\n");
        assert_eq!(buffer.line_ending(), LineEnding::Crlf);
        assert_eq!(buffer.text_for_saving(), "a\r\nb\r\n");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.line_text(2).as_deref(), Some("b"));
    }

    #[test]
    fn test_set_line_ending_changes_saved_text() {
        let mut buffer = RopeBuffer::new("a\nb");
        assert_eq!(buffer.text_for_saving(), "a\nb");
        buffer.set_line_ending(LineEnding::Crlf);
        assert_eq!(buffer.text_for_saving(), "a\r\nb");
        assert_eq!(buffer.text(), "a\nb");
    }

    #[test]
    fn test_take_last_text_delta() {
        let mut buffer = RopeBuffer::new("ab");
        assert!(buffer.take_last_text_delta().is_none());

        buffer.apply_edits(&[EditOperation::insert(1, "x")]).unwrap();
        let delta = buffer.take_last_text_delta().unwrap();
        assert_eq!(delta.edits[0].inserted_text, "x");
        assert_eq!(delta.after_len, 3);
        assert!(buffer.last_text_delta().is_none());
    }
}
