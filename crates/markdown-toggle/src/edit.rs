//! Edit operations and structured change records.
//!
//! All offsets in this module are **UTF-16 code unit** offsets into the document, the same
//! unit [`crate::TextBuffer`] uses for every offset it hands out.

/// A single replacement request against the current buffer state.
///
/// Replaces the half-open range `range_start..range_end` with `replacement`. An empty
/// replacement deletes; an empty range inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Inclusive start offset.
    pub range_start: usize,
    /// Exclusive end offset.
    pub range_end: usize,
    /// Text written in place of the range.
    pub replacement: String,
}

impl EditOperation {
    /// Insert `text` at `offset`.
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            range_start: offset,
            range_end: offset,
            replacement: text.into(),
        }
    }

    /// Delete `start..end`.
    pub fn delete(start: usize, end: usize) -> Self {
        Self {
            range_start: start,
            range_end: end,
            replacement: String::new(),
        }
    }

    /// Replace `start..end` with `text`.
    pub fn replace(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            range_start: start,
            range_end: end,
            replacement: text.into(),
        }
    }

    /// Returns `true` if applying this edit cannot change the document.
    pub fn is_noop(&self) -> bool {
        self.range_start == self.range_end && self.replacement.is_empty()
    }
}

/// A single applied edit.
///
/// Semantics:
/// - `start` is an offset in the document **at the time this change is applied**.
/// - The deleted range is defined by the UTF-16 length of `deleted_text`.
/// - Changes inside a [`TextDelta`] must be applied **in order** to transform the "before"
///   document into the "after" document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    /// Start offset of the change.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextChange {
    /// Length of `deleted_text` in UTF-16 code units.
    pub fn deleted_len(&self) -> usize {
        utf16_len(&self.deleted_text)
    }

    /// Length of `inserted_text` in UTF-16 code units.
    pub fn inserted_len(&self) -> usize {
        utf16_len(&self.inserted_text)
    }

    /// Exclusive end offset in the pre-change document.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len())
    }

    /// The change that exactly reverts this one.
    pub fn inverse(&self) -> Self {
        Self {
            start: self.start,
            deleted_text: self.inserted_text.clone(),
            inserted_text: self.deleted_text.clone(),
        }
    }
}

/// A structured description of a document text change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDelta {
    /// Document length (UTF-16 code units) before applying `edits`.
    pub before_len: usize,
    /// Document length (UTF-16 code units) after applying `edits`.
    pub after_len: usize,
    /// Ordered list of changes that transforms the "before" document into the "after" document.
    pub edits: Vec<TextChange>,
    /// If known, the undo group id associated with this change.
    pub undo_group_id: Option<usize>,
}

impl TextDelta {
    /// Returns `true` if this delta contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

/// Map `offset` from the state before `edits` to the state after them.
///
/// `edits` must be non-overlapping with ranges in pre-edit offsets. Offsets at or after an
/// edit's range move by its net length change; an insertion exactly at `offset` pushes it
/// right. Offsets strictly inside a replaced range collapse to the range start.
pub fn transform_offset(offset: usize, edits: &[EditOperation]) -> usize {
    let mut removed = 0;
    let mut added = 0;
    let mut target = offset;
    for edit in edits {
        if edit.range_end <= offset {
            removed += edit.range_end - edit.range_start;
            added += utf16_len(&edit.replacement);
        } else if edit.range_start < offset {
            target = target.min(edit.range_start);
        }
    }
    // Collapsed offsets only see the edits that end before the range they fell into.
    if target < offset {
        return transform_offset(target, edits);
    }
    offset + added - removed
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}
