//! Per-selection wrap/unwrap decisions.
//!
//! [`plan_toggle`] classifies one selection against the current buffer and computes the edits
//! and resulting selection in offset space. Planning never mutates the buffer; the caller
//! applies [`WrapPlan::edits`] and then calls [`WrapPlan::resolve`] to map the resulting
//! offsets back to positions in the edited buffer.
//!
//! # Classification
//!
//! After trimming a trailing line break off multi-line selections, exactly one applies, in
//! this order:
//!
//! | Selection | Condition                                        | Action                        |
//! |-----------|--------------------------------------------------|-------------------------------|
//! | caret     | `left` right before and `right` right after      | [`WrapAction::UnwrapAtCaret`] |
//! | caret     | otherwise                                        | [`WrapAction::WrapAtCaret`]   |
//! | range     | selected text starts with `left`, ends with `right` | [`WrapAction::UnwrapExplicit`] |
//! | range     | `left` right before and `right` right after      | [`WrapAction::UnwrapAdjacent`] |
//! | range     | otherwise                                        | [`WrapAction::WrapSelection`] |
//!
//! Empty delimiters degenerate into edits that leave the text unchanged.

use crate::buffer::TextBuffer;
use crate::edit::{EditOperation, utf16_len};
use crate::position::{Position, Selection};
use std::fmt;

/// Left/right marker strings toggled around a selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DelimiterPair {
    /// Marker placed before the selection.
    pub left: String,
    /// Marker placed after the selection.
    pub right: String,
}

impl DelimiterPair {
    /// A pair with distinct left and right markers.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// A pair using the same marker on both sides.
    pub fn symmetric(marker: impl Into<String>) -> Self {
        let marker = marker.into();
        Self {
            right: marker.clone(),
            left: marker,
        }
    }

    /// Length of `left` in offset units.
    pub fn left_len(&self) -> usize {
        utf16_len(&self.left)
    }

    /// Length of `right` in offset units.
    pub fn right_len(&self) -> usize {
        utf16_len(&self.right)
    }

    /// `left + inner + right`.
    pub fn wrap(&self, inner: &str) -> String {
        let mut out = String::with_capacity(self.left.len() + inner.len() + self.right.len());
        out.push_str(&self.left);
        out.push_str(inner);
        out.push_str(&self.right);
        out
    }

    /// `text` without the markers, if it starts with `left` and ends with `right`
    /// without the two overlapping.
    pub fn strip<'a>(&self, text: &'a str) -> Option<&'a str> {
        if utf16_len(text) < self.left_len() + self.right_len() {
            return None;
        }
        text.strip_prefix(self.left.as_str())?
            .strip_suffix(self.right.as_str())
    }
}

impl fmt::Display for DelimiterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}…{}", self.left, self.right)
    }
}

/// The action chosen for one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapAction {
    /// Caret flanked by the markers: delete both.
    UnwrapAtCaret,
    /// Bare caret: insert `left + right` and park the caret between them.
    WrapAtCaret,
    /// Selected text carries the markers itself: replace it with its inner slice.
    UnwrapExplicit,
    /// Markers sit just outside the selection: delete both.
    UnwrapAdjacent,
    /// Anything else: surround the selection with the markers.
    WrapSelection,
}

impl WrapAction {
    /// Returns `true` for the two wrapping actions.
    pub fn is_wrap(self) -> bool {
        matches!(self, Self::WrapAtCaret | Self::WrapSelection)
    }
}

/// Edits and resulting selection (in post-edit offsets) for one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapPlan {
    /// Chosen action.
    pub action: WrapAction,
    /// Edits to apply as one batch, ranges in pre-edit offsets.
    pub edits: Vec<EditOperation>,
    /// Start offset of the resulting selection after `edits` are applied.
    pub start: usize,
    /// End offset of the resulting selection after `edits` are applied.
    pub end: usize,
}

impl WrapPlan {
    /// Map the resulting offsets to a forward selection in the edited buffer.
    pub fn resolve<B: TextBuffer + ?Sized>(&self, buffer: &B) -> Selection {
        Selection::forward(buffer.position_at(self.start), buffer.position_at(self.end))
    }
}

/// Pull a selection ending at column 1 of a later line back to the end of the previous line.
///
/// A "select to end of line including the newline" selection should wrap the last real
/// character, not put the closing marker on the next line.
pub fn trim_trailing_eol<B: TextBuffer + ?Sized>(buffer: &B, selection: &Selection) -> Selection {
    if !selection.is_empty()
        && selection.end.column == 1
        && selection.end.line > selection.start.line
    {
        let prev_line = selection.end.line - 1;
        let end = Position::new(prev_line, buffer.line_max_column(prev_line));
        return Selection::forward(selection.start, end);
    }
    *selection
}

/// Classify `selection` against the current buffer and plan its edits.
pub fn plan_toggle<B: TextBuffer + ?Sized>(
    buffer: &B,
    selection: &Selection,
    pair: &DelimiterPair,
) -> WrapPlan {
    let selection = trim_trailing_eol(buffer, selection);
    let start = buffer.offset_at(selection.start);
    let end = buffer.offset_at(selection.end);
    let left_len = pair.left_len();
    let right_len = pair.right_len();

    if selection.is_empty() {
        if is_flanked(buffer, start, start, pair) {
            return WrapPlan {
                action: WrapAction::UnwrapAtCaret,
                edits: vec![
                    EditOperation::delete(start, start + right_len),
                    EditOperation::delete(start - left_len, start),
                ],
                start: start - left_len,
                end: start - left_len,
            };
        }

        return WrapPlan {
            action: WrapAction::WrapAtCaret,
            edits: vec![EditOperation::insert(
                start,
                format!("{}{}", pair.left, pair.right),
            )],
            start: start + left_len,
            end: start + left_len,
        };
    }

    let selected = buffer.text_in_range(start, end);

    if let Some(inner) = pair.strip(&selected) {
        let inner_len = utf16_len(inner);
        return WrapPlan {
            action: WrapAction::UnwrapExplicit,
            edits: vec![EditOperation::replace(start, end, inner)],
            start,
            end: start + inner_len,
        };
    }

    if is_flanked(buffer, start, end, pair) {
        return WrapPlan {
            action: WrapAction::UnwrapAdjacent,
            edits: vec![
                EditOperation::delete(end, end + right_len),
                EditOperation::delete(start - left_len, start),
            ],
            start: start - left_len,
            end: end - left_len,
        };
    }

    WrapPlan {
        action: WrapAction::WrapSelection,
        edits: vec![EditOperation::replace(start, end, pair.wrap(&selected))],
        start: start + left_len,
        end: end + left_len,
    }
}

/// `left` ends exactly at `start` and `right` begins exactly at `end`.
fn is_flanked<B: TextBuffer + ?Sized>(
    buffer: &B,
    start: usize,
    end: usize,
    pair: &DelimiterPair,
) -> bool {
    let left_len = pair.left_len();
    let right_len = pair.right_len();
    if start < left_len || end + right_len > buffer.document_length() {
        return false;
    }
    buffer.text_in_range(start - left_len, start) == pair.left
        && buffer.text_in_range(end, end + right_len) == pair.right
}
