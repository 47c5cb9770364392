//! Multi-cursor selection ordering.
//!
//! Edits are applied one selection at a time, and each edit shifts every offset after its
//! range. Processing selections bottom-to-top, right-to-left means every selection still
//! waiting its turn lies at or before the one being edited, so its offsets stay valid.
//! Processing in any other order corrupts the later selections.

use crate::buffer::TextBuffer;
use crate::position::Selection;
use std::cmp::Reverse;

/// A selection tagged with its index in the caller's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedSelection {
    /// Index in the original selection list.
    pub index: usize,
    /// The selection itself.
    pub selection: Selection,
    /// Start offset resolved against the buffer at ordering time.
    pub start_offset: usize,
    /// End offset resolved against the buffer at ordering time.
    pub end_offset: usize,
}

/// Order `selections` for mutation: descending start offset, then descending end offset.
///
/// The sort is stable, so exact duplicates keep their relative input order.
pub fn order_for_mutation<B: TextBuffer + ?Sized>(
    buffer: &B,
    selections: &[Selection],
) -> Vec<IndexedSelection> {
    let mut indexed: Vec<IndexedSelection> = selections
        .iter()
        .enumerate()
        .map(|(index, selection)| IndexedSelection {
            index,
            selection: *selection,
            start_offset: buffer.offset_at(selection.start),
            end_offset: buffer.offset_at(selection.end),
        })
        .collect();

    indexed.sort_by_key(|item| (Reverse(item.start_offset), Reverse(item.end_offset)));
    indexed
}
