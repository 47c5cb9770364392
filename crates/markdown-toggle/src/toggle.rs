//! Multi-cursor smart toggle.
//!
//! [`toggle_wrap_smart`] runs the whole multi-selection operation as one undoable unit:
//!
//! 1. open an undo group;
//! 2. order the selections bottom-to-top, right-to-left ([`order_for_mutation`]);
//! 3. for each selection, plan against the *current* buffer and apply the edits immediately;
//! 4. close the undo group;
//! 5. install the resulting selections in the caller's original order.
//!
//! Step 2 is required for correctness: applying the edits top-to-bottom shifts the offsets of
//! every selection that has not been processed yet.

use crate::buffer::TextBuffer;
use crate::edit::transform_offset;
use crate::error::BufferError;
use crate::position::Selection;
use crate::selection_set::order_for_mutation;
use crate::session::EditorHost;
use crate::style::MarkdownStyle;
use crate::wrap::{DelimiterPair, plan_toggle};

/// Toggle `pair` around every selection of `host`.
///
/// Does nothing when the host has no buffer attached or no selections. Buffer errors can only
/// come from a [`TextBuffer`] rejecting an edit; the undo group is still closed so whatever was
/// applied reverts with a single undo, and the selection set is left untouched.
pub fn toggle_wrap_smart<H: EditorHost + ?Sized>(
    host: &mut H,
    pair: &DelimiterPair,
) -> Result<(), BufferError> {
    let original = host.selections();
    if original.is_empty() {
        return Ok(());
    }
    let Some(buffer) = host.buffer_mut() else {
        tracing::debug!("toggle {pair}: no buffer attached, skipping");
        return Ok(());
    };

    buffer.begin_undo_group();
    let applied = apply_in_mutation_order(buffer, &original, pair);
    buffer.end_undo_group();
    let next = applied?;

    let finals: Vec<Selection> = next
        .into_iter()
        .zip(original)
        .map(|(next, original)| next.unwrap_or(original))
        .collect();

    tracing::debug!("toggle {pair}: updated {} selection(s)", finals.len());
    host.set_selections(finals);
    Ok(())
}

/// Toggle a [`MarkdownStyle`] preset around every selection of `host`.
pub fn toggle_style<H: EditorHost + ?Sized>(
    host: &mut H,
    style: MarkdownStyle,
) -> Result<(), BufferError> {
    toggle_wrap_smart(host, &style.delimiters())
}

fn apply_in_mutation_order<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    selections: &[Selection],
    pair: &DelimiterPair,
) -> Result<Vec<Option<Selection>>, BufferError> {
    // Results stay in offset space until the run ends: an edit further up the document
    // still shifts the text under selections that were already processed.
    let mut next: Vec<Option<(usize, usize)>> = vec![None; selections.len()];

    for item in order_for_mutation(buffer, selections) {
        let plan = plan_toggle(buffer, &item.selection, pair);
        tracing::trace!(
            index = item.index,
            start = item.start_offset,
            end = item.end_offset,
            action = ?plan.action,
            "toggle selection"
        );
        buffer.apply_edits(&plan.edits)?;

        for (start, end) in next.iter_mut().flatten() {
            *start = transform_offset(*start, &plan.edits);
            *end = transform_offset(*end, &plan.edits);
        }
        next[item.index] = Some((plan.start, plan.end));
    }

    Ok(next
        .into_iter()
        .map(|range| {
            range.map(|(start, end)| {
                Selection::forward(buffer.position_at(start), buffer.position_at(end))
            })
        })
        .collect())
}
