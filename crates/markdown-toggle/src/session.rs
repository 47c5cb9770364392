//! Editing sessions: a text buffer plus the active multi-cursor selection set.

use crate::buffer::{RopeBuffer, TextBuffer};
use crate::edit::TextDelta;
use crate::position::{Position, Selection};

/// An editor that may or may not currently have a buffer attached.
///
/// The toggle reads the selection set, mutates the buffer and installs the resulting
/// selections through this trait. `buffer_mut` returning `None` models a detached editor.
pub trait EditorHost {
    /// Concrete text model.
    type Buffer: TextBuffer;

    /// The attached buffer, if any.
    fn buffer_mut(&mut self) -> Option<&mut Self::Buffer>;

    /// Current selections, in the caller's order.
    fn selections(&self) -> Vec<Selection>;

    /// Replace the selection set, preserving the given order.
    fn set_selections(&mut self, selections: Vec<Selection>);
}

/// A [`RopeBuffer`] with an ordered list of selections.
///
/// # Example
///
/// ```rust
/// use markdown_toggle::{DelimiterPair, EditorSession, Position, Selection, toggle_wrap_smart};
///
/// let mut session = EditorSession::new("hello world");
/// session.set_selection(Selection::forward(Position::new(1, 7), Position::new(1, 12)));
///
/// toggle_wrap_smart(&mut session, &DelimiterPair::symmetric("**")).unwrap();
/// assert_eq!(session.text(), "hello **world**");
/// ```
#[derive(Debug, Default)]
pub struct EditorSession {
    buffer: Option<RopeBuffer>,
    selections: Vec<Selection>,
}

impl EditorSession {
    /// Create a session over `text` with a single caret at the start of the document.
    pub fn new(text: &str) -> Self {
        Self::with_buffer(RopeBuffer::new(text))
    }

    /// Create a session over an existing buffer.
    pub fn with_buffer(buffer: RopeBuffer) -> Self {
        Self {
            buffer: Some(buffer),
            selections: vec![Selection::caret(Position::new(1, 1))],
        }
    }

    /// Create a session with no buffer attached.
    pub fn detached() -> Self {
        Self::default()
    }

    /// The attached buffer, if any.
    pub fn buffer(&self) -> Option<&RopeBuffer> {
        self.buffer.as_ref()
    }

    /// Attach `buffer`, returning the previously attached one.
    pub fn attach(&mut self, buffer: RopeBuffer) -> Option<RopeBuffer> {
        self.buffer.replace(buffer)
    }

    /// Detach and return the buffer.
    pub fn detach(&mut self) -> Option<RopeBuffer> {
        self.buffer.take()
    }

    /// Document text, or an empty string when detached.
    pub fn text(&self) -> String {
        self.buffer.as_ref().map(RopeBuffer::text).unwrap_or_default()
    }

    /// Current selections, in the caller's order.
    pub fn selections_ref(&self) -> &[Selection] {
        &self.selections
    }

    /// Replace all selections with a single one.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selections = vec![selection];
    }

    /// Text covered by `selection` in the attached buffer.
    pub fn selected_text(&self, selection: &Selection) -> Option<String> {
        let buffer = self.buffer.as_ref()?;
        Some(buffer.text_in_range(
            buffer.offset_at(selection.start),
            buffer.offset_at(selection.end),
        ))
    }

    /// Revert the newest undo group and clamp selections into the reverted document.
    pub fn undo(&mut self) -> Option<TextDelta> {
        let delta = self.buffer.as_mut()?.undo().cloned();
        self.clamp_selections();
        delta
    }

    /// Reapply the newest redo group and clamp selections into the new document.
    pub fn redo(&mut self) -> Option<TextDelta> {
        let delta = self.buffer.as_mut()?.redo().cloned();
        self.clamp_selections();
        delta
    }

    fn clamp_selections(&mut self) {
        let Some(buffer) = self.buffer.as_ref() else {
            return;
        };
        for selection in &mut self.selections {
            let anchor = buffer.position_at(buffer.offset_at(selection.anchor()));
            let active = buffer.position_at(buffer.offset_at(selection.active()));
            *selection = Selection::new(anchor, active);
        }
    }
}

impl EditorHost for EditorSession {
    type Buffer = RopeBuffer;

    fn buffer_mut(&mut self) -> Option<&mut RopeBuffer> {
        self.buffer.as_mut()
    }

    fn selections(&self) -> Vec<Selection> {
        self.selections.clone()
    }

    fn set_selections(&mut self, selections: Vec<Selection>) {
        self.selections = selections;
    }
}
