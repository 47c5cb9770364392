//! Positions and selections.
//!
//! Positions are **1-based** line/column pairs. Columns count UTF-16 code units, matching the
//! offset unit used by [`crate::TextBuffer`].

use std::cmp::Ordering;

/// Position coordinates (line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// One-based logical line number.
    pub line: usize,
    /// One-based column in UTF-16 code units within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selection direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    /// Forward selection (anchor at `start`, active end at `end`)
    Forward,
    /// Backward selection (anchor at `end`, active end at `start`)
    Backward,
}

/// Selection range
///
/// `start <= end` always holds in document order; `direction` remembers which end the user
/// is actively moving. A selection with `start == end` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Selection start position
    pub start: Position,
    /// Selection end position
    pub end: Position,
    /// Selection direction
    pub direction: SelectionDirection,
}

impl Selection {
    /// Build a selection from an anchor and an active position, in either order.
    pub fn new(anchor: Position, active: Position) -> Self {
        if anchor <= active {
            Self {
                start: anchor,
                end: active,
                direction: SelectionDirection::Forward,
            }
        } else {
            Self {
                start: active,
                end: anchor,
                direction: SelectionDirection::Backward,
            }
        }
    }

    /// Build a forward selection spanning `start..end`; swapped bounds are reordered.
    pub fn forward(start: Position, end: Position) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
            direction: SelectionDirection::Forward,
        }
    }

    /// A collapsed selection (caret) at `position`.
    pub fn caret(position: Position) -> Self {
        Self {
            start: position,
            end: position,
            direction: SelectionDirection::Forward,
        }
    }

    /// Returns `true` if this selection is a caret.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The fixed end of the selection.
    pub fn anchor(&self) -> Position {
        match self.direction {
            SelectionDirection::Forward => self.start,
            SelectionDirection::Backward => self.end,
        }
    }

    /// The moving end of the selection (where the caret is drawn).
    pub fn active(&self) -> Position {
        match self.direction {
            SelectionDirection::Forward => self.end,
            SelectionDirection::Backward => self.start,
        }
    }
}
