//! Error types.

use thiserror::Error;

/// Errors raised by a [`crate::TextBuffer`] when an edit cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Offset past the end of the document.
    #[error("Invalid offset: {0}")]
    InvalidOffset(usize),
    /// Inverted range, or a range reaching past the end of the document.
    #[error("Invalid range: {start}..{end}")]
    InvalidRange {
        /// Inclusive start offset.
        start: usize,
        /// Exclusive end offset.
        end: usize,
    },
    /// Two edits of one batch touch the same text.
    #[error("Overlapping edits: {first_start}..{first_end} and {second_start}..{second_end}")]
    OverlappingEdits {
        /// Start of the earlier range.
        first_start: usize,
        /// End of the earlier range.
        first_end: usize,
        /// Start of the later range.
        second_start: usize,
        /// End of the later range.
        second_end: usize,
    },
}

/// Errors raised while loading or validating [`crate::MarkdownFieldOptions`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The options document is not valid JSON for the expected shape.
    #[error("Invalid field options: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configured column does not exist on the resource.
    #[error("Column {column} not found in resource {resource}")]
    ColumnNotFound {
        /// Configured column name.
        column: String,
        /// Resource label used in the message.
        resource: String,
    },
    /// The configured column exists but cannot hold markdown.
    #[error("Column {column} must be of type 'string', 'text' or 'richtext', found '{found}'")]
    UnsupportedColumnType {
        /// Configured column name.
        column: String,
        /// The column's actual type name.
        found: String,
    },
}

/// Errors raised while deriving attachment keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    /// The link target is not an absolute URL.
    #[error("Invalid attachment url {url}: {reason}")]
    InvalidUrl {
        /// The offending link target.
        url: String,
        /// Parser message.
        reason: String,
    },
}
