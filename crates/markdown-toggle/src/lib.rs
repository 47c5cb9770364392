#![warn(missing_docs)]
//! Markdown Toggle - Multi-Cursor Smart Delimiter Toggling
//!
//! # Overview
//!
//! `markdown-toggle` wraps or unwraps every selection of a multi-cursor editor with a pair of
//! markers (`**`, `_`, `` ` ``, `<kbd>`/`</kbd>`, ...), deciding per selection which applies,
//! and commits the whole operation as a single undo unit. It works on a headless text buffer
//! abstraction and does not render anything.
//!
//! # Core Features
//!
//! - **Per-selection decisions**: caret wrap/unwrap, explicit unwrap (markers inside the
//!   selection), adjacent unwrap (markers just outside it) and plain wrap
//! - **Multi-cursor safety**: selections are edited bottom-to-top so pending offsets stay valid
//! - **Single undo unit**: one undo reverts the toggle across all cursors
//! - **UTF-16 offsets**: offsets and columns count UTF-16 code units, like browser editors
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Toggle Runner (undo group, result mapping) │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Selection Orderer  │  Wrap Decision Engine │
//! ├─────────────────────────────────────────────┤
//! │  EditorHost / TextBuffer adapter            │  ← Host integration
//! ├─────────────────────────────────────────────┤
//! │  RopeBuffer + grouped undo history          │  ← Bundled text model
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use markdown_toggle::{EditorSession, MarkdownStyle, Position, Selection, toggle_style};
//!
//! let mut session = EditorSession::new("hello world");
//! session.set_selection(Selection::forward(Position::new(1, 7), Position::new(1, 12)));
//!
//! toggle_style(&mut session, MarkdownStyle::Bold).unwrap();
//! assert_eq!(session.text(), "hello **world**");
//!
//! // The selection still covers "world", so toggling again unwraps.
//! toggle_style(&mut session, MarkdownStyle::Bold).unwrap();
//! assert_eq!(session.text(), "hello world");
//! ```
//!
//! # Module Description
//!
//! - [`toggle`] - Transaction runner
//! - [`wrap`] - Per-selection classification and edit planning
//! - [`selection_set`] - Mutation-safe selection ordering
//! - [`buffer`] - Text buffer adapter trait and rope implementation
//! - [`session`] - Editor host trait and the bundled session
//! - [`undo`] - Grouped undo/redo history
//! - [`style`] - Markdown inline-style presets
//! - [`attachments`] - Image attachment link extraction and sync planning
//! - [`config`] - Markdown field options

pub mod attachments;
pub mod buffer;
pub mod config;
pub mod edit;
pub mod error;
pub mod line_ending;
pub mod position;
pub mod selection_set;
pub mod session;
pub mod style;
pub mod toggle;
pub mod undo;
pub mod wrap;

pub use attachments::{
    AttachmentSync, ImageLink, attachment_key, attachment_links, image_links,
    plan_attachment_sync,
};
pub use buffer::{RopeBuffer, TextBuffer};
pub use config::{AttachmentOptions, ColumnDescriptor, ColumnType, MarkdownFieldOptions};
pub use edit::{EditOperation, TextChange, TextDelta};
pub use error::{AttachmentError, BufferError, ConfigError};
pub use line_ending::LineEnding;
pub use position::{Position, Selection, SelectionDirection};
pub use selection_set::{IndexedSelection, order_for_mutation};
pub use session::{EditorHost, EditorSession};
pub use style::{MarkdownStyle, UnknownStyle};
pub use toggle::{toggle_style, toggle_wrap_smart};
pub use undo::UndoHistory;
pub use wrap::{DelimiterPair, WrapAction, WrapPlan, plan_toggle, trim_trailing_eol};
