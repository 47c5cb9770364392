//! Inline markdown style presets.

use crate::wrap::DelimiterPair;
use std::fmt;
use std::str::FromStr;

/// Inline styles offered by a markdown toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkdownStyle {
    /// `**bold**`
    Bold,
    /// `_italic_`
    Italic,
    /// `~~strikethrough~~`
    Strikethrough,
    /// `` `code` ``
    InlineCode,
}

impl MarkdownStyle {
    /// Every preset, in toolbar order.
    pub const ALL: [MarkdownStyle; 4] = [
        MarkdownStyle::Bold,
        MarkdownStyle::Italic,
        MarkdownStyle::Strikethrough,
        MarkdownStyle::InlineCode,
    ];

    /// The marker written on both sides of the text.
    pub fn marker(self) -> &'static str {
        match self {
            MarkdownStyle::Bold => "**",
            MarkdownStyle::Italic => "_",
            MarkdownStyle::Strikethrough => "~~",
            MarkdownStyle::InlineCode => "`",
        }
    }

    /// Delimiter pair to toggle.
    pub fn delimiters(self) -> DelimiterPair {
        DelimiterPair::symmetric(self.marker())
    }

    /// Lowercase name used by [`FromStr`] and [`fmt::Display`].
    pub fn name(self) -> &'static str {
        match self {
            MarkdownStyle::Bold => "bold",
            MarkdownStyle::Italic => "italic",
            MarkdownStyle::Strikethrough => "strikethrough",
            MarkdownStyle::InlineCode => "code",
        }
    }
}

impl fmt::Display for MarkdownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown style name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown markdown style: {0}")]
pub struct UnknownStyle(pub String);

impl FromStr for MarkdownStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarkdownStyle::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}
