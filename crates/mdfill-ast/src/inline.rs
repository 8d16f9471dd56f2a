//! Inline elements for paragraph content
//!
//! A paragraph is a sequence of runs. Each run is either plain text or
//! text carrying a single bold or italic flag.

use serde::{Deserialize, Serialize};

/// Inline-level content element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    /// Plain text content
    Text(String),
    /// Formatted content (bold or italic)
    Format(FormatType, Box<Inline>),
}

/// Text formatting types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatType {
    /// Bold text
    Bold,
    /// Italic text
    Italic,
}

impl Inline {
    /// Create a plain text run
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(text.into())
    }

    /// Create a bold run
    pub fn bold(text: impl Into<String>) -> Self {
        Inline::Format(FormatType::Bold, Box::new(Inline::Text(text.into())))
    }

    /// Create an italic run
    pub fn italic(text: impl Into<String>) -> Self {
        Inline::Format(FormatType::Italic, Box::new(Inline::Text(text.into())))
    }

    /// Plain text of this run, with formatting removed
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(text) => text.clone(),
            Inline::Format(_, inner) => inner.plain_text(),
        }
    }

    /// Whether this run is rendered bold
    pub fn is_bold(&self) -> bool {
        matches!(self, Inline::Format(FormatType::Bold, _))
    }

    /// Whether this run is rendered italic
    pub fn is_italic(&self) -> bool {
        matches!(self, Inline::Format(FormatType::Italic, _))
    }
}
