//! Block-level elements for document structure
//!
//! This module defines the block-level elements a filled report is made
//! of: headings, paragraphs, bulleted lists and tables.

use serde::{Deserialize, Serialize};

use crate::inline::Inline;

/// Block-level content element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),
    /// A section heading
    Heading(Heading),
    /// A run of bulleted items
    List(List),
    /// A table
    Table(Table),
}

/// A paragraph block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline runs within the paragraph
    pub inlines: Vec<Inline>,
    /// Paragraph style override (e.g. `Heading3` for deep headings)
    pub style_id: Option<String>,
}

/// A section heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-3)
    pub level: u8,
    /// Heading text content
    pub text: Vec<Inline>,
}

/// A bulleted list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct List {
    /// List items, each rendered as one bulleted paragraph
    pub items: Vec<ListItem>,
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item content
    pub inlines: Vec<Inline>,
}

/// A table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Table rows; the first row is the header
    pub rows: Vec<TableRow>,
    /// Number of columns, fixed by the header row
    pub columns: usize,
}

/// A table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in this row
    pub cells: Vec<TableCell>,
    /// Whether this is a header row
    pub is_header: bool,
}

/// A table cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell runs
    pub inlines: Vec<Inline>,
}

impl Default for Heading {
    fn default() -> Self {
        Self {
            level: 1,
            text: Vec::new(),
        }
    }
}

impl ListItem {
    /// Create a list item holding plain text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            inlines: vec![Inline::text(text)],
        }
    }
}

impl TableCell {
    /// Create a cell holding plain text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            inlines: vec![Inline::text(text)],
        }
    }

    /// Cell text with formatting removed
    pub fn plain_text(&self) -> String {
        self.inlines.iter().map(Inline::plain_text).collect()
    }

    /// Whether every run in the cell is bold
    pub fn is_bold(&self) -> bool {
        !self.inlines.is_empty() && self.inlines.iter().all(Inline::is_bold)
    }
}

impl Table {
    /// The header row, if the table has any rows
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first()
    }

    /// Rows after the header
    pub fn body(&self) -> &[TableRow] {
        self.rows.get(1..).unwrap_or(&[])
    }
}
