//! Document root and assembler primitives
//!
//! The document is built incrementally by the markup parser through the
//! `add_*` primitives below. Blocks are only ever appended.

use serde::{Deserialize, Serialize};

use crate::block::{Block, Heading, List, ListItem, Paragraph, Table};
use crate::inline::Inline;

/// Deepest heading level with a native heading style
pub const MAX_HEADING_LEVEL: u8 = 3;

/// Paragraph style used for headings deeper than [`MAX_HEADING_LEVEL`]
pub const DEEP_HEADING_STYLE: &str = "Heading3";

/// A complete document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: DocumentMeta,
    /// Document content blocks
    pub blocks: Vec<Block>,
}

/// Document metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Document title, taken from the first level-1 heading
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block to the document
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Add a heading.
    ///
    /// Levels 1-3 become native headings. Anything deeper is emitted as a
    /// paragraph carrying the level-3 heading style.
    pub fn add_heading(&mut self, text: impl Into<String>, level: u8) {
        let text = text.into();
        if level <= MAX_HEADING_LEVEL {
            if level == 1 && self.metadata.title.is_none() && !text.is_empty() {
                self.metadata.title = Some(text.clone());
            }
            self.push(Block::Heading(Heading {
                level: level.max(1),
                text: vec![Inline::Text(text)],
            }));
        } else {
            self.add_styled_paragraph(vec![Inline::Text(text)], DEEP_HEADING_STYLE);
        }
    }

    /// Add a paragraph made of the given runs
    pub fn add_paragraph(&mut self, inlines: Vec<Inline>) {
        self.push(Block::Paragraph(Paragraph {
            inlines,
            style_id: None,
        }));
    }

    /// Add a paragraph with an explicit paragraph style
    pub fn add_styled_paragraph(&mut self, inlines: Vec<Inline>, style_id: impl Into<String>) {
        self.push(Block::Paragraph(Paragraph {
            inlines,
            style_id: Some(style_id.into()),
        }));
    }

    /// Add a bulleted list, one bulleted element per item, in order
    pub fn add_list<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<ListItem> = items.into_iter().map(ListItem::text).collect();
        if !items.is_empty() {
            self.push(Block::List(List { items }));
        }
    }

    /// Add a table
    pub fn add_table(&mut self, table: Table) {
        self.push(Block::Table(table));
    }

    /// Check if the document is empty (no blocks)
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get the number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}
