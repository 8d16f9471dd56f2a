//! mdfill-ast - Output document model
//!
//! This crate provides the block and inline types that the markup parser
//! emits and the DOCX writer consumes. A [`Document`] is append-only: the
//! assembler primitives on it push new blocks and never edit earlier ones.

pub mod block;
pub mod document;
pub mod inline;

pub use block::{Block, Heading, List, ListItem, Paragraph, Table, TableCell, TableRow};
pub use document::{Document, DocumentMeta, DEEP_HEADING_STYLE, MAX_HEADING_LEVEL};
pub use inline::{FormatType, Inline};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
