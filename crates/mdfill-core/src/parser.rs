//! Markup block parser
//!
//! This module turns filled lightweight markup into a `mdfill_ast::Document`.
//! Each line is trimmed and classified on its own; contiguous list items
//! and contiguous table rows are buffered in a [`BlockGroup`] and emitted
//! when the group is flushed.
//!
//! # Supported Syntax
//!
//! - Headings: `# H1`, `## H2`, `### H3` (deeper levels use the H3 style)
//! - Bullets: `- item`, `* item`, `+ item`
//! - Numbered items: `1. item` (rendered as bullets)
//! - Tables: `| a | b |` rows, `| --- |` separator rows are dropped
//! - Inline: `**bold**`, `*italic*` on lines containing `**`
//!
//! # Example
//!
//! ```
//! use mdfill_ast::Block;
//! use mdfill_core::parser;
//!
//! let doc = parser::parse("# Report\n\n- one\n- two\n").unwrap();
//! assert_eq!(doc.len(), 2);
//! assert!(matches!(doc.blocks[1], Block::List(_)));
//! ```

use std::sync::LazyLock;

use mdfill_ast::{Document, Inline, Table, TableCell, TableRow};
use regex::Regex;
use tracing::trace;

use crate::error::{CoreError, Result};

/// Column separator for table rows
pub const COLUMN_SEPARATOR: char = '|';

/// Marker identifying a table separator row
const SEPARATOR_ROW_MARKER: &str = "---";

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("numbered item pattern is valid"));

static BOLD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));

static ITALIC_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("italic pattern is valid"));

/// Classification of a single trimmed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty after trimming
    Blank,
    /// `#`-prefixed heading with its level and text
    Heading { level: usize, text: &'a str },
    /// Line containing the column separator
    TableRow(&'a str),
    /// Bullet or numbered item, marker stripped
    ListItem(&'a str),
    /// Paragraph containing `**` spans
    Formatted(&'a str),
    /// Anything else
    Plain(&'a str),
}

/// Classify a trimmed line. First match wins.
pub fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }

    if line.starts_with('#') {
        let level = line.chars().take_while(|&c| c == '#').count();
        let text = line.trim_start_matches('#').trim();
        return LineKind::Heading { level, text };
    }

    if line.contains(COLUMN_SEPARATOR) {
        return LineKind::TableRow(line);
    }

    if let Some(item) = ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
    {
        return LineKind::ListItem(item);
    }

    if let Some(m) = NUMBERED_ITEM.find(line) {
        return LineKind::ListItem(&line[m.end()..]);
    }

    if line.contains("**") {
        return LineKind::Formatted(line);
    }

    LineKind::Plain(line)
}

/// The currently open group of buffered lines. At most one is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BlockGroup {
    /// Nothing buffered
    #[default]
    Closed,
    /// Consecutive list item texts
    List(Vec<String>),
    /// Consecutive raw table rows
    Table(Vec<String>),
}

/// Line-by-line parser building a document through its assembler primitives
#[derive(Debug, Default)]
pub struct BlockParser {
    document: Document,
    group: BlockGroup,
}

impl BlockParser {
    /// Create a parser with an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently open group
    pub fn group(&self) -> &BlockGroup {
        &self.group
    }

    /// The document built so far
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Process a single line of markup
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim();
        let kind = classify(line);

        match kind {
            LineKind::Blank => {
                // Blank lines never close a table
                self.flush_list();
            }
            LineKind::Heading { level, text } => {
                // Close a table as well as a list so blocks keep source order
                self.flush_group()?;
                let level = u8::try_from(level).unwrap_or(u8::MAX);
                self.document.add_heading(text, level);
            }
            LineKind::TableRow(row) => {
                self.flush_list();
                match &mut self.group {
                    BlockGroup::Table(rows) => rows.push(row.to_string()),
                    _ => self.group = BlockGroup::Table(vec![row.to_string()]),
                }
            }
            _ if matches!(self.group, BlockGroup::Table(_)) => {
                // Any other non-blank line closes the table and is kept verbatim
                self.flush_table()?;
                self.document.add_paragraph(vec![Inline::text(line)]);
            }
            LineKind::ListItem(item) => match &mut self.group {
                BlockGroup::List(items) => items.push(item.to_string()),
                _ => self.group = BlockGroup::List(vec![item.to_string()]),
            },
            LineKind::Formatted(text) => {
                self.flush_list();
                self.document.add_paragraph(parse_inlines(text));
            }
            LineKind::Plain(text) => {
                self.flush_list();
                self.document.add_paragraph(vec![Inline::text(text)]);
            }
        }

        Ok(())
    }

    /// Flush any open group and return the finished document
    pub fn finish(mut self) -> Result<Document> {
        self.flush_group()?;
        Ok(self.document)
    }

    /// Emit and clear the open list, if any. An open table is left alone.
    fn flush_list(&mut self) {
        if matches!(self.group, BlockGroup::List(_)) {
            if let BlockGroup::List(items) = std::mem::take(&mut self.group) {
                trace!(items = items.len(), "Flushing list");
                self.document.add_list(items);
            }
        }
    }

    /// Emit and clear the open table, if any. An open list is left alone.
    fn flush_table(&mut self) -> Result<()> {
        if matches!(self.group, BlockGroup::Table(_)) {
            if let BlockGroup::Table(rows) = std::mem::take(&mut self.group) {
                trace!(rows = rows.len(), "Flushing table");
                if let Some(table) = build_table(&rows)? {
                    self.document.add_table(table);
                }
            }
        }
        Ok(())
    }

    /// Emit and clear whichever group is open
    fn flush_group(&mut self) -> Result<()> {
        self.flush_list();
        self.flush_table()
    }
}

/// Split a line into plain, bold and italic runs, preserving order.
///
/// `**bold**` spans are split out first; single-`*` italic spans are then
/// recognised in the remaining text. Unclosed markers stay literal.
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut result = Vec::new();
    let mut last = 0;

    for caps in BOLD_SPAN.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_italic_runs(&text[last..whole.start()], &mut result);
        if !inner.as_str().is_empty() {
            result.push(Inline::bold(inner.as_str()));
        }
        last = whole.end();
    }
    push_italic_runs(&text[last..], &mut result);

    result
}

fn push_italic_runs(segment: &str, out: &mut Vec<Inline>) {
    let mut last = 0;

    for caps in ITALIC_SPAN.captures_iter(segment) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push(Inline::text(&segment[last..whole.start()]));
        }
        out.push(Inline::italic(inner.as_str()));
        last = whole.end();
    }

    if last < segment.len() {
        out.push(Inline::text(&segment[last..]));
    }
}

/// Split a raw table row into trimmed cells.
///
/// The first and last segments around the separators are discarded, so
/// `| a | b |` yields `["a", "b"]`.
pub fn split_row(row: &str) -> Vec<String> {
    let segments: Vec<&str> = row.split(COLUMN_SEPARATOR).collect();
    if segments.len() < 2 {
        return Vec::new();
    }
    segments[1..segments.len() - 1]
        .iter()
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Build a table from buffered raw rows.
///
/// Separator rows and rows without cells (a single `|` in running text)
/// are dropped. The first remaining row becomes the bold header. Its width
/// fixes the column count: shorter rows are padded with empty cells, wider
/// rows are rejected. Returns `None` when nothing renderable remains.
pub fn build_table(rows: &[String]) -> Result<Option<Table>> {
    let cleaned: Vec<Vec<String>> = rows
        .iter()
        .filter(|row| !row.contains(SEPARATOR_ROW_MARKER))
        .map(|row| split_row(row))
        .filter(|cells| !cells.is_empty())
        .collect();

    if cleaned.len() < rows.len() {
        trace!(dropped = rows.len() - cleaned.len(), "Dropped separator and cell-less rows");
    }

    let Some(columns) = cleaned.first().map(Vec::len) else {
        return Ok(None);
    };

    let mut table_rows = Vec::with_capacity(cleaned.len());
    for (index, cells) in cleaned.into_iter().enumerate() {
        if cells.len() > columns {
            return Err(CoreError::RaggedTable {
                row: index,
                cells: cells.len(),
                columns,
            });
        }

        let is_header = index == 0;
        let mut row_cells: Vec<TableCell> = cells
            .into_iter()
            .map(|text| table_cell(text, is_header))
            .collect();
        row_cells.resize_with(columns, TableCell::default);

        table_rows.push(TableRow {
            cells: row_cells,
            is_header,
        });
    }

    Ok(Some(Table {
        rows: table_rows,
        columns,
    }))
}

fn table_cell(text: String, bold: bool) -> TableCell {
    let inlines = match (text.is_empty(), bold) {
        (true, _) => Vec::new(),
        (false, true) => vec![Inline::bold(text)],
        (false, false) => vec![Inline::Text(text)],
    };
    TableCell { inlines }
}

/// Parse filled markup into a document.
///
/// # Errors
///
/// Fails with [`CoreError::RaggedTable`] when a table row is wider than
/// its header. Every other input renders, possibly imperfectly.
pub fn parse(text: &str) -> Result<Document> {
    let text = text.replace("\r\n", "\n");
    let mut parser = BlockParser::new();

    for line in text.split('\n') {
        parser.feed_line(line)?;
    }

    parser.finish()
}
