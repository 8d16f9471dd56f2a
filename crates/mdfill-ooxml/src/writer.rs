//! DOCX Writer
//!
//! This module writes a `mdfill_ast::Document` into a fresh DOCX package.
//! Styling comes from a [`Theme`]; the writer only references style IDs.
//!
//! # Example
//!
//! ```no_run
//! use mdfill_ast::Document;
//! use mdfill_ooxml::{DocxWriter, Theme};
//!
//! let mut doc = Document::new();
//! doc.add_heading("Status", 1);
//! doc.add_list(["on track", "under budget"]);
//!
//! let mut writer = DocxWriter::with_theme(Theme::default());
//! let bytes = writer.save(&doc, "status.docx")?;
//! assert!(!bytes.is_empty());
//! # Ok::<(), mdfill_ooxml::OoxmlError>(())
//! ```

use std::fs;
use std::io::Cursor;
use std::path::Path;

use chrono::{DateTime, Utc};
use mdfill_ast::{Block, Document, FormatType, Heading, Inline, List, Paragraph, Table};
use tracing::{debug, info};

use crate::error::Result;
use crate::package::{
    heading_style_id, scaffold, xml_escape, BULLET_NUM_ID, LIST_BULLET_STYLE, NORMAL_STYLE,
    WORDPROCESSING_NS,
};
use crate::theme::Theme;

/// File name used when the caller does not choose one
pub const DEFAULT_OUTPUT: &str = "output.docx";

/// Usable page width in twentieths of a point (Letter, one-inch margins)
const TEXT_WIDTH_TWIPS: usize = 9360;

/// DOCX Writer for generating DOCX files from the document model
#[derive(Debug, Default)]
pub struct DocxWriter {
    /// XML output buffer
    output: String,
    /// Styling applied to the package
    theme: Theme,
    /// Creation timestamp override; the current time is used when unset
    created: Option<DateTime<Utc>>,
}

impl DocxWriter {
    /// Create a writer with the default theme
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with a custom theme
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// The theme used for styling
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Fix the creation timestamp recorded in the document properties
    pub fn set_created(&mut self, created: DateTime<Utc>) {
        self.created = Some(created);
    }

    /// Generate a DOCX package and return its bytes
    pub fn generate(&mut self, doc: &Document) -> Result<Vec<u8>> {
        self.theme.validate()?;

        let created = self.created.unwrap_or_else(Utc::now);
        let mut archive = scaffold(&self.theme, &doc.metadata, created);
        archive.set_string("word/document.xml", self.generate_document_xml(doc));

        let mut output = Cursor::new(Vec::new());
        archive.write_to(&mut output)?;

        let bytes = output.into_inner();
        debug!(blocks = doc.len(), bytes = bytes.len(), "Generated DOCX package");
        Ok(bytes)
    }

    /// Generate a DOCX package, write it to `path` and return its bytes.
    ///
    /// A write failure is returned as-is; no partial file cleanup is attempted.
    pub fn save<P: AsRef<Path>>(&mut self, doc: &Document, path: P) -> Result<Vec<u8>> {
        let bytes = self.generate(doc)?;
        fs::write(path.as_ref(), &bytes)?;
        info!(path = %path.as_ref().display(), bytes = bytes.len(), "Saved document");
        Ok(bytes)
    }

    /// Generate the complete document.xml content
    fn generate_document_xml(&mut self, doc: &Document) -> String {
        self.output.clear();

        self.output
            .push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        self.output.push('\n');
        self.output
            .push_str(&format!("<w:document xmlns:w=\"{}\">\n", WORDPROCESSING_NS));
        self.output.push_str("<w:body>\n");

        for block in &doc.blocks {
            self.generate_block(block);
        }

        // Letter page, one-inch margins
        self.output.push_str("<w:sectPr>\n");
        self.output
            .push_str("<w:pgSz w:w=\"12240\" w:h=\"15840\"/>\n");
        self.output.push_str(
            "<w:pgMar w:top=\"1440\" w:right=\"1440\" w:bottom=\"1440\" w:left=\"1440\" \
             w:header=\"720\" w:footer=\"720\" w:gutter=\"0\"/>\n",
        );
        self.output.push_str("</w:sectPr>\n");

        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");

        std::mem::take(&mut self.output)
    }

    /// Generate XML for a single block
    fn generate_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(para) => self.generate_paragraph(para),
            Block::Heading(heading) => self.generate_heading(heading),
            Block::List(list) => self.generate_list(list),
            Block::Table(table) => self.generate_table(table),
        }
    }

    /// Open a paragraph with the given style
    fn open_paragraph(&mut self, style: &str) {
        self.output.push_str("<w:p>\n<w:pPr>\n");
        self.output
            .push_str(&format!("<w:pStyle w:val=\"{}\"/>\n", xml_escape(style)));
        self.output.push_str("</w:pPr>\n");
    }

    /// Generate XML for a paragraph
    fn generate_paragraph(&mut self, para: &Paragraph) {
        let style = para.style_id.as_deref().unwrap_or(NORMAL_STYLE);
        self.open_paragraph(style);
        for inline in &para.inlines {
            self.generate_inline(inline);
        }
        self.output.push_str("</w:p>\n");
    }

    /// Generate XML for a heading
    fn generate_heading(&mut self, heading: &Heading) {
        self.open_paragraph(&heading_style_id(heading.level));
        for inline in &heading.text {
            self.generate_inline(inline);
        }
        self.output.push_str("</w:p>\n");
    }

    /// Generate XML for a list: one bulleted paragraph per item
    fn generate_list(&mut self, list: &List) {
        for item in &list.items {
            self.output.push_str("<w:p>\n<w:pPr>\n");
            self.output
                .push_str(&format!("<w:pStyle w:val=\"{}\"/>\n", LIST_BULLET_STYLE));
            self.output.push_str("<w:numPr>\n");
            self.output.push_str("<w:ilvl w:val=\"0\"/>\n");
            self.output
                .push_str(&format!("<w:numId w:val=\"{}\"/>\n", BULLET_NUM_ID));
            self.output.push_str("</w:numPr>\n");
            self.output.push_str("</w:pPr>\n");

            for inline in &item.inlines {
                self.generate_inline(inline);
            }

            self.output.push_str("</w:p>\n");
        }
    }

    /// Generate XML for a table
    fn generate_table(&mut self, table: &Table) {
        let columns = table.columns.max(1);
        let column_width = TEXT_WIDTH_TWIPS / columns;

        self.output.push_str("<w:tbl>\n");

        self.output.push_str("<w:tblPr>\n");
        let style = xml_escape(&self.theme.table_style_id).into_owned();
        self.output
            .push_str(&format!("<w:tblStyle w:val=\"{}\"/>\n", style));
        self.output
            .push_str("<w:tblW w:w=\"5000\" w:type=\"pct\"/>\n");
        self.output.push_str(
            "<w:tblLook w:val=\"04A0\" w:firstRow=\"1\" w:lastRow=\"0\" \
             w:firstColumn=\"1\" w:lastColumn=\"0\" w:noHBand=\"0\" w:noVBand=\"1\"/>\n",
        );
        self.output.push_str("</w:tblPr>\n");

        self.output.push_str("<w:tblGrid>\n");
        for _ in 0..columns {
            self.output
                .push_str(&format!("<w:gridCol w:w=\"{}\"/>\n", column_width));
        }
        self.output.push_str("</w:tblGrid>\n");

        for row in &table.rows {
            self.output.push_str("<w:tr>\n");

            if row.is_header {
                self.output.push_str("<w:trPr>\n<w:tblHeader/>\n</w:trPr>\n");
            }

            for cell in &row.cells {
                self.output.push_str("<w:tc>\n");
                self.output.push_str(&format!(
                    "<w:tcPr>\n<w:tcW w:w=\"{}\" w:type=\"dxa\"/>\n</w:tcPr>\n",
                    column_width
                ));
                self.output.push_str("<w:p>\n");
                for inline in &cell.inlines {
                    self.generate_inline(inline);
                }
                self.output.push_str("</w:p>\n");
                self.output.push_str("</w:tc>\n");
            }

            self.output.push_str("</w:tr>\n");
        }

        self.output.push_str("</w:tbl>\n");
    }

    /// Generate a run for inline content
    fn generate_inline(&mut self, inline: &Inline) {
        match inline {
            Inline::Text(text) => self.generate_run(text, None),
            Inline::Format(format_type, inner) => {
                self.generate_run(&inner.plain_text(), Some(*format_type))
            }
        }
    }

    fn generate_run(&mut self, text: &str, format: Option<FormatType>) {
        self.output.push_str("<w:r>\n");
        match format {
            Some(FormatType::Bold) => self.output.push_str("<w:rPr>\n<w:b/>\n</w:rPr>\n"),
            Some(FormatType::Italic) => self.output.push_str("<w:rPr>\n<w:i/>\n</w:rPr>\n"),
            None => {}
        }
        self.output.push_str(&format!(
            "<w:t xml:space=\"preserve\">{}</w:t>\n",
            xml_escape(text)
        ));
        self.output.push_str("</w:r>\n");
    }
}
