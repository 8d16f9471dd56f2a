//! Report pipeline
//!
//! Ties the stages together: fill the active template with a data record,
//! parse the filled markup, then write a DOCX package.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use mdfill_ast::Document;
use mdfill_core::{fill, parse, DataRecord, TemplateStore};
use mdfill_ooxml::{DocxWriter, Theme};

/// Template store and theme used for one or more reports
#[derive(Debug, Clone, Default)]
pub struct ReportPipeline {
    store: TemplateStore,
    theme: Theme,
    author: Option<String>,
}

impl ReportPipeline {
    /// Pipeline with the built-in template and default theme
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the template store
    pub fn with_store(mut self, store: TemplateStore) -> Self {
        self.store = store;
        self
    }

    /// Replace the theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Record `author` as the creator of rendered documents
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// The active template store
    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Mutable access for switching templates between reports
    pub fn store_mut(&mut self) -> &mut TemplateStore {
        &mut self.store
    }

    /// The theme applied when saving
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Creator recorded in document properties, if any
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Fill the active template with `data`
    pub fn fill(&self, data: &DataRecord) -> String {
        let filled = fill(self.store.template(), data);
        debug!(keys = data.len(), chars = filled.len(), "Filled template");
        filled
    }

    /// Parse filled markup into a document
    pub fn render(&self, filled: &str) -> Result<Document> {
        let mut doc = parse(filled).context("Failed to parse filled template")?;
        doc.metadata.author = self.author.clone();
        debug!(blocks = doc.len(), "Parsed filled template");
        Ok(doc)
    }

    /// Fill, parse and save to `path`, returning the package bytes
    pub fn generate<P: AsRef<Path>>(&self, data: &DataRecord, path: P) -> Result<Vec<u8>> {
        let path = path.as_ref();
        let doc = self.render(&self.fill(data))?;

        let bytes = DocxWriter::with_theme(self.theme.clone())
            .save(&doc, path)
            .with_context(|| format!("Failed to write document: {}", path.display()))?;

        info!(path = %path.display(), bytes = bytes.len(), "Report generated");
        Ok(bytes)
    }
}

/// Read a data record from a JSON file holding a single object
pub fn load_record<P: AsRef<Path>>(path: P) -> Result<DataRecord> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in data file: {}", path.display()))?;

    match value {
        Value::Object(record) => Ok(record),
        other => bail!(
            "Data file must hold a JSON object, found {}: {}",
            json_kind(&other),
            path.display()
        ),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
