//! mdfill CLI - Command-line interface library
//!
//! This library provides the CLI functionality for mdfill, including:
//! - Placeholders: List the fields a template expects
//! - Fill: Substitute a JSON data record into a template
//! - Render: Fill, parse and write a DOCX report
//!
//! # Library Usage
//!
//! ```no_run
//! use mdfill_cli::{load_record, ReportPipeline};
//!
//! let pipeline = ReportPipeline::new();
//! let record = load_record("demos/project_report.json")?;
//! pipeline.generate(&record, "project_report.docx")?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # List placeholders of the built-in template
//! mdfill placeholders
//!
//! # Render a report
//! mdfill render --data demos/project_report.json --output report.docx
//! ```

pub mod app;
pub mod pipeline;

// Re-export main entry point and types
pub use app::{fill_command, load_store, placeholders_command, render_command, run_cli};
pub use pipeline::{load_record, ReportPipeline};
