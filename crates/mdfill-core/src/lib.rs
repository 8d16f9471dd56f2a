//! mdfill-core - Fill a markup template, then parse it into a document
//!
//! The pipeline has two stages:
//!
//! 1. [`fill`] substitutes a JSON data record into a `{{placeholder}}`
//!    template held by a [`TemplateStore`].
//! 2. [`parse`] classifies the filled markup line by line and assembles a
//!    `mdfill_ast::Document`.
//!
//! # Example
//!
//! ```
//! use mdfill_core::{fill, parse, DataRecord, TemplateStore};
//! use serde_json::json;
//!
//! let store = TemplateStore::with_template("# {{title}}\n\n{{items}}\n");
//! let mut data = DataRecord::new();
//! data.insert("title".into(), json!("Weekly Report"));
//! data.insert("items".into(), json!(["done", "pending"]));
//!
//! let filled = fill(store.template(), &data);
//! assert!(filled.contains("- done\n- pending"));
//!
//! let doc = parse(&filled).unwrap();
//! assert_eq!(doc.metadata.title.as_deref(), Some("Weekly Report"));
//! ```

pub mod error;
pub mod fill;
pub mod parser;
pub mod template;

// Re-export main types and functions
pub use error::{CoreError, Result};
pub use fill::{fill, fill_at, DataRecord, NOT_SPECIFIED, TO_BE_FILLED};
pub use parser::{parse, BlockGroup, BlockParser, LineKind};
pub use template::{placeholders, TemplateStore, DEFAULT_TEMPLATE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
