//! # mdfill-ooxml
//!
//! DOCX generation for mdfill.
//!
//! This crate provides functionality to:
//! - Assemble the fixed parts of a WordprocessingML package from a [`Theme`]
//! - Serialize an `mdfill_ast::Document` into `word/document.xml`
//! - Write the package deterministically and save it to disk
//!
//! ## Example
//!
//! ```
//! use mdfill_ast::Document;
//! use mdfill_ooxml::{DocxWriter, OoxmlArchive};
//!
//! let mut doc = Document::new();
//! doc.add_heading("Quarterly Report", 1);
//!
//! let bytes = DocxWriter::new().generate(&doc)?;
//! let archive = OoxmlArchive::from_reader(std::io::Cursor::new(bytes))?;
//! assert!(archive.contains("word/styles.xml"));
//! # Ok::<(), mdfill_ooxml::OoxmlError>(())
//! ```

pub mod archive;
pub mod error;
pub mod package;
pub mod relationships;
pub mod theme;
pub mod writer;

#[cfg(test)]
mod test_utils;

pub use archive::OoxmlArchive;
pub use error::{OoxmlError, Result};
pub use relationships::Relationships;
pub use theme::Theme;
pub use writer::{DocxWriter, DEFAULT_OUTPUT};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
