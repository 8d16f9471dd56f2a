//! Error types for template filling and markup parsing

use thiserror::Error;

/// Errors raised while turning filled markup into a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A table row has more cells than the header row defines columns
    #[error("Table row {row} has {cells} cells but the header defines {columns} columns")]
    RaggedTable {
        /// Zero-based row index within the table, header included
        row: usize,
        /// Number of cells found in the row
        cells: usize,
        /// Column count fixed by the header row
        columns: usize,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
