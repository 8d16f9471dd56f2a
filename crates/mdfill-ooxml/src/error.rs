//! Error types for OOXML operations

use thiserror::Error;

/// Errors that can occur while building or saving a DOCX package
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Error parsing a theme file
    #[error("Theme parsing error: {0}")]
    ThemeParse(#[from] toml::de::Error),

    /// Theme values that cannot be rendered
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),

    /// Required part not found in archive
    #[error("Required file not found: {0}")]
    MissingFile(String),
}

/// Result type for OOXML operations
pub type Result<T> = std::result::Result<T, OoxmlError>;
