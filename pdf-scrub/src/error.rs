use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("PDF file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied reading: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Invalid PDF: {0}")]
    Parse(#[from] lopdf::Error),

    #[error("Page {index} out of range ({count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, PdfError>;
