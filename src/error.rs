// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Core error types for licman
#[derive(Error, Debug)]
pub enum Error {
    /// Manifest text does not follow the stanza grammar
    #[error("Malformed manifest at line {line}: {reason}")]
    MalformedManifest { line: usize, reason: String },

    /// Manifest parsed cleanly but lists no packages
    #[error("Manifest contains no packages: {0}")]
    EmptyManifest(String),

    /// Output file exists and overwriting was not requested
    #[error("Output file already exists: {} (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV rendering errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON rendering errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Excel workbook errors
    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl Error {
    /// Build a `MalformedManifest` error for a 1-based line number
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedManifest {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type alias using licman's Error type
pub type Result<T> = std::result::Result<T, Error>;
