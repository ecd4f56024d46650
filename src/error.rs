//! Error types for unocr library.

use std::io;
use thiserror::Error;

/// Result type alias for unocr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or processing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The OCR response does not have the expected shape.
    #[error("Invalid OCR response: {0}")]
    InvalidResponse(String),

    /// The requested document could not be located.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// The OCR collaborator failed.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// The text-analysis collaborator failed.
    #[error("Text analysis error: {0}")]
    Analysis(String),

    /// Persisting an output record failed.
    #[error("Store error: {0}")]
    Store(String),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}
