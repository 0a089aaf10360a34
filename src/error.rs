//! Error types for pdfdesk library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or merging PDFs.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The upload was missing or contained no bytes.
    #[error("No PDF was uploaded: {0}")]
    EmptyUpload(String),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Error while assembling the merged document.
    #[error("Assembly error: {0}")]
    Assemble(String),

    /// Error while packing the word-processing document.
    #[error("DOCX write error: {0}")]
    DocxWrite(String),

    /// Error serializing a layout to JSON.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the error was caused by what the caller supplied
    /// (missing upload, non-PDF data, unreadable or encrypted PDF)
    /// rather than by a failure inside the pipeline.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyUpload(_)
                | Error::UnknownFormat
                | Error::UnsupportedVersion(_)
                | Error::PdfParse(_)
                | Error::Encrypted
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
