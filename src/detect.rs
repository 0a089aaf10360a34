//! Upload sniffing: decide whether a byte stream is a PDF before handing it to lopdf.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header information found at the start of a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
    /// Byte offset of the `%PDF-` marker (non-zero when junk precedes it)
    pub offset: usize,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3;

/// Readers tolerate up to this many bytes of garbage before the header.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Sniff the PDF header from an in-memory upload.
///
/// Returns [`Error::EmptyUpload`] for a zero-length upload so that callers can
/// prompt for input instead of reporting a corrupt file.
pub fn sniff_bytes(data: &[u8]) -> Result<PdfHeader> {
    if data.is_empty() {
        return Err(Error::EmptyUpload("the uploaded file is empty".into()));
    }

    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    let offset = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let start = offset + PDF_MAGIC.len();
    let version_bytes = data
        .get(start..start + VERSION_LEN)
        .ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfHeader { version, offset })
}

/// Sniff the PDF header of a file on disk.
pub fn sniff_path<P: AsRef<Path>>(path: P) -> Result<PdfHeader> {
    let file = File::open(path)?;
    let mut head = Vec::with_capacity(HEADER_SEARCH_WINDOW + 8);
    file.take((HEADER_SEARCH_WINDOW + 8) as u64)
        .read_to_end(&mut head)?;
    sniff_bytes(&head)
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == VERSION_LEN
        && bytes[0].is_ascii_digit()
        && bytes[1] == b'.'
        && bytes[2].is_ascii_digit()
}

/// Check if bytes start (within the header window) like a PDF.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    sniff_bytes(data).is_ok()
}
