//! Uploaded source documents.

use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::{sniff_bytes, sniff_path, PdfHeader};
use crate::error::{Error, Result};

/// An uploaded PDF, identified by its file name.
///
/// The pages stay inside the underlying `lopdf::Document`; callers only ever
/// see the name and the page count. A `SourceDocument` is loaded once and
/// consumed by the assembler.
pub struct SourceDocument {
    name: String,
    header: PdfHeader,
    doc: LopdfDocument,
}

impl SourceDocument {
    /// Load a source document from uploaded bytes.
    pub fn from_bytes(name: impl Into<String>, data: &[u8]) -> Result<Self> {
        let name = name.into();
        let header = sniff_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Self::checked(name, header, doc)
    }

    /// Load a source document from a file, naming it after the file name.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let header = sniff_path(path)?;
        let doc = LopdfDocument::load(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self::checked(name, header, doc)
    }

    fn checked(name: String, header: PdfHeader, doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        log::debug!(
            "loaded {} ({}, {} pages)",
            name,
            header,
            doc.get_pages().len()
        );
        Ok(Self { name, header, doc })
    }

    /// The upload's file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// PDF version from the file header.
    pub fn version(&self) -> &str {
        &self.header.version
    }

    pub(crate) fn pdf(&self) -> &LopdfDocument {
        &self.doc
    }

    pub(crate) fn into_parts(self) -> (String, LopdfDocument) {
        (self.name, self.doc)
    }
}

impl std::fmt::Debug for SourceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDocument")
            .field("name", &self.name)
            .field("version", &self.header.version)
            .field("pages", &self.page_count())
            .finish()
    }
}
