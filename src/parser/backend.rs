//! PDF backend abstraction layer.
//!
//! The extractor only needs page enumeration and per-page text, so that is
//! all the trait exposes. The concrete implementation wraps lopdf.

use std::collections::BTreeMap;

use lopdf::Document as LopdfDocument;

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Abstract interface for reading page text out of a PDF.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId), page numbers 1-indexed.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Extract the raw text of one page, lines separated by `\n`.
    fn page_text(&self, page_number: u32) -> Result<String>;
}

/// Concrete [`PdfBackend`] borrowing a `lopdf::Document`.
pub struct LopdfBackend<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> LopdfBackend<'a> {
    /// Wrap a loaded document.
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }
}

impl PdfBackend for LopdfBackend<'_> {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_text(&self, page_number: u32) -> Result<String> {
        self.doc
            .extract_text(&[page_number])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_number, e)))
    }
}
