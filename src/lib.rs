//! # pdfdesk
//!
//! Two small PDF utilities behind one library:
//!
//! - **PDF → DOCX**: extract the raw text of every page and write it as a
//!   Word document, one paragraph per line and a page break between pages.
//! - **Merge with TOC**: concatenate PDFs behind a generated table of
//!   contents page with clickable entries and sidebar bookmarks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfdesk::{merge_files, pdf_file_to_docx, ExtractOptions, TocOptions};
//!
//! fn main() -> pdfdesk::Result<()> {
//!     let docx = pdf_file_to_docx("report.pdf", ExtractOptions::default())?;
//!     std::fs::write(&docx.file_name, &docx.bytes)?;
//!
//!     let merged = merge_files(&["a.pdf", "b.pdf"], &TocOptions::default())?;
//!     std::fs::write(&merged.file_name, &merged.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Layout
//!
//! The table of contents is computed by [`TocLayout::build`] from page counts
//! alone, so it can be inspected (or serialized) without touching any PDF.

pub mod assemble;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

pub use assemble::{
    assemble, plan, scan_page_counts, AssembledDocument, PdfAssembler, MERGED_FILE_NAME, PDF_MIME,
};
pub use detect::{is_pdf_bytes, sniff_bytes, sniff_path, PdfHeader};
pub use error::{Error, Result};
pub use layout::{OverflowPolicy, PageSize, TocLayout, TocLine, TocOptions};
pub use model::{
    Block, Bookmark, LinkRegion, PageOffsetTable, PageText, Rect, SourceDocument, TextDocument,
    TocEntry,
};
pub use parser::{ErrorMode, ExtractOptions, TextExtractor};
pub use render::{docx_file_name, to_docx, DocxOutput, DOCX_MIME};

use std::path::Path;

/// Extract the text of a loaded document.
pub fn extract_text_document(
    source: &SourceDocument,
    options: ExtractOptions,
) -> Result<TextDocument> {
    TextExtractor::for_source(source, options).extract(source.name())
}

/// Convert an uploaded PDF to `.docx`.
///
/// # Example
///
/// ```no_run
/// use pdfdesk::{pdf_to_docx, ExtractOptions};
///
/// let data = std::fs::read("report.pdf").unwrap();
/// let docx = pdf_to_docx("report.pdf", &data, ExtractOptions::new().lenient()).unwrap();
/// assert_eq!(docx.file_name, "report.docx");
/// ```
pub fn pdf_to_docx(name: &str, data: &[u8], options: ExtractOptions) -> Result<DocxOutput> {
    let source = SourceDocument::from_bytes(name, data)?;
    let text = extract_text_document(&source, options)?;
    to_docx(&text)
}

/// Convert a PDF file to `.docx`.
pub fn pdf_file_to_docx<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<DocxOutput> {
    let source = SourceDocument::open(path)?;
    let text = extract_text_document(&source, options)?;
    to_docx(&text)
}

/// Merge uploaded `(file name, bytes)` pairs, in order, behind a TOC page.
///
/// An empty list yields a document holding only the TOC page.
pub fn merge_with_toc(
    uploads: Vec<(String, Vec<u8>)>,
    options: &TocOptions,
) -> Result<AssembledDocument> {
    let sources = uploads
        .into_iter()
        .map(|(name, data)| SourceDocument::from_bytes(name, &data))
        .collect::<Result<Vec<_>>>()?;
    assemble(sources, options)
}

/// Merge PDF files, in order, behind a TOC page.
pub fn merge_files<P: AsRef<Path>>(paths: &[P], options: &TocOptions) -> Result<AssembledDocument> {
    let sources = paths
        .iter()
        .map(SourceDocument::open)
        .collect::<Result<Vec<_>>>()?;
    assemble(sources, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_nothing() {
        let merged = merge_with_toc(Vec::new(), &TocOptions::default()).unwrap();
        assert_eq!(merged.page_count, 1);
        assert!(merged.layout.lines.is_empty());
    }

    #[test]
    fn test_merge_rejects_non_pdf() {
        let uploads = vec![("notes.txt".to_string(), b"hello".to_vec())];
        let err = merge_with_toc(uploads, &TocOptions::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownFormat));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_docx_rejects_empty_upload() {
        let err = pdf_to_docx("a.pdf", b"", ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyUpload(_)));
    }
}
