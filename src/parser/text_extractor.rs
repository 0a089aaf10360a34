//! Page text extraction.

use crate::error::Result;
use crate::model::{PageText, SourceDocument, TextDocument};
use crate::render::LineCleaner;

use super::backend::{LopdfBackend, PdfBackend};
use super::options::{ErrorMode, ExtractOptions};

/// Extracts raw text page by page.
///
/// Text comes straight from the backend: layout, images and fonts are lost.
pub struct TextExtractor<B: PdfBackend> {
    backend: B,
    options: ExtractOptions,
    cleaner: LineCleaner,
}

impl<'a> TextExtractor<LopdfBackend<'a>> {
    /// Extractor over a loaded source document.
    pub fn for_source(source: &'a SourceDocument, options: ExtractOptions) -> Self {
        Self::new(LopdfBackend::new(source.pdf()), options)
    }
}

impl<B: PdfBackend> TextExtractor<B> {
    /// Create an extractor over any backend.
    pub fn new(backend: B, options: ExtractOptions) -> Self {
        let cleaner = LineCleaner::new(&options);
        Self {
            backend,
            options,
            cleaner,
        }
    }

    /// Extract every page of the document.
    pub fn extract(&self, source_name: &str) -> Result<TextDocument> {
        let mut document = TextDocument::new(source_name);

        for &page_number in self.backend.pages().keys() {
            let page = match self.backend.page_text(page_number) {
                Ok(text) => PageText::new(page_number, self.cleaner.clean_page(&text)),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Failed to extract text from page {}: {}", page_number, e);
                    PageText::empty(page_number)
                }
            };

            if page.is_empty() {
                log::debug!("page {} has no extractable text", page_number);
            }
            document.add_page(page);
        }

        log::debug!(
            "extracted {} pages, {} paragraphs from {}",
            document.page_count(),
            document.paragraph_count(),
            source_name
        );
        Ok(document)
    }
}
