//! PDF text extraction.

pub mod backend;
mod options;
mod text_extractor;

pub use backend::{LopdfBackend, PdfBackend};
pub use options::{ErrorMode, ExtractOptions};
pub use text_extractor::TextExtractor;
