//! Document model types.
//!
//! Source documents are opaque lopdf handles; everything else here is plain
//! data produced by the extractor and the TOC layout builder.

mod source;
mod text;
mod toc;

pub use source::SourceDocument;
pub use text::{Block, PageText, TextDocument};
pub(crate) use text::split_lines;
pub use toc::{Bookmark, LinkRegion, PageOffsetTable, Rect, TocEntry};
