//! Output rendering: DOCX paragraphs and TOC page content streams.

mod cleanup;
mod docx;
mod toc_page;

pub use cleanup::LineCleaner;
pub use docx::{build_docx, docx_file_name, to_docx, DocxOutput, DOCX_MIME};
pub use toc_page::{encode_win_ansi, toc_page_content, ENTRY_FONT, TITLE_FONT};
