//! Paragraph writer: extracted text → WordprocessingML (.docx).

use std::io::Cursor;
use std::path::Path;

use docx_rs::{BreakType, Docx, Paragraph, Run};

use crate::error::{Error, Result};
use crate::model::{Block, TextDocument};

/// MIME type of the produced document.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A packed `.docx` held in memory.
#[derive(Debug, Clone)]
pub struct DocxOutput {
    /// Suggested download name
    pub file_name: String,

    /// Zipped document bytes
    pub bytes: Vec<u8>,

    /// Number of text paragraphs written
    pub paragraphs: usize,

    /// Number of page breaks written
    pub page_breaks: usize,
}

/// Build the docx-rs document for a block sequence.
pub fn build_docx(blocks: &[Block]) -> Docx {
    blocks.iter().fold(Docx::new(), |docx, block| match block {
        Block::Paragraph(text) => {
            let paragraph = if text.is_empty() {
                Paragraph::new()
            } else {
                Paragraph::new().add_run(Run::new().add_text(text))
            };
            docx.add_paragraph(paragraph)
        }
        Block::PageBreak => {
            docx.add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
        }
    })
}

/// Write the document as a `.docx` into memory.
pub fn to_docx(doc: &TextDocument) -> Result<DocxOutput> {
    let blocks = doc.blocks();
    let paragraphs = blocks
        .iter()
        .filter(|b| matches!(b, Block::Paragraph(_)))
        .count();
    let page_breaks = blocks.len() - paragraphs;

    let mut buffer = Cursor::new(Vec::new());
    build_docx(&blocks)
        .build()
        .pack(&mut buffer)
        .map_err(|e| Error::DocxWrite(e.to_string()))?;

    Ok(DocxOutput {
        file_name: docx_file_name(&doc.source_name),
        bytes: buffer.into_inner(),
        paragraphs,
        page_breaks,
    })
}

/// `<basename>.docx` for an uploaded file name.
///
/// Directory components from either path convention are dropped.
pub fn docx_file_name(upload_name: &str) -> String {
    let base = upload_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(upload_name);
    let stem = Path::new(base)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "document".to_string());
    format!("{}.docx", stem)
}
