//! Extracted text, page by page, and the block sequence written to DOCX.

use serde::{Deserialize, Serialize};

/// Raw text extracted from a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-indexed)
    pub number: u32,

    /// Extracted text as returned by the backend
    pub text: String,
}

impl PageText {
    /// Create page text.
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// A page with no extractable text.
    pub fn empty(number: u32) -> Self {
        Self::new(number, String::new())
    }

    /// Lines of the page, one paragraph each.
    ///
    /// Blank lines between text lines are kept; an empty page yields nothing.
    /// Any Unicode line boundary ends a line, with `\r\n` counted once.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        split_lines(&self.text).into_iter()
    }

    /// Whether the page produced no text at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{b}'
            | '\u{c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split text into lines at any Unicode line boundary.
///
/// `\r\n` is a single break. A break at the very end does not start
/// another line.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
            chars.next();
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// One element of the word-processing output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph holding one line of extracted text
    Paragraph(String),

    /// A hard page break
    PageBreak,
}

/// Text extracted from a whole PDF.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextDocument {
    /// Name of the source upload
    pub source_name: String,

    /// Pages in source order
    pub pages: Vec<PageText>,
}

impl TextDocument {
    /// Create an empty text document for the named source.
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            pages: Vec::new(),
        }
    }

    /// Append a page.
    pub fn add_page(&mut self, page: PageText) {
        self.pages.push(page);
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Flatten pages into paragraphs with a page break between
    /// consecutive pages (never after the last one).
    pub fn blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::new();
        let last = self.pages.len().saturating_sub(1);

        for (i, page) in self.pages.iter().enumerate() {
            blocks.extend(page.lines().map(|line| Block::Paragraph(line.to_string())));
            if i < last {
                blocks.push(Block::PageBreak);
            }
        }

        blocks
    }

    /// Number of paragraphs that [`TextDocument::blocks`] will produce.
    pub fn paragraph_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines().count()).sum()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(pages: &[&str]) -> TextDocument {
        let mut doc = TextDocument::new("sample.pdf");
        for (i, text) in pages.iter().enumerate() {
            doc.add_page(PageText::new(i as u32 + 1, *text));
        }
        doc
    }

    #[test]
    fn test_blocks_one_paragraph_per_line() {
        let blocks = doc(&["first\nsecond\n"]).blocks();
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("first".into()),
                Block::Paragraph("second".into())
            ]
        );
    }

    #[test]
    fn test_page_break_between_not_after_last() {
        let blocks = doc(&["a", "b"]).blocks();
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("a".into()),
                Block::PageBreak,
                Block::Paragraph("b".into())
            ]
        );
    }

    #[test]
    fn test_empty_page_keeps_break_placement() {
        let blocks = doc(&["a", "", "c"]).blocks();
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("a".into()),
                Block::PageBreak,
                Block::PageBreak,
                Block::Paragraph("c".into())
            ]
        );
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let blocks = doc(&["a\n\nb"]).blocks();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1], Block::Paragraph(String::new()));
    }

    #[test]
    fn test_no_pages_no_blocks() {
        assert!(doc(&[]).blocks().is_empty());
        assert_eq!(doc(&["", ""]).blocks(), vec![Block::PageBreak]);
    }

    #[test]
    fn test_every_line_boundary_splits() {
        let page = PageText::new(1, "a\rb\u{b}c\u{c}d\u{1c}e\u{1d}f\u{1e}g\u{85}h\u{2028}i\u{2029}j");
        let lines: Vec<&str> = page.lines().collect();
        assert_eq!(lines, ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
    }

    #[test]
    fn test_crlf_is_one_break() {
        assert_eq!(split_lines("a\r\nb\n"), ["a", "b"]);
        assert_eq!(split_lines("a\n\r\nb"), ["a", "", "b"]);
        assert_eq!(split_lines("\n"), [""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_paragraph_count() {
        assert_eq!(doc(&["a\nb", "", "c\n"]).paragraph_count(), 3);
    }
}
