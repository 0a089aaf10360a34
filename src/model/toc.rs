//! Table-of-contents types shared by the layout builder and the assembler.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in PDF user space (points, origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Rect {
    /// Create a rectangle from its edges.
    pub fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Width in points.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height in points.
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// `[left bottom right top]`, the order PDF `/Rect` arrays use.
    pub fn to_array(&self) -> [f32; 4] {
        [self.left, self.bottom, self.right, self.top]
    }
}

/// One line of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Source document name
    pub title: String,

    /// First page of the document in the merged output (1-indexed)
    pub start_page: u32,
}

/// A clickable region on a TOC page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkRegion {
    /// Clickable rectangle
    pub rect: Rect,

    /// Destination page in the merged output (0-indexed)
    pub target_page_index: u32,

    /// TOC page carrying the link (0-indexed)
    pub toc_page: u32,
}

/// A sidebar outline item pointing at a source document's first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,

    /// Destination page in the merged output (0-indexed)
    pub target_page_index: u32,
}

/// Starting page index of every source document in the merged output.
///
/// `offset(i + 1) == offset(i) + page_count(i)` and `offset(0)` equals the
/// number of TOC pages in front of the sources.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageOffsetTable {
    offsets: Vec<u32>,
    page_counts: Vec<u32>,
    toc_pages: u32,
}

impl PageOffsetTable {
    /// Build the table for documents with the given page counts.
    pub fn new(page_counts: &[u32], toc_pages: u32) -> Self {
        let mut offsets = Vec::with_capacity(page_counts.len());
        let mut cursor = toc_pages;
        for &count in page_counts {
            offsets.push(cursor);
            cursor += count;
        }
        Self {
            offsets,
            page_counts: page_counts.to_vec(),
            toc_pages,
        }
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether there are no documents.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Number of TOC pages preceding the first document.
    pub fn toc_pages(&self) -> u32 {
        self.toc_pages
    }

    /// 0-indexed first page of document `i`, unclamped.
    ///
    /// For a document without pages this is where the next document starts,
    /// which may equal [`PageOffsetTable::total_pages`].
    pub fn offset(&self, i: usize) -> Option<u32> {
        self.offsets.get(i).copied()
    }

    /// 1-indexed first page of document `i` as printed on the TOC.
    pub fn start_page(&self, i: usize) -> Option<u32> {
        self.offset(i).map(|o| o + 1)
    }

    /// 0-indexed page a link or bookmark for document `i` jumps to.
    ///
    /// Trailing documents without pages point at the last page of the output.
    pub fn target_page_index(&self, i: usize) -> Option<u32> {
        let last = self.total_pages().saturating_sub(1);
        self.offset(i).map(|o| o.min(last))
    }

    /// Page count of document `i`.
    pub fn page_count(&self, i: usize) -> Option<u32> {
        self.page_counts.get(i).copied()
    }

    /// Pages in the merged output, TOC included.
    pub fn total_pages(&self) -> u32 {
        self.toc_pages + self.page_counts.iter().sum::<u32>()
    }

    /// All unclamped offsets in document order.
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_follow_page_counts() {
        let table = PageOffsetTable::new(&[3, 2], 1);
        assert_eq!(table.offsets(), &[1, 4]);
        assert_eq!(table.start_page(0), Some(2));
        assert_eq!(table.start_page(1), Some(5));
        assert_eq!(table.total_pages(), 6);
    }

    #[test]
    fn test_zero_page_document_advances_nothing() {
        let table = PageOffsetTable::new(&[2, 0, 3], 1);
        assert_eq!(table.offsets(), &[1, 3, 3]);
        assert_eq!(table.target_page_index(1), Some(3));
        assert_eq!(table.total_pages(), 6);
    }

    #[test]
    fn test_trailing_zero_page_document_clamped() {
        let table = PageOffsetTable::new(&[2, 0], 1);
        assert_eq!(table.offset(1), Some(3));
        assert_eq!(table.target_page_index(1), Some(2));
    }

    #[test]
    fn test_empty_table() {
        let table = PageOffsetTable::new(&[], 1);
        assert!(table.is_empty());
        assert_eq!(table.total_pages(), 1);
        assert_eq!(table.offset(0), None);
    }

    #[test]
    fn test_rect_dimensions() {
        let rect = Rect::new(72.0, 100.0, 523.0, 116.0);
        assert_eq!(rect.width(), 451.0);
        assert_eq!(rect.height(), 16.0);
        assert_eq!(rect.to_array(), [72.0, 100.0, 523.0, 116.0]);
    }
}
