//! TOC layout: page offsets, placed lines, link regions and bookmarks.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Bookmark, LinkRegion, PageOffsetTable, Rect, TocEntry};

use super::options::{OverflowPolicy, TocOptions};

/// Fraction of the font size the link band extends below the baseline.
const LINK_DESCENT: f32 = 0.3;

/// A TOC entry placed on a TOC page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocLine {
    /// Index of the source document
    pub document: usize,

    /// What the line says
    pub entry: TocEntry,

    /// TOC page the line is drawn on (0-indexed)
    pub toc_page: u32,

    /// Baseline of the text
    pub baseline: f32,

    /// Clickable band around the line
    pub link: LinkRegion,
}

/// Computed layout of the table of contents for an ordered set of documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocLayout {
    /// Where each document starts in the merged output
    pub offsets: PageOffsetTable,

    /// Lines that made it onto a TOC page, in document order
    pub lines: Vec<TocLine>,

    /// One bookmark per document, in document order
    pub bookmarks: Vec<Bookmark>,

    /// Number of TOC pages in front of the documents
    pub toc_page_count: u32,

    /// Number of documents whose line did not fit
    pub dropped: usize,
}

impl TocLayout {
    /// Lay out the TOC for `(name, page_count)` pairs in upload order.
    ///
    /// Never fails: no documents gives an empty TOC page, and documents
    /// without pages still get a line and a bookmark.
    pub fn build<S: AsRef<str>>(documents: &[(S, u32)], options: &TocOptions) -> Self {
        let per_page = options.entries_per_page();
        let toc_page_count = match options.overflow {
            OverflowPolicy::Truncate => 1,
            OverflowPolicy::Paginate if per_page == 0 => 1,
            OverflowPolicy::Paginate => documents.len().div_ceil(per_page).max(1) as u32,
        };

        let counts: Vec<u32> = documents.iter().map(|(_, count)| *count).collect();
        let offsets = PageOffsetTable::new(&counts, toc_page_count);

        let (page_width, _) = options.page_size.dimensions();
        let first_baseline = options.first_entry_baseline();
        let capacity = per_page.saturating_mul(toc_page_count as usize);

        let mut lines = Vec::with_capacity(documents.len().min(capacity));
        for (i, (name, _)) in documents.iter().enumerate().take(capacity) {
            let toc_page = (i / per_page) as u32;
            let slot = i % per_page;
            let baseline = first_baseline - slot as f32 * options.line_height;
            let entry = TocEntry {
                title: name.as_ref().to_string(),
                start_page: offsets.start_page(i).unwrap_or(toc_page_count + 1),
            };
            let link = LinkRegion {
                rect: Rect::new(
                    options.margin_x,
                    baseline - LINK_DESCENT * options.entry_font_size,
                    page_width - options.margin_x,
                    baseline + options.entry_font_size,
                ),
                target_page_index: offsets.target_page_index(i).unwrap_or(0),
                toc_page,
            };
            lines.push(TocLine {
                document: i,
                entry,
                toc_page,
                baseline,
                link,
            });
        }

        let dropped = documents.len() - lines.len();
        if dropped > 0 {
            log::warn!(
                "table of contents holds {} of {} entries; {} dropped",
                lines.len(),
                documents.len(),
                dropped
            );
        }

        let bookmarks = documents
            .iter()
            .enumerate()
            .map(|(i, (name, _))| Bookmark {
                title: name.as_ref().to_string(),
                target_page_index: offsets.target_page_index(i).unwrap_or(0),
            })
            .collect();

        Self {
            offsets,
            lines,
            bookmarks,
            toc_page_count,
            dropped,
        }
    }

    /// Rendered entries in order.
    pub fn entries(&self) -> Vec<TocEntry> {
        self.lines.iter().map(|l| l.entry.clone()).collect()
    }

    /// Link regions in order.
    pub fn links(&self) -> Vec<LinkRegion> {
        self.lines.iter().map(|l| l.link).collect()
    }

    /// Lines drawn on TOC page `toc_page`.
    pub fn lines_on_page(&self, toc_page: u32) -> impl Iterator<Item = &TocLine> {
        self.lines.iter().filter(move |l| l.toc_page == toc_page)
    }

    /// Pages in the merged output, TOC included.
    pub fn total_pages(&self) -> u32 {
        self.offsets.total_pages()
    }

    /// Serialize the layout as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageSize;

    fn build(docs: &[(&str, u32)]) -> TocLayout {
        TocLayout::build(docs, &TocOptions::default())
    }

    #[test]
    fn test_two_documents() {
        let layout = build(&[("A.pdf", 3), ("B.pdf", 2)]);
        assert_eq!(
            layout.entries(),
            vec![
                TocEntry {
                    title: "A.pdf".into(),
                    start_page: 2
                },
                TocEntry {
                    title: "B.pdf".into(),
                    start_page: 5
                },
            ]
        );
        let targets: Vec<u32> = layout.links().iter().map(|l| l.target_page_index).collect();
        assert_eq!(targets, vec![1, 4]);
        assert_eq!(layout.total_pages(), 6);
        assert_eq!(layout.toc_page_count, 1);
    }

    #[test]
    fn test_start_pages_recurrence() {
        let counts = [4u32, 1, 7, 2, 9];
        let docs: Vec<(String, u32)> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| (format!("doc{}.pdf", i), *c))
            .collect();
        let layout = TocLayout::build(&docs, &TocOptions::default());
        let entries = layout.entries();
        let links = layout.links();

        assert_eq!(entries[0].start_page, 2);
        assert_eq!(links[0].target_page_index, 1);
        for i in 1..counts.len() {
            assert_eq!(entries[i].start_page, entries[i - 1].start_page + counts[i - 1]);
            assert_eq!(
                links[i].target_page_index,
                links[i - 1].target_page_index + counts[i - 1]
            );
        }
        assert_eq!(layout.total_pages(), 1 + counts.iter().sum::<u32>());
    }

    #[test]
    fn test_no_documents() {
        let layout = build(&[]);
        assert!(layout.lines.is_empty());
        assert!(layout.bookmarks.is_empty());
        assert_eq!(layout.total_pages(), 1);
        assert_eq!(layout.dropped, 0);
    }

    #[test]
    fn test_zero_page_document_points_at_next() {
        let layout = build(&[("A.pdf", 2), ("empty.pdf", 0), ("C.pdf", 1)]);
        let entries = layout.entries();
        assert_eq!(entries[1].start_page, 4);
        assert_eq!(entries[2].start_page, 4);
        assert_eq!(layout.bookmarks[1].target_page_index, 3);
        assert_eq!(layout.bookmarks[2].target_page_index, 3);
        assert_eq!(layout.total_pages(), 4);
    }

    #[test]
    fn test_trailing_zero_page_document_points_at_end() {
        let layout = build(&[("A.pdf", 2), ("empty.pdf", 0)]);
        assert_eq!(layout.lines[1].link.target_page_index, 2);
        assert_eq!(layout.bookmarks[1].target_page_index, 2);
    }

    #[test]
    fn test_cursor_moves_down_by_line_height() {
        let layout = build(&[("a", 1), ("b", 1), ("c", 1)]);
        let baselines: Vec<f32> = layout.lines.iter().map(|l| l.baseline).collect();
        assert_eq!(baselines, vec![734.0, 714.0, 694.0]);

        let rect = layout.lines[0].link.rect;
        assert_eq!(rect.left, 72.0);
        assert_eq!(rect.right, 523.0);
        assert!(rect.bottom < 734.0 && rect.top > 734.0);
        assert!(rect.bottom > layout.lines[1].link.rect.top);
    }

    #[test]
    fn test_truncate_drops_overflow_but_keeps_bookmarks() {
        let docs: Vec<(String, u32)> = (0..40).map(|i| (format!("{}.pdf", i), 1)).collect();
        let layout = TocLayout::build(&docs, &TocOptions::default());

        assert_eq!(layout.lines.len(), 34);
        assert_eq!(layout.dropped, 6);
        assert_eq!(layout.bookmarks.len(), 40);
        assert_eq!(layout.toc_page_count, 1);
        assert!(layout.lines.iter().all(|l| l.baseline >= 72.0));
        assert_eq!(layout.bookmarks[39].target_page_index, 40);
    }

    #[test]
    fn test_paginate_spills_onto_more_pages() {
        let docs: Vec<(String, u32)> = (0..40).map(|i| (format!("{}.pdf", i), 2)).collect();
        let layout = TocLayout::build(&docs, &TocOptions::new().paginate());

        assert_eq!(layout.toc_page_count, 2);
        assert_eq!(layout.lines.len(), 40);
        assert_eq!(layout.dropped, 0);
        assert_eq!(layout.lines_on_page(0).count(), 34);
        assert_eq!(layout.lines_on_page(1).count(), 6);
        assert_eq!(layout.lines[34].baseline, layout.lines[0].baseline);

        assert_eq!(layout.lines[0].entry.start_page, 3);
        assert_eq!(layout.lines[0].link.target_page_index, 2);
        assert_eq!(layout.lines[34].link.toc_page, 1);
        assert_eq!(layout.total_pages(), 2 + 80);
    }

    #[test]
    fn test_to_json() {
        let json = build(&[("A.pdf", 3)]).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["lines"][0]["entry"]["start_page"], 2);
        assert_eq!(value["bookmarks"][0]["target_page_index"], 1);
    }

    #[test]
    fn test_page_without_room_drops_everything() {
        let options = TocOptions::new()
            .paginate()
            .with_page_size(PageSize::Custom {
                width: 300.0,
                height: 150.0,
            });
        let layout = TocLayout::build(&[("a", 1)], &options);
        assert!(layout.lines.is_empty());
        assert_eq!(layout.dropped, 1);
        assert_eq!(layout.toc_page_count, 1);
        assert_eq!(layout.bookmarks.len(), 1);
    }

    #[test]
    fn test_zero_line_height_places_no_lines() {
        let options = TocOptions {
            line_height: 0.0,
            ..TocOptions::new().paginate()
        };
        let layout = TocLayout::build(&[("a", 1)], &options);
        assert!(layout.lines.is_empty());
        assert_eq!(layout.dropped, 1);
        assert_eq!(layout.bookmarks.len(), 1);
        assert_eq!(layout.total_pages(), 2);
    }
}
