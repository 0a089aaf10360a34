//! Table-of-contents page options.

use serde::{Deserialize, Serialize};

/// Page size of generated TOC pages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    /// A4 (210 x 297 mm)
    #[default]
    A4,
    /// US Letter (8.5 x 11 inches)
    Letter,
    /// Explicit width and height in points
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// (width, height) in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match *self {
            PageSize::A4 => (595.0, 842.0),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Custom { width, height } => (width, height),
        }
    }
}

/// What happens to TOC lines that do not fit on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Keep a single TOC page and drop the lines past the bottom margin.
    /// Bookmarks are still created for every document.
    #[default]
    Truncate,
    /// Continue the TOC on additional pages.
    Paginate,
}

/// Options for laying out and rendering the TOC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocOptions {
    /// Page size of TOC pages
    pub page_size: PageSize,

    /// Distance from the top edge to the title baseline
    pub margin_top: f32,

    /// Lowest baseline an entry may sit on
    pub margin_bottom: f32,

    /// Left and right margin
    pub margin_x: f32,

    /// Heading printed on the first TOC page
    pub title: String,

    /// Font size of the heading
    pub title_font_size: f32,

    /// Font size of the entries
    pub entry_font_size: f32,

    /// Vertical distance between entry baselines
    pub line_height: f32,

    /// Distance from the heading baseline to the first entry baseline
    pub title_gap: f32,

    /// Overflow behavior
    pub overflow: OverflowPolicy,

    /// Leader character between title and page number
    pub leader: char,
}

impl TocOptions {
    /// Create TOC options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the heading text.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the overflow policy.
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Continue the TOC on further pages instead of dropping lines.
    pub fn paginate(mut self) -> Self {
        self.overflow = OverflowPolicy::Paginate;
        self
    }

    /// Set the top, bottom and side margins.
    pub fn with_margins(mut self, top: f32, bottom: f32, x: f32) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self.margin_x = x;
        self
    }

    /// Set the entry font size and line height.
    pub fn with_entry_metrics(mut self, font_size: f32, line_height: f32) -> Self {
        self.entry_font_size = font_size;
        self.line_height = line_height.max(1.0);
        self
    }

    /// Set the leader character.
    pub fn with_leader(mut self, leader: char) -> Self {
        self.leader = leader;
        self
    }

    /// Baseline of the heading.
    pub fn title_baseline(&self) -> f32 {
        self.page_size.dimensions().1 - self.margin_top
    }

    /// Baseline of the first entry on a TOC page.
    pub fn first_entry_baseline(&self) -> f32 {
        self.title_baseline() - self.title_gap
    }

    /// How many entries fit on one TOC page.
    ///
    /// A line height that is not positive fits nothing.
    pub fn entries_per_page(&self) -> usize {
        let top = self.first_entry_baseline();
        if self.line_height.is_nan() || self.line_height <= 0.0 || top < self.margin_bottom {
            return 0;
        }
        let below_first = ((top - self.margin_bottom) / self.line_height).floor() as usize;
        below_first.saturating_add(1)
    }
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin_top: 72.0,
            margin_bottom: 72.0,
            margin_x: 72.0,
            title: "Table of Contents".to_string(),
            title_font_size: 18.0,
            entry_font_size: 12.0,
            line_height: 20.0,
            title_gap: 36.0,
            overflow: OverflowPolicy::Truncate,
            leader: '.',
        }
    }
}
