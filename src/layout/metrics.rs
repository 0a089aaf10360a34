//! Glyph widths of the standard Helvetica font, used to right-align page
//! numbers and size dotted leaders without embedding a font.

/// Advance widths (1/1000 em) for ASCII 32..=126 from the Helvetica AFM.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Width used for characters outside the table.
const FALLBACK_WIDTH: u16 = 556;

/// Width of `text` in points when set in Helvetica at `font_size`.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c) as u32).sum();
    units as f32 * font_size / 1000.0
}

fn glyph_width(c: char) -> u16 {
    match c as u32 {
        code @ 32..=126 => HELVETICA_WIDTHS[(code - 32) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Build `title<leaders>page` so that the page number ends at `available`
/// points from the line start. The title is shortened with an ellipsis when
/// it would leave no room for at least a few leader characters.
pub fn leader_line(title: &str, page: &str, leader: char, font_size: f32, available: f32) -> LeaderLine {
    let leader_width = text_width(&leader.to_string(), font_size);
    let page_width = text_width(page, font_size);
    let gap = text_width(" ", font_size);
    let min_leaders = 3.0 * leader_width;

    let mut title = title.to_string();
    let budget = available - page_width - 2.0 * gap - min_leaders;
    if text_width(&title, font_size) > budget {
        title = truncate_to_width(&title, font_size, budget);
    }

    let title_width = text_width(&title, font_size);
    let fill = (available - title_width - page_width - 2.0 * gap).max(0.0);
    let count = if leader_width > 0.0 {
        (fill / leader_width).floor() as usize
    } else {
        0
    };

    LeaderLine {
        title,
        leaders: leader.to_string().repeat(count),
        page: page.to_string(),
        page_x: available - page_width,
    }
}

fn truncate_to_width(text: &str, font_size: f32, budget: f32) -> String {
    const ELLIPSIS: &str = "...";
    let budget = budget - text_width(ELLIPSIS, font_size);
    let mut out = String::new();
    let mut width = 0.0;
    for c in text.chars() {
        let w = glyph_width(c) as f32 * font_size / 1000.0;
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}

/// A TOC line split into its drawn parts.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderLine {
    /// Title, possibly shortened
    pub title: String,
    /// Leader characters between title and page number
    pub leaders: String,
    /// Page number text
    pub page: String,
    /// Offset of the page number from the line start
    pub page_x: f32,
}

impl LeaderLine {
    /// `title leaders` as drawn from the line start.
    pub fn head(&self) -> String {
        if self.leaders.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.leaders)
        }
    }
}
