//! Content streams for the generated table-of-contents pages.

use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

use crate::layout::{leader_line, TocLayout, TocOptions};

/// Resource name of the entry font (Helvetica).
pub const ENTRY_FONT: &str = "F1";

/// Resource name of the heading font (Helvetica-Bold).
pub const TITLE_FONT: &str = "F2";

/// Draw TOC page `toc_page`: the heading, then `title ..... page` per line.
pub fn toc_page_content(layout: &TocLayout, toc_page: u32, options: &TocOptions) -> Content {
    let (page_width, _) = options.page_size.dimensions();
    let available = page_width - 2.0 * options.margin_x;
    let mut operations = Vec::new();

    let heading = if toc_page == 0 {
        options.title.clone()
    } else {
        format!("{} (continued)", options.title)
    };
    push_text(
        &mut operations,
        TITLE_FONT,
        options.title_font_size,
        options.margin_x,
        options.title_baseline(),
        &heading,
    );

    for line in layout.lines_on_page(toc_page) {
        let page = line.entry.start_page.to_string();
        let drawn = leader_line(
            &line.entry.title,
            &page,
            options.leader,
            options.entry_font_size,
            available,
        );
        push_text(
            &mut operations,
            ENTRY_FONT,
            options.entry_font_size,
            options.margin_x,
            line.baseline,
            &drawn.head(),
        );
        push_text(
            &mut operations,
            ENTRY_FONT,
            options.entry_font_size,
            options.margin_x + drawn.page_x,
            line.baseline,
            &drawn.page,
        );
    }

    Content { operations }
}

fn push_text(ops: &mut Vec<Operation>, font: &str, size: f32, x: f32, y: f32, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font.as_bytes().to_vec()), Object::Real(size)],
    ));
    ops.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Encode text for a WinAnsi simple font.
///
/// ASCII and the Latin-1 upper half map to themselves, everything else
/// becomes `?`. Glyphs beyond that need an embedded font.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ 0x20..=0x7E | code @ 0xA0..=0xFF => code as u8,
            _ => b'?',
        })
        .collect()
}
