//! Sidebar bookmarks and TOC link annotations.

use lopdf::{dictionary, Document, Object, ObjectId, StringFormat};

use crate::model::{Bookmark, LinkRegion};

/// Destination showing the whole target page.
fn fit_destination(page_id: ObjectId) -> Object {
    Object::Array(vec![
        Object::Reference(page_id),
        Object::Name(b"Fit".to_vec()),
    ])
}

/// PDF text string: literal for ASCII, UTF-16BE with BOM otherwise.
pub fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Write a flat outline with one item per bookmark and return the id of the
/// `/Outlines` dictionary, or `None` when there is nothing to bookmark.
pub fn add_outline(
    doc: &mut Document,
    bookmarks: &[Bookmark],
    pages: &[ObjectId],
) -> Option<ObjectId> {
    if bookmarks.is_empty() || pages.is_empty() {
        return None;
    }

    let outlines_id = doc.new_object_id();
    let item_ids: Vec<ObjectId> = bookmarks.iter().map(|_| doc.new_object_id()).collect();
    let last_page = pages.len() - 1;

    for (i, bookmark) in bookmarks.iter().enumerate() {
        let target = pages[(bookmark.target_page_index as usize).min(last_page)];
        let mut item = dictionary! {
            "Title" => text_string(&bookmark.title),
            "Parent" => outlines_id,
            "Dest" => fit_destination(target),
        };
        if i > 0 {
            item.set("Prev", item_ids[i - 1]);
        }
        if let Some(&next) = item_ids.get(i + 1) {
            item.set("Next", next);
        }
        doc.objects.insert(item_ids[i], Object::Dictionary(item));
    }

    doc.objects.insert(
        outlines_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => item_ids[0],
            "Last" => item_ids[item_ids.len() - 1],
            "Count" => item_ids.len() as i64,
        }),
    );

    Some(outlines_id)
}

/// Create `/Link` annotations for the given regions and return their ids,
/// ready for the TOC page's `/Annots` array.
pub fn add_link_annotations(
    doc: &mut Document,
    links: &[&LinkRegion],
    pages: &[ObjectId],
) -> Vec<ObjectId> {
    let Some(last_page) = pages.len().checked_sub(1) else {
        return Vec::new();
    };

    links
        .iter()
        .map(|link| {
            let target = pages[(link.target_page_index as usize).min(last_page)];
            let rect = link.rect.to_array().iter().map(|&v| Object::Real(v)).collect::<Vec<_>>();
            doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Link",
                "Rect" => rect,
                "Border" => vec![0.into(), 0.into(), 0.into()],
                "Dest" => fit_destination(target),
            })
        })
        .collect()
}
