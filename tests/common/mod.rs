//! In-memory PDF fixtures shared by the integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Build a PDF whose pages each draw the given lines in Helvetica.
pub fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new(
                "Td",
                vec![72.into(), (720 - 20 * i as i64).into()],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations }.encode().unwrap();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// A PDF with `count` pages, each saying `"<label> page <n>"`.
pub fn labelled_pdf(label: &str, count: usize) -> Vec<u8> {
    let texts: Vec<String> = (1..=count).map(|n| format!("{} page {}", label, n)).collect();
    let lines: Vec<[&str; 1]> = texts.iter().map(|t| [t.as_str()]).collect();
    let pages: Vec<&[&str]> = lines.iter().map(|l| &l[..]).collect();
    pdf_with_pages(&pages)
}

/// A structurally valid PDF with an empty page tree.
pub fn empty_pdf() -> Vec<u8> {
    pdf_with_pages(&[])
}

/// Resolve an outline or annotation destination to its 0-based page index.
pub fn destination_page(doc: &Document, dest: &Object) -> Option<usize> {
    let target = dest.as_array().ok()?.first()?.as_reference().ok()?;
    doc.get_pages()
        .values()
        .position(|&id| id == target)
}

/// Titles and target page indices of the top-level outline items.
pub fn outline_targets(doc: &Document) -> Vec<(Vec<u8>, usize)> {
    let Ok(root) = doc.trailer.get(b"Root").and_then(Object::as_reference) else {
        return Vec::new();
    };
    let Ok(catalog) = doc.get_dictionary(root) else {
        return Vec::new();
    };
    let Ok(outlines) = catalog
        .get(b"Outlines")
        .and_then(Object::as_reference)
        .and_then(|id| doc.get_dictionary(id))
    else {
        return Vec::new();
    };

    let mut items = Vec::new();
    let mut next = outlines.get(b"First").and_then(Object::as_reference).ok();
    while let Some(id) = next {
        let item = doc.get_dictionary(id).unwrap();
        let title = match item.get(b"Title").unwrap() {
            Object::String(bytes, _) => bytes.clone(),
            other => panic!("unexpected title {:?}", other),
        };
        let page = destination_page(doc, item.get(b"Dest").unwrap()).unwrap();
        items.push((title, page));
        next = item.get(b"Next").and_then(Object::as_reference).ok();
    }
    items
}

/// Target page indices of the link annotations on page `page_number`.
pub fn link_targets(doc: &Document, page_number: u32) -> Vec<usize> {
    let pages = doc.get_pages();
    let page = doc.get_dictionary(pages[&page_number]).unwrap();
    let Ok(annots) = page.get(b"Annots").and_then(Object::as_array) else {
        return Vec::new();
    };
    annots
        .iter()
        .map(|a| {
            let annot = doc.get_dictionary(a.as_reference().unwrap()).unwrap();
            destination_page(doc, annot.get(b"Dest").unwrap()).unwrap()
        })
        .collect()
}
