//! Moving source pages into the output document.

use lopdf::{Document, Object, ObjectId};

use crate::error::{Error, Result};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `/Parent` chains in damaged files.
const MAX_TREE_DEPTH: usize = 64;

/// Page-tree and catalog objects that are rebuilt for the output.
const REBUILT_TYPES: [&[u8]; 3] = [b"Catalog", b"Pages", b"Outlines"];

/// Renumber `doc` from `next_id`, move its objects into `output` and return
/// its pages in order. `next_id` is advanced past the imported ids.
pub fn import_pages(
    output: &mut Document,
    name: &str,
    mut doc: Document,
    next_id: &mut u32,
) -> Result<Vec<ObjectId>> {
    doc.renumber_objects_with(*next_id);
    *next_id = doc.max_id + 1;

    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    for &page_id in &page_ids {
        inherit_attributes(&mut doc, page_id)?;
    }

    let mut moved = 0usize;
    for (id, object) in std::mem::take(&mut doc.objects) {
        if is_rebuilt(&object) {
            continue;
        }
        output.objects.insert(id, object);
        moved += 1;
    }

    log::debug!(
        "imported {}: {} pages, {} objects",
        name,
        page_ids.len(),
        moved
    );
    Ok(page_ids)
}

/// Copy inherited attributes onto the page so it survives losing its
/// original page tree.
fn inherit_attributes(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let page = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::Assemble(format!("page {:?}: {}", page_id, e)))?;

    let mut missing: Vec<&[u8]> = INHERITABLE
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut found: Vec<(&[u8], Object)> = Vec::new();
    let mut depth = 0;

    while let Some(node_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };
        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((*key, value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }

    if found.is_empty() {
        return Ok(());
    }
    let page = doc
        .get_dictionary_mut(page_id)
        .map_err(|e| Error::Assemble(format!("page {:?}: {}", page_id, e)))?;
    for (key, value) in found {
        page.set(key.to_vec(), value);
    }
    Ok(())
}

fn is_rebuilt(object: &Object) -> bool {
    let dict = match object {
        Object::Dictionary(dict) => dict,
        _ => return false,
    };
    match dict.get(b"Type").and_then(Object::as_name) {
        Ok(name) => REBUILT_TYPES.contains(&name),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    /// Two pages under a nested page tree; resources and media box only on
    /// the root node.
    fn nested_tree() -> Document {
        let mut doc = Document::with_version("1.5");
        let root_id = doc.new_object_id();
        let inner_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let page_a = doc.add_object(dictionary! { "Type" => "Page", "Parent" => inner_id });
        let page_b = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => inner_id,
            "MediaBox" => vec![0.into(), 0.into(), 300.into(), 300.into()],
        });
        doc.objects.insert(
            inner_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Parent" => root_id,
                "Kids" => vec![page_a.into(), page_b.into()],
                "Count" => 2,
            }),
        );
        doc.objects.insert(
            root_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![inner_id.into()],
                "Count" => 2,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            }),
        );
        let catalog = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => root_id });
        doc.trailer.set("Root", catalog);
        doc
    }

    #[test]
    fn test_import_inherits_and_drops_tree() {
        let mut output = Document::with_version("1.5");
        let mut next_id = 1;
        let page_ids = import_pages(&mut output, "a.pdf", nested_tree(), &mut next_id).unwrap();

        assert_eq!(page_ids.len(), 2);
        assert!(next_id > 1);

        let first = output.get_dictionary(page_ids[0]).unwrap();
        assert!(first.has(b"Resources"));
        let media_box = first.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box[2].as_i64().unwrap(), 595);

        let second = output.get_dictionary(page_ids[1]).unwrap();
        let media_box = second.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box[2].as_i64().unwrap(), 300);

        assert!(output.objects.values().all(|o| !is_rebuilt(o)));
    }

    #[test]
    fn test_import_advances_ids_without_overlap() {
        let mut output = Document::with_version("1.5");
        let mut next_id = 1;
        let a = import_pages(&mut output, "a.pdf", nested_tree(), &mut next_id).unwrap();
        let after_first = next_id;
        let b = import_pages(&mut output, "b.pdf", nested_tree(), &mut next_id).unwrap();

        assert!(a.iter().all(|id| id.0 < after_first));
        assert!(b.iter().all(|id| id.0 >= after_first));
    }
}
