//! Document information dictionary for merged output.

use chrono::{DateTime, Utc};
use lopdf::{dictionary, Document, Object, ObjectId};

use super::outline::text_string;

/// Format a timestamp as a PDF date (`D:YYYYMMDDHHmmSSZ`).
pub fn pdf_date(time: DateTime<Utc>) -> String {
    format!("D:{}Z", time.format("%Y%m%d%H%M%S"))
}

/// Add an `/Info` dictionary naming the producer and creation time.
pub fn add_info(doc: &mut Document, title: &str, created: DateTime<Utc>) -> ObjectId {
    let producer = format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    doc.add_object(Object::Dictionary(dictionary! {
        "Title" => text_string(title),
        "Producer" => text_string(&producer),
        "CreationDate" => Object::string_literal(pdf_date(created)),
    }))
}
