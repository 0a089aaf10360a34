//! Merging source documents behind generated table-of-contents pages.
//!
//! The output is built in one pass over an empty `lopdf::Document`:
//!
//! 1. every source is renumbered into a disjoint id range and its pages are
//!    moved in, with inherited attributes pushed down onto each page
//! 2. the TOC pages are drawn from a [`TocLayout`] and get one `/Link`
//!    annotation per line
//! 3. a fresh page tree, outline, catalog and info dictionary tie it together

mod metadata;
mod outline;
mod pages;

pub use metadata::pdf_date;
pub use outline::text_string;

use chrono::Utc;
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};
use crate::layout::{TocLayout, TocOptions};
use crate::model::SourceDocument;
use crate::render::{toc_page_content, ENTRY_FONT, TITLE_FONT};

use outline::{add_link_annotations, add_outline};
use pages::import_pages;

/// File name of the merged download.
pub const MERGED_FILE_NAME: &str = "merged_with_clickable_toc.pdf";

/// MIME type of the merged download.
pub const PDF_MIME: &str = "application/pdf";

/// PDF version written when no source asks for a newer one.
const MIN_OUTPUT_VERSION: &str = "1.5";

/// A merged PDF ready to be written or sent.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    /// Serialized PDF
    pub bytes: Vec<u8>,

    /// Suggested download name
    pub file_name: String,

    /// Layout the TOC was drawn from
    pub layout: TocLayout,

    /// Pages in the output, TOC included
    pub page_count: u32,
}

/// `(name, page_count)` for each source, in order.
pub fn scan_page_counts(sources: &[SourceDocument]) -> Vec<(String, u32)> {
    sources
        .iter()
        .map(|s| (s.name().to_string(), s.page_count()))
        .collect()
}

/// Lay out the TOC for `sources` without building any output.
pub fn plan(sources: &[SourceDocument], options: &TocOptions) -> TocLayout {
    TocLayout::build(&scan_page_counts(sources), options)
}

/// Builds merged documents with a clickable table of contents.
#[derive(Debug, Clone, Default)]
pub struct PdfAssembler {
    options: TocOptions,
}

impl PdfAssembler {
    pub fn new(options: TocOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TocOptions {
        &self.options
    }

    /// Merge `sources` in order behind the TOC pages.
    pub fn assemble(&self, sources: Vec<SourceDocument>) -> Result<AssembledDocument> {
        let layout = plan(&sources, &self.options);
        let expected = layout.total_pages();
        log::info!(
            "merging {} documents into {} pages ({} TOC)",
            sources.len(),
            expected,
            layout.toc_page_count
        );

        let version = output_version(&sources);
        let mut output = Document::with_version(version);
        let mut next_id = 1;
        let mut source_pages = Vec::new();
        for source in sources {
            let (name, doc) = source.into_parts();
            source_pages.extend(import_pages(&mut output, &name, doc, &mut next_id)?);
        }
        output.max_id = next_id - 1;

        let pages_id = output.new_object_id();
        let toc_pages = self.add_toc_pages(&mut output, pages_id, &layout)?;

        let mut all_pages = toc_pages.clone();
        all_pages.extend(source_pages.iter().copied());

        for &page_id in &source_pages {
            output
                .get_dictionary_mut(page_id)
                .map_err(|e| Error::Assemble(format!("page {:?}: {}", page_id, e)))?
                .set("Parent", pages_id);
        }

        for (toc_index, &toc_page_id) in toc_pages.iter().enumerate() {
            let links: Vec<_> = layout.lines_on_page(toc_index as u32).map(|l| &l.link).collect();
            let annots = add_link_annotations(&mut output, &links, &all_pages);
            if annots.is_empty() {
                continue;
            }
            let annots: Vec<Object> = annots.into_iter().map(Object::Reference).collect();
            output
                .get_dictionary_mut(toc_page_id)
                .map_err(|e| Error::Assemble(format!("TOC page: {}", e)))?
                .set("Annots", annots);
        }

        let kids: Vec<Object> = all_pages.iter().copied().map(Object::Reference).collect();
        output.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => all_pages.len() as i64,
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };
        if let Some(outlines_id) = add_outline(&mut output, &layout.bookmarks, &all_pages) {
            catalog.set("Outlines", outlines_id);
            catalog.set("PageMode", "UseOutlines");
        }
        let catalog_id = output.add_object(catalog);
        let info_id = metadata::add_info(&mut output, &self.options.title, Utc::now());
        output.trailer.set("Root", catalog_id);
        output.trailer.set("Info", info_id);

        let pruned = output.prune_objects();
        if !pruned.is_empty() {
            log::debug!("pruned {} unreachable objects", pruned.len());
        }

        let page_count = output.get_pages().len() as u32;
        if page_count != expected {
            return Err(Error::Assemble(format!(
                "expected {} pages, built {}",
                expected, page_count
            )));
        }

        let mut bytes = Vec::new();
        output.save_to(&mut bytes)?;

        Ok(AssembledDocument {
            bytes,
            file_name: MERGED_FILE_NAME.to_string(),
            layout,
            page_count,
        })
    }

    /// Add the TOC page objects, returning their ids in order.
    fn add_toc_pages(
        &self,
        output: &mut Document,
        pages_id: ObjectId,
        layout: &TocLayout,
    ) -> Result<Vec<ObjectId>> {
        let (width, height) = self.options.page_size.dimensions();
        let entry_font = output.add_object(font("Helvetica"));
        let title_font = output.add_object(font("Helvetica-Bold"));
        let resources = output.add_object(dictionary! {
            "Font" => dictionary! {
                ENTRY_FONT => entry_font,
                TITLE_FONT => title_font,
            },
        });

        let mut ids = Vec::with_capacity(layout.toc_page_count as usize);
        for toc_page in 0..layout.toc_page_count {
            let content = toc_page_content(layout, toc_page, &self.options).encode()?;
            let content_id = output.add_object(Stream::new(dictionary! {}, content));
            ids.push(output.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), Object::Real(width), Object::Real(height)],
                "Resources" => resources,
                "Contents" => content_id,
            }));
        }
        Ok(ids)
    }
}

fn font(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Highest header version among the sources, at least 1.5.
fn output_version(sources: &[SourceDocument]) -> String {
    let parse = |v: &str| -> (u32, u32) {
        let mut parts = v.split('.').map(|p| p.parse::<u32>().unwrap_or(0));
        (parts.next().unwrap_or(0), parts.next().unwrap_or(0))
    };
    sources
        .iter()
        .map(|s| s.version())
        .chain(std::iter::once(MIN_OUTPUT_VERSION))
        .max_by_key(|v| parse(v))
        .unwrap_or(MIN_OUTPUT_VERSION)
        .to_string()
}

/// Merge `sources` with the given options.
pub fn assemble(sources: Vec<SourceDocument>, options: &TocOptions) -> Result<AssembledDocument> {
    PdfAssembler::new(options.clone()).assemble(sources)
}
