pub mod document;

pub use document::PdfDocument;

use anyhow::Result;

/// Produces the bytes of a new document built from pages of a loaded source.
pub trait SplitBackend {
    /// A serialized document holding the given 1-based pages, in that order.
    fn render_pages(&self, pages: &[u32]) -> Result<Vec<u8>>;
}

#[cfg(test)]
pub(crate) mod testing {
    use lopdf::{Dictionary, Document, Object};

    /// A minimal PDF with `num_pages` blank pages. Page `n` is `100 + n` points
    /// wide so tests can tell pages apart after extraction.
    pub fn sample_pdf(num_pages: u32) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let page_ids: Vec<_> = (1..=num_pages)
            .map(|n| {
                doc.add_object(Dictionary::from_iter(vec![
                    ("Type", Object::Name(b"Page".to_vec())),
                    ("Parent", Object::Reference(pages_id)),
                    (
                        "MediaBox",
                        Object::Array(vec![
                            Object::Integer(0),
                            Object::Integer(0),
                            Object::Integer(100 + n as i64),
                            Object::Integer(792),
                        ]),
                    ),
                ]))
            })
            .collect();

        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(num_pages as i64)),
            (
                "Kids",
                Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
            ),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    /// Widths of each page's MediaBox, in page order.
    pub fn page_widths(bytes: &[u8]) -> Vec<i64> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|id| {
                let page = doc.get_dictionary(*id).unwrap();
                let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
                media_box[2].as_i64().unwrap()
            })
            .collect()
    }
}
