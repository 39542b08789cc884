use super::SplitBackend;
use anyhow::{Context, Result};
use lopdf::{Document, ObjectId};
use std::path::Path;

pub struct PdfDocument {
    pub doc: Document,
    pub path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let doc =
            Document::load(&path).with_context(|| format!("Failed to open PDF: {}", path_str))?;
        Self::from_document(doc, path_str)
    }

    pub fn load_mem(bytes: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(bytes).context("Failed to parse PDF")?;
        Self::from_document(doc, String::from("<memory>"))
    }

    fn from_document(doc: Document, path: String) -> Result<Self> {
        let pdf = PdfDocument { doc, path };
        if pdf.page_count() == 0 {
            anyhow::bail!("PDF has no pages: {}", pdf.path);
        }
        Ok(pdf)
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Extract specific pages to a new document.
    ///
    /// Pages are kept in source order, so `pages` must be ascending and free of
    /// duplicates, which every split plan guarantees.
    pub fn extract_pages(&self, pages: &[u32]) -> Result<Document> {
        let all_pages = self.page_ids();
        let total = all_pages.len() as u32;

        for &page in pages {
            if page == 0 || page > total {
                anyhow::bail!("Page {} is out of range (1-{})", page, total);
            }
        }
        if pages.windows(2).any(|w| w[0] >= w[1]) {
            anyhow::bail!("Pages must be ascending without repeats: {:?}", pages);
        }

        let pages_to_delete: Vec<u32> = all_pages
            .iter()
            .filter(|(num, _)| pages.binary_search(num).is_err())
            .map(|(num, _)| *num)
            .collect();

        let mut new_doc = self.doc.clone();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
            new_doc.prune_objects();
        }

        Ok(new_doc)
    }
}

impl SplitBackend for PdfDocument {
    fn render_pages(&self, pages: &[u32]) -> Result<Vec<u8>> {
        let mut new_doc = self.extract_pages(pages)?;
        let mut buffer = Vec::new();
        new_doc
            .save_to(&mut buffer)
            .context("Failed to serialize PDF")?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::{page_widths, sample_pdf};

    #[test]
    fn test_page_count() {
        let pdf = PdfDocument::load_mem(&sample_pdf(7)).unwrap();
        assert_eq!(pdf.page_count(), 7);
    }

    #[test]
    fn test_rejects_document_without_pages() {
        let err = PdfDocument::load_mem(&sample_pdf(0)).err().unwrap();
        assert!(err.to_string().contains("no pages"));
    }

    #[test]
    fn test_render_keeps_requested_pages() {
        let pdf = PdfDocument::load_mem(&sample_pdf(6)).unwrap();
        let bytes = pdf.render_pages(&[2, 4, 5]).unwrap();
        assert_eq!(page_widths(&bytes), vec![102, 104, 105]);
    }

    #[test]
    fn test_render_all_pages() {
        let pdf = PdfDocument::load_mem(&sample_pdf(3)).unwrap();
        let bytes = pdf.render_pages(&[1, 2, 3]).unwrap();
        assert_eq!(page_widths(&bytes), vec![101, 102, 103]);
    }

    #[test]
    fn test_render_rejects_bad_pages() {
        let pdf = PdfDocument::load_mem(&sample_pdf(3)).unwrap();
        assert!(pdf.render_pages(&[0]).is_err());
        assert!(pdf.render_pages(&[4]).is_err());
        assert!(pdf.render_pages(&[2, 1]).is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let err = PdfDocument::open("/nonexistent/input.pdf").err().unwrap();
        assert!(err.to_string().contains("Failed to open PDF"));
    }
}
