pub mod check;
pub mod info;
pub mod preview;
pub mod split;

use crate::config::Config;
use crate::pdf::PdfDocument;
use crate::selection::{validate_file_metadata, FileMetadata};
use anyhow::Result;
use std::path::Path;
use tracing::{debug, warn};

/// Check the file's name, type and size, then load it.
pub fn open_checked<P: AsRef<Path>>(path: P, config: &Config) -> Result<PdfDocument> {
    let path = path.as_ref();
    let metadata = FileMetadata::from_path(path)?;
    if let Err(e) = validate_file_metadata(Some(&metadata), config.max_file_bytes) {
        warn!(file = %path.display(), "rejected: {}", e);
        return Err(e.into());
    }

    let doc = PdfDocument::open(path)?;
    debug!(file = %path.display(), pages = doc.page_count(), "loaded");
    Ok(doc)
}
