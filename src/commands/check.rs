use crate::config::Config;
use crate::selection::{validate_file_metadata, FileMetadata};
use anyhow::Result;
use std::path::Path;

use super::info::format_file_size;

pub fn run<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let metadata = FileMetadata::from_path(&path)?;
    validate_file_metadata(Some(&metadata), config.max_file_bytes)?;

    println!(
        "OK: {} ({})",
        metadata.name,
        format_file_size(metadata.size)
    );

    Ok(())
}
