use crate::config::Config;
use crate::selection::FileMetadata;
use anyhow::Result;
use std::path::Path;

use super::open_checked;

pub fn run<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let metadata = FileMetadata::from_path(&path)?;
    let doc = open_checked(&path, config)?;

    println!("File: {}", metadata.name);
    println!("Pages: {}", doc.page_count());
    println!("Size: {}", format_file_size(metadata.size));

    Ok(())
}

/// Human-readable size with up to two decimals, e.g. "1.5 MB".
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(500 * 1024 * 1024), "500 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 + 1), "3 GB");
        assert_eq!(format_file_size(5000 * 1024 * 1024 * 1024), "5000 GB");
    }
}
