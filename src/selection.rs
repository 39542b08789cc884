use crate::error::{FileIssue, SelectionError};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::num::IntErrorKind;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Largest file accepted by default (500 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 500 * 1024 * 1024;

/// Which of the three ways of splitting a document the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    EveryN,
    SpecificPages,
    Ranges,
}

impl FromStr for SplitMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "every_n" | "every-n" | "every" => Ok(SplitMode::EveryN),
            "pages" | "specific_pages" | "specific-pages" | "specific" => {
                Ok(SplitMode::SpecificPages)
            }
            "ranges" => Ok(SplitMode::Ranges),
            other => anyhow::bail!("Unknown split mode: {}", other),
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SplitMode::EveryN => "every_n",
            SplitMode::SpecificPages => "pages",
            SplitMode::Ranges => "ranges",
        })
    }
}

/// An inclusive, 1-based page range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    /// Parse a `start-end` token and check it against the document's page count.
    pub fn parse(token: &str, total_pages: u32) -> Result<Self, SelectionError> {
        let token = token.trim();
        let (start, end) = token
            .split_once('-')
            .ok_or_else(|| SelectionError::NotARange(token.to_string()))?;

        let (Some(start), Some(end)) = (parse_range_bound(start), parse_range_bound(end)) else {
            return Err(SelectionError::InvalidRangeToken(token.to_string()));
        };

        if !in_bounds(start, total_pages) || !in_bounds(end, total_pages) {
            return Err(SelectionError::OutOfRangeToken {
                token: token.to_string(),
                total: total_pages,
            });
        }

        if start > end {
            return Err(SelectionError::InvertedRange(token.to_string()));
        }

        Ok(PageRange {
            start: start as u32,
            end: end as u32,
        })
    }

    /// Every page in the range, ascending.
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Normalized, validated selection for one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Pages per output file.
    EveryN(u32),
    /// Ascending, deduplicated pages for a single output file.
    SpecificPages(Vec<u32>),
    /// Ranges in the order the user typed them.
    Ranges(Vec<PageRange>),
}

impl Selection {
    pub fn mode(&self) -> SplitMode {
        match self {
            Selection::EveryN(_) => SplitMode::EveryN,
            Selection::SpecificPages(_) => SplitMode::SpecificPages,
            Selection::Ranges(_) => SplitMode::Ranges,
        }
    }
}

/// Name, declared type and size of a candidate input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub name: String,
    /// Empty when the source did not report a type.
    pub mime_type: String,
    pub size: u64,
}

impl FileMetadata {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        FileMetadata {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }

    /// Metadata for a file on disk. The filesystem reports no type, so it is left empty.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)
            .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(FileMetadata::new(name, "", meta.len()))
    }
}

/// Reject files that cannot be a usable PDF before trying to open them.
pub fn validate_file_metadata(
    file: Option<&FileMetadata>,
    max_bytes: u64,
) -> Result<(), SelectionError> {
    let file = file.ok_or(FileIssue::Missing)?;

    if !file.name.to_lowercase().ends_with(".pdf") {
        return Err(FileIssue::NotPdfExtension.into());
    }

    if !file.mime_type.is_empty() && file.mime_type != "application/pdf" {
        return Err(FileIssue::WrongMimeType(file.mime_type.clone()).into());
    }

    if file.size > max_bytes {
        return Err(FileIssue::TooLarge {
            size: file.size,
            max: max_bytes,
        }
        .into());
    }

    if file.size == 0 {
        return Err(FileIssue::Empty.into());
    }

    Ok(())
}

/// Validate the pages-per-file value for every-N mode.
pub fn validate_every_n(raw: &str, total_pages: u32) -> Result<u32, SelectionError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SelectionError::EmptyInput);
    }

    let n = parse_int(raw).ok_or_else(|| SelectionError::NotANumber(raw.to_string()))?;
    if !in_bounds(n, total_pages) {
        return Err(SelectionError::OutOfRange {
            value: raw.to_string(),
            total: total_pages,
        });
    }

    Ok(n as u32)
}

/// Parse a comma-separated list of pages and ranges like "1, 3, 5-10" into
/// an ascending, deduplicated page list.
pub fn parse_page_list(raw: &str, total_pages: u32) -> Result<Vec<u32>, SelectionError> {
    if raw.trim().is_empty() {
        return Err(SelectionError::EmptyInput);
    }

    let mut pages = BTreeSet::new();
    for token in tokens(raw, ',') {
        if token.contains('-') {
            pages.extend(PageRange::parse(token, total_pages)?.pages());
        } else {
            let page = parse_int(token)
                .ok_or_else(|| SelectionError::InvalidNumberToken(token.to_string()))?;
            if !in_bounds(page, total_pages) {
                return Err(SelectionError::OutOfRangeToken {
                    token: token.to_string(),
                    total: total_pages,
                });
            }
            pages.insert(page as u32);
        }
    }

    if pages.is_empty() {
        return Err(SelectionError::NoPagesSpecified);
    }

    Ok(pages.into_iter().collect())
}

/// Parse a semicolon-separated list of ranges like "1-5; 10-15".
///
/// Ranges keep the order they were given in and are neither merged nor
/// deduplicated, so overlapping ranges yield overlapping output files.
pub fn parse_range_list(raw: &str, total_pages: u32) -> Result<Vec<PageRange>, SelectionError> {
    if raw.trim().is_empty() {
        return Err(SelectionError::EmptyInput);
    }

    let ranges = tokens(raw, ';')
        .map(|token| PageRange::parse(token, total_pages))
        .collect::<Result<Vec<_>, _>>()?;

    if ranges.is_empty() {
        return Err(SelectionError::NoRangesSpecified);
    }

    Ok(ranges)
}

/// Run the parser for `mode` over raw input.
pub fn validate_selection(
    mode: SplitMode,
    raw: &str,
    total_pages: u32,
) -> Result<Selection, SelectionError> {
    let result = match mode {
        SplitMode::EveryN => validate_every_n(raw, total_pages).map(Selection::EveryN),
        SplitMode::SpecificPages => parse_page_list(raw, total_pages).map(Selection::SpecificPages),
        SplitMode::Ranges => parse_range_list(raw, total_pages).map(Selection::Ranges),
    };

    match &result {
        Ok(_) => debug!(%mode, input = raw, "selection valid"),
        Err(e) => debug!(%mode, input = raw, code = e.code(), "selection invalid"),
    }

    result
}

fn tokens(raw: &str, separator: char) -> impl Iterator<Item = &str> {
    raw.split(separator).map(str::trim).filter(|t| !t.is_empty())
}

/// Parse a whole token as a base-10 integer. Values too large for `i64` saturate
/// so they are reported as out of range instead of as non-numbers.
fn parse_int(s: &str) -> Option<i64> {
    match s.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Range ends are unsigned; a sign here means a stray `+` or an extra hyphen.
fn parse_range_bound(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.starts_with(['+', '-']) {
        return None;
    }
    parse_int(s)
}

fn in_bounds(n: i64, total_pages: u32) -> bool {
    n >= 1 && n <= i64::from(total_pages)
}
