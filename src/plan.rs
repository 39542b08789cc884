use crate::selection::{PageRange, Selection, SplitMode};
use serde::Serialize;

/// Joined page lists longer than this are shortened to `first-last` in file names.
const MAX_JOINED_NAME_LEN: usize = 30;

/// One output document, described before it is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFileSpec {
    /// 1-based source pages, in output order.
    pub page_indices: Vec<u32>,
    pub suggested_name: String,
    pub display_range: String,
}

/// Contiguous chunks of `n` pages; the last one may be shorter.
///
/// `n` must already be validated to lie in `1..=total_pages`.
pub fn plan_every_n(n: u32, total_pages: u32) -> Vec<OutputFileSpec> {
    (1..=total_pages)
        .step_by(n as usize)
        .enumerate()
        .map(|(i, start)| {
            let end = start.saturating_add(n - 1).min(total_pages);
            OutputFileSpec {
                page_indices: (start..=end).collect(),
                suggested_name: format!("file_{}.pdf", i + 1),
                // Always hyphenated, even for single-page chunks.
                display_range: format!("{}-{}", start, end),
            }
        })
        .collect()
}

/// A single file holding the given pages, which are already sorted and unique.
pub fn plan_specific_pages(sorted_pages: &[u32]) -> Vec<OutputFileSpec> {
    let joined = sorted_pages
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");

    let suggested_name = match (sorted_pages.first(), sorted_pages.last()) {
        (Some(first), Some(last)) if joined.len() > MAX_JOINED_NAME_LEN => {
            format!("pages_{}-{}.pdf", first, last)
        }
        _ => format!("pages_{}.pdf", joined),
    };

    vec![OutputFileSpec {
        page_indices: sorted_pages.to_vec(),
        suggested_name,
        display_range: joined,
    }]
}

/// One file per range, in the order given.
pub fn plan_ranges(ranges: &[PageRange]) -> Vec<OutputFileSpec> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, range)| OutputFileSpec {
            page_indices: range.pages().collect(),
            suggested_name: format!("range_{}_pages_{}-{}.pdf", i + 1, range.start, range.end),
            display_range: range.to_string(),
        })
        .collect()
}

impl Selection {
    /// The ordered output files this selection produces.
    pub fn plan(&self, total_pages: u32) -> Vec<OutputFileSpec> {
        match self {
            Selection::EveryN(n) => plan_every_n(*n, total_pages),
            Selection::SpecificPages(pages) => plan_specific_pages(pages),
            Selection::Ranges(ranges) => plan_ranges(ranges),
        }
    }
}

/// On-screen summary of a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub title: String,
    pub items: Vec<String>,
}

impl Preview {
    /// Describe an already computed plan, so the preview can never disagree with
    /// what a split writes.
    pub fn from_plan(mode: SplitMode, plan: &[OutputFileSpec]) -> Self {
        match mode {
            SplitMode::SpecificPages => {
                let pages = plan.first().map(|f| f.page_indices.as_slice()).unwrap_or(&[]);
                Preview {
                    title: format!("1 file with {} page(s) will be created:", pages.len()),
                    items: vec![format!(
                        "Pages: {}",
                        pages
                            .iter()
                            .map(u32::to_string)
                            .collect::<Vec<_>>()
                            .join(", ")
                    )],
                }
            }
            SplitMode::EveryN | SplitMode::Ranges => Preview {
                title: format!("{} file(s) will be created:", plan.len()),
                items: plan
                    .iter()
                    .enumerate()
                    .map(|(i, f)| format!("File {}: pages {}", i + 1, f.display_range))
                    .collect(),
            },
        }
    }
}
