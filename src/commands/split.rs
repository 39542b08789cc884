use crate::config::Config;
use crate::pdf::SplitBackend;
use crate::plan::OutputFileSpec;
use crate::selection::SplitMode;
use crate::session::{SessionState, SplitResult, SplitSession};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

use super::{open_checked, preview};

pub struct SplitOptions<'a> {
    pub mode: SplitMode,
    pub input: &'a str,
    pub output_dir: &'a Path,
    pub dry_run: bool,
}

pub fn run<P: AsRef<Path>>(path: P, options: &SplitOptions<'_>, config: &Config) -> Result<()> {
    let doc = open_checked(&path, config)?;
    let mut session = SplitSession::new(doc.page_count());

    let preview = preview::validated_preview(&mut session, options.mode, options.input)?;
    preview::print(&preview);
    if options.dry_run {
        return Ok(());
    }

    let output_dir = options.output_dir;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let plan = session.begin_split()?;
    let delay = Duration::from_millis(config.emit_delay_ms);
    session.finish_split(write_outputs(&doc, &plan, output_dir, delay));

    if let SessionState::Failed(message) = session.state() {
        error!("split failed: {}", message);
        anyhow::bail!("Failed to split PDF: {}", message);
    }

    let results = session.results();
    println!(
        "\nSplit {} into {} file(s) in {}:",
        path.as_ref().display(),
        results.len(),
        output_dir.display()
    );
    for result in results {
        println!("  {} (pages: {})", result.name, result.page_range);
    }

    Ok(())
}

/// Produce and write each planned file in order, one at a time.
///
/// Stops at the first failure. Files written before it are left in place.
pub fn write_outputs<B: SplitBackend>(
    backend: &B,
    plan: &[OutputFileSpec],
    output_dir: &Path,
    delay: Duration,
) -> Result<Vec<SplitResult>> {
    let mut results = Vec::with_capacity(plan.len());

    for (i, spec) in plan.iter().enumerate() {
        let bytes = backend
            .render_pages(&spec.page_indices)
            .with_context(|| format!("Failed to build {}", spec.suggested_name))?;

        let output_path = output_dir.join(&spec.suggested_name);
        std::fs::write(&output_path, &bytes)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        info!(
            "[{}/{}] wrote {} (pages {})",
            i + 1,
            plan.len(),
            output_path.display(),
            spec.display_range
        );

        results.push(SplitResult {
            name: spec.suggested_name.clone(),
            page_range: spec.display_range.clone(),
            path: output_path.display().to_string(),
            bytes: bytes.len(),
        });

        if !delay.is_zero() && i + 1 < plan.len() {
            std::thread::sleep(delay);
        }
    }

    Ok(results)
}
