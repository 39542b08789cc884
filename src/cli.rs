use crate::selection::SplitMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfsplit")]
#[command(about = "Split a PDF into smaller PDFs by page count, page list, or page ranges")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Display file name, page count and size
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Check that a file is acceptable for splitting without opening it
    Check {
        /// File to check
        path: PathBuf,
    },

    /// Show which files a split would produce
    Preview {
        /// PDF file to split
        path: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Split a PDF into several files
    Split {
        /// PDF file to split
        path: PathBuf,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output directory (defaults to the configured one)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print the preview and stop
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct SelectionArgs {
    /// Pages per output file (e.g., "10")
    #[arg(long, allow_hyphen_values = true)]
    pub every: Option<String>,

    /// Pages for a single output file (e.g., "1, 3, 5-10")
    #[arg(long, allow_hyphen_values = true)]
    pub pages: Option<String>,

    /// One output file per range (e.g., "1-5; 10-15")
    #[arg(long, allow_hyphen_values = true)]
    pub ranges: Option<String>,
}

impl SelectionArgs {
    /// The chosen mode and its raw input.
    pub fn mode_and_input(&self) -> (SplitMode, &str) {
        match (&self.every, &self.pages, &self.ranges) {
            (Some(n), _, _) => (SplitMode::EveryN, n.as_str()),
            (_, Some(pages), _) => (SplitMode::SpecificPages, pages.as_str()),
            (_, _, Some(ranges)) => (SplitMode::Ranges, ranges.as_str()),
            // clap's required group rules this out
            (None, None, None) => (SplitMode::EveryN, ""),
        }
    }
}
