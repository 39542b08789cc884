use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::commands::open_checked;
use crate::commands::split::write_outputs;
use crate::config::Config;
use crate::error::SelectionError;
use crate::pdf::PdfDocument;
use crate::plan::{OutputFileSpec, Preview};
use crate::selection::{FileMetadata, SplitMode};
use crate::session::{SessionState, SplitResult, SplitSession};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitPreviewRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Split mode: 'every_n', 'pages' or 'ranges'")]
    pub mode: String,
    #[schemars(
        description = "Mode input: pages per file (e.g. '10'), a page list (e.g. '1, 3, 5-10') or ranges (e.g. '1-5; 10-15')"
    )]
    pub value: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Split mode: 'every_n', 'pages' or 'ranges'")]
    pub mode: String,
    #[schemars(
        description = "Mode input: pages per file (e.g. '10'), a page list (e.g. '1, 3, 5-10') or ranges (e.g. '1-5; 10-15')"
    )]
    pub value: String,
    #[schemars(description = "Directory to write the output files to (default: configured output directory)")]
    #[serde(default)]
    pub output_dir: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    config: Config,
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    /// Open the file and validate `value` for `mode` against it.
    fn prepare(&self, path: &str, mode: &str, value: &str) -> Result<(PdfDocument, SplitSession)> {
        let mode: SplitMode = mode.parse()?;
        let doc = open_checked(path, &self.config)?;
        let mut session = SplitSession::new(doc.page_count());
        if let SessionState::Invalid(e) = session.input_changed(mode, value) {
            return Err(e.clone().into());
        }
        Ok((doc, session))
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get the file name, size and page count of a PDF")]
    fn pdf_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        let metadata = match FileMetadata::from_path(&path) {
            Ok(m) => m,
            Err(e) => return error_text(&e),
        };
        match open_checked(&path, &self.config) {
            Ok(doc) => {
                let result = PdfInfoResult {
                    page_count: doc.page_count(),
                    name: metadata.name,
                    size_bytes: metadata.size,
                    path,
                };
                to_json(&result)
            }
            Err(e) => error_text(&e),
        }
    }

    #[tool(
        description = "Preview how a PDF would be split, without writing anything. Modes: 'every_n' (value: pages per file), 'pages' (value: comma-separated pages and ranges, one output file), 'ranges' (value: semicolon-separated ranges, one file per range)."
    )]
    fn pdf_split_preview(&self, Parameters(req): Parameters<PdfSplitPreviewRequest>) -> String {
        let (_, session) = match self.prepare(&req.path, &req.mode, &req.value) {
            Ok(p) => p,
            Err(e) => return error_text(&e),
        };
        let Some(selection) = session.selection() else {
            return "Error: input was not validated".to_string();
        };

        let files = selection.plan(session.total_pages());
        let result = SplitPreviewResult {
            total_pages: session.total_pages(),
            preview: Preview::from_plan(selection.mode(), &files),
            files,
        };
        to_json(&result)
    }

    #[tool(
        description = "Split a PDF into several files written to an output directory. Takes the same modes and values as pdf_split_preview."
    )]
    fn pdf_split(&self, Parameters(req): Parameters<PdfSplitRequest>) -> String {
        let (doc, mut session) = match self.prepare(&req.path, &req.mode, &req.value) {
            Ok(p) => p,
            Err(e) => return error_text(&e),
        };

        let output_dir = req
            .output_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| self.config.output_dir.clone());
        if let Err(e) = std::fs::create_dir_all(&output_dir) {
            return format!("Error: Failed to create directory {}: {}", output_dir.display(), e);
        }

        let plan = match session.begin_split() {
            Ok(p) => p,
            Err(e) => return format!("Error: {}", e),
        };
        let delay = Duration::from_millis(self.config.emit_delay_ms);
        // The writer loop blocks (and may sleep between files), so hand this
        // worker's other tasks off while it runs.
        let outcome =
            tokio::task::block_in_place(|| write_outputs(&doc, &plan, &output_dir, delay));
        session.finish_split(outcome);

        match session.state() {
            SessionState::Failed(message) => format!("Error: Failed to split PDF: {}", message),
            _ => {
                info!(files = session.results().len(), "split finished");
                to_json(&SplitToolResult {
                    output_dir: output_dir.display().to_string(),
                    files: session.results().to_vec(),
                })
            }
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PdfInfoResult {
    pub path: String,
    pub name: String,
    pub page_count: u32,
    pub size_bytes: u64,
}

#[derive(Debug, Serialize)]
pub struct SplitPreviewResult {
    pub total_pages: u32,
    pub preview: Preview,
    pub files: Vec<OutputFileSpec>,
}

#[derive(Debug, Serialize)]
pub struct SplitToolResult {
    pub output_dir: String,
    pub files: Vec<SplitResult>,
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("Error: {}", e))
}

/// Tool error text, tagged with the validation code when there is one.
fn error_text(e: &anyhow::Error) -> String {
    match e.downcast_ref::<SelectionError>() {
        Some(selection) => format!("Error: {} [{}]", selection, selection.code()),
        None => format!("Error: {:#}", e),
    }
}

impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF splitting tools. Use pdf_info to get the page count, pdf_split_preview to \
                 check a selection and see the planned output files, and pdf_split to write them."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server(config: Config) -> Result<()> {
    let server = PdfServer::new(config);

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::sample_pdf;

    fn server_with_sample(pages: u32) -> (PdfServer, tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, sample_pdf(pages)).unwrap();
        let path = path.display().to_string();
        (PdfServer::new(Config::default()), dir, path)
    }

    #[test]
    fn test_info() {
        let (server, _dir, path) = server_with_sample(3);
        let out = server.pdf_info(Parameters(PathRequest { path }));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["page_count"], 3);
        assert_eq!(json["name"], "doc.pdf");
    }

    #[test]
    fn test_preview() {
        let (server, _dir, path) = server_with_sample(25);
        let out = server.pdf_split_preview(Parameters(PdfSplitPreviewRequest {
            path,
            mode: "every_n".into(),
            value: "10".into(),
        }));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["files"].as_array().unwrap().len(), 3);
        assert_eq!(json["files"][2]["display_range"], "21-25");
        assert_eq!(json["preview"]["items"][0], "File 1: pages 1-10");
    }

    #[test]
    fn test_preview_reports_validation_code() {
        let (server, _dir, path) = server_with_sample(10);
        let out = server.pdf_split_preview(Parameters(PdfSplitPreviewRequest {
            path,
            mode: "pages".into(),
            value: "5-3".into(),
        }));
        assert!(out.starts_with("Error:"));
        assert!(out.ends_with("[InvertedRange]"));
    }

    #[test]
    fn test_split_writes_files() {
        let (server, dir, path) = server_with_sample(5);
        let out_dir = dir.path().join("out");
        let out = server.pdf_split(Parameters(PdfSplitRequest {
            path,
            mode: "ranges".into(),
            value: "1-3;2-4".into(),
            output_dir: Some(out_dir.display().to_string()),
        }));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["files"][0]["name"], "range_1_pages_1-3.pdf");
        assert_eq!(json["files"][1]["page_range"], "2-4");
        assert!(out_dir.join("range_2_pages_2-4.pdf").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_split_inside_runtime() {
        let (server, dir, path) = server_with_sample(4);
        let out_dir = dir.path().join("out");
        let out = server.pdf_split(Parameters(PdfSplitRequest {
            path,
            mode: "every_n".into(),
            value: "2".into(),
            output_dir: Some(out_dir.display().to_string()),
        }));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["files"].as_array().unwrap().len(), 2);
        assert!(out_dir.join("file_2.pdf").exists());
    }

    #[test]
    fn test_unknown_mode() {
        let (server, _dir, path) = server_with_sample(5);
        let out = server.pdf_split_preview(Parameters(PdfSplitPreviewRequest {
            path,
            mode: "halves".into(),
            value: "2".into(),
        }));
        assert_eq!(out, "Error: Unknown split mode: halves");
    }
}
