use crate::selection::DEFAULT_MAX_FILE_BYTES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings that can be supplied as a JSON file via `--config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Largest input file accepted, in bytes.
    pub max_file_bytes: u64,
    /// Pause between consecutive output files, in milliseconds.
    pub emit_delay_ms: u64,
    /// Where output files go when no directory is given on the command line.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            emit_delay_ms: 0,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load from `path`, or fall back to defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.max_file_bytes, 500 * 1024 * 1024);
        assert_eq!(config.emit_delay_ms, 0);
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "emit_delay_ms": 300 }"#).unwrap();
        assert_eq!(config.emit_delay_ms, 300);
        assert_eq!(config.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::from_json(r#"{ "theme": "dark" }"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdfsplit.json");
        std::fs::write(&path, r#"{ "max_file_bytes": 1024, "output_dir": "out" }"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.max_file_bytes, 1024);
        assert_eq!(config.output_dir, PathBuf::from("out"));

        assert!(Config::load(Some(&dir.path().join("missing.json"))).is_err());
    }
}
