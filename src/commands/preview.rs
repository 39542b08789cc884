use crate::config::Config;
use crate::error::SelectionError;
use crate::plan::Preview;
use crate::selection::SplitMode;
use crate::session::{SessionState, SplitSession};
use anyhow::Result;
use std::path::Path;

use super::open_checked;

pub fn run<P: AsRef<Path>>(path: P, mode: SplitMode, input: &str, config: &Config) -> Result<()> {
    let doc = open_checked(&path, config)?;
    let mut session = SplitSession::new(doc.page_count());
    let preview = validated_preview(&mut session, mode, input)?;
    print(&preview);
    Ok(())
}

/// Feed `input` to the session and return its preview, or the validation error.
pub fn validated_preview(
    session: &mut SplitSession,
    mode: SplitMode,
    input: &str,
) -> Result<Preview, SelectionError> {
    if let SessionState::Invalid(e) = session.input_changed(mode, input) {
        return Err(e.clone());
    }
    Ok(session.preview().unwrap_or_default())
}

pub fn print(preview: &Preview) {
    println!("{}", preview.title);
    for item in &preview.items {
        println!("  {}", item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_preview() {
        let mut session = SplitSession::new(12);
        let preview = validated_preview(&mut session, SplitMode::Ranges, "10-12; 1-2").unwrap();
        assert_eq!(preview.title, "2 file(s) will be created:");
        assert_eq!(preview.items, vec!["File 1: pages 10-12", "File 2: pages 1-2"]);
    }

    #[test]
    fn test_validated_preview_error() {
        let mut session = SplitSession::new(12);
        let err = validated_preview(&mut session, SplitMode::Ranges, "3").unwrap_err();
        assert_eq!(err, SelectionError::NotARange("3".into()));
    }
}
