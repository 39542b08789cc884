use thiserror::Error;

/// Why a file was rejected before it was ever opened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileIssue {
    #[error("no file selected")]
    Missing,

    #[error("file must have a .pdf extension")]
    NotPdfExtension,

    #[error("file is not a PDF (type {0})")]
    WrongMimeType(String),

    #[error("file is too large ({size} bytes, maximum {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("file is empty")]
    Empty,
}

/// Everything that can be wrong with user-supplied split input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid file: {0}")]
    InvalidFile(FileIssue),

    #[error("No value given")]
    EmptyInput,

    #[error("Not a valid number: \"{0}\"")]
    NotANumber(String),

    #[error("Pages per file must be between 1 and {total} (got {value})")]
    OutOfRange { value: String, total: u32 },

    #[error("Invalid number: \"{0}\"")]
    InvalidNumberToken(String),

    #[error("Invalid range: \"{0}\". Use valid numbers.")]
    InvalidRangeToken(String),

    #[error("Out of range: \"{token}\". Pages go from 1 to {total}.")]
    OutOfRangeToken { token: String, total: u32 },

    #[error("Invalid range: \"{0}\". The start must be less than or equal to the end.")]
    InvertedRange(String),

    #[error("No valid pages specified")]
    NoPagesSpecified,

    #[error("Invalid format: \"{0}\". Must be a range (e.g. 1-5).")]
    NotARange(String),

    #[error("No valid ranges specified")]
    NoRangesSpecified,
}

impl SelectionError {
    /// Stable identifier for callers that branch on the kind of failure.
    pub fn code(&self) -> &'static str {
        match self {
            SelectionError::InvalidFile(_) => "InvalidFile",
            SelectionError::EmptyInput => "EmptyInput",
            SelectionError::NotANumber(_) => "NotANumber",
            SelectionError::OutOfRange { .. } => "OutOfRange",
            SelectionError::InvalidNumberToken(_) => "InvalidNumberToken",
            SelectionError::InvalidRangeToken(_) => "InvalidRangeToken",
            SelectionError::OutOfRangeToken { .. } => "OutOfRangeToken",
            SelectionError::InvertedRange(_) => "InvertedRange",
            SelectionError::NoPagesSpecified => "NoPagesSpecified",
            SelectionError::NotARange(_) => "NotARange",
            SelectionError::NoRangesSpecified => "NoRangesSpecified",
        }
    }
}

impl From<FileIssue> for SelectionError {
    fn from(issue: FileIssue) -> Self {
        SelectionError::InvalidFile(issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_token() {
        let err = SelectionError::InvalidRangeToken("a-3".into());
        assert!(err.to_string().contains("\"a-3\""));

        let err = SelectionError::OutOfRangeToken {
            token: "12".into(),
            total: 10,
        };
        assert_eq!(err.to_string(), "Out of range: \"12\". Pages go from 1 to 10.");
    }

    #[test]
    fn test_file_issue_converts() {
        let err: SelectionError = FileIssue::Empty.into();
        assert_eq!(err.code(), "InvalidFile");
        assert_eq!(err.to_string(), "Invalid file: file is empty");
    }
}
