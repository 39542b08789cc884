//! Selection-to-split flow for one loaded document.
//!
//! Input changes always go through validation. A split can only start once a
//! selection has validated, and a failed split keeps that selection so it can be
//! retried as is.

use crate::error::SelectionError;
use crate::plan::{OutputFileSpec, Preview};
use crate::selection::{validate_selection, Selection, SplitMode};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// One written output file, as reported back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitResult {
    pub name: String,
    pub page_range: String,
    pub path: String,
    pub bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    PendingValidation,
    Valid,
    Invalid(SelectionError),
    Processing,
    Failed(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Nothing to split: the current input has not been validated")]
    NotValidated,

    #[error("A split is already in progress")]
    Busy,
}

#[derive(Debug)]
pub struct SplitSession {
    total_pages: u32,
    mode: SplitMode,
    input: String,
    state: SessionState,
    selection: Option<Selection>,
    results: Vec<SplitResult>,
}

impl SplitSession {
    pub fn new(total_pages: u32) -> Self {
        SplitSession {
            total_pages,
            mode: SplitMode::EveryN,
            input: String::new(),
            state: SessionState::Idle,
            selection: None,
            results: Vec::new(),
        }
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Results of the last successful split.
    pub fn results(&self) -> &[SplitResult] {
        &self.results
    }

    /// Record new raw input without validating it yet.
    ///
    /// Ignored while a split is running.
    pub fn set_input(&mut self, mode: SplitMode, raw: &str) {
        if self.state == SessionState::Processing {
            warn!("input changed during a split; ignoring");
            return;
        }
        self.mode = mode;
        self.input = raw.to_string();
        self.state = SessionState::PendingValidation;
    }

    /// Validate pending input, settling on `Valid` or `Invalid`.
    pub fn validate(&mut self) -> &SessionState {
        if self.state != SessionState::PendingValidation {
            return &self.state;
        }

        match validate_selection(self.mode, &self.input, self.total_pages) {
            Ok(selection) => {
                self.selection = Some(selection);
                self.state = SessionState::Valid;
            }
            Err(e) => {
                self.selection = None;
                self.state = SessionState::Invalid(e);
            }
        }
        &self.state
    }

    /// `set_input` followed by `validate`, as done on every keystroke.
    pub fn input_changed(&mut self, mode: SplitMode, raw: &str) -> &SessionState {
        self.set_input(mode, raw);
        self.validate()
    }

    pub fn can_split(&self) -> bool {
        self.selection.is_some()
            && matches!(
                self.state,
                SessionState::Valid | SessionState::Failed(_) | SessionState::Idle
            )
    }

    /// Preview of what a split would produce right now.
    pub fn preview(&self) -> Option<Preview> {
        if !self.can_split() {
            return None;
        }
        let selection = self.selection.as_ref()?;
        Some(Preview::from_plan(
            selection.mode(),
            &selection.plan(self.total_pages),
        ))
    }

    /// Enter `Processing` and hand out the plan to execute.
    pub fn begin_split(&mut self) -> Result<Vec<OutputFileSpec>, SessionError> {
        if self.state == SessionState::Processing {
            return Err(SessionError::Busy);
        }
        if !self.can_split() {
            return Err(SessionError::NotValidated);
        }
        let selection = self.selection.as_ref().ok_or(SessionError::NotValidated)?;
        let plan = selection.plan(self.total_pages);

        debug!(files = plan.len(), "split started");
        self.state = SessionState::Processing;
        Ok(plan)
    }

    /// Leave `Processing`. The validated selection survives either outcome.
    pub fn finish_split(&mut self, outcome: anyhow::Result<Vec<SplitResult>>) {
        if self.state != SessionState::Processing {
            warn!("finish_split called with no split in progress");
            return;
        }
        match outcome {
            Ok(results) => {
                self.results = results;
                self.state = SessionState::Idle;
            }
            Err(e) => {
                self.state = SessionState::Failed(format!("{:#}", e));
            }
        }
    }
}
