//! Explicit per-stage outcome.

use serde::{Deserialize, Serialize};

/// Outcome of one pipeline stage.
///
/// A failed stage still carries the partial value it managed to build, so
/// the orchestrator can compose a complete record without unwinding.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    /// The stage finished.
    Complete(T),
    /// The stage failed; `partial` holds what was produced before the failure.
    Failed {
        /// Partial (possibly empty) value
        partial: T,
        /// Failure description
        error: String,
    },
}

impl<T> StageOutcome<T> {
    /// Build a failed outcome.
    pub fn failed(partial: T, error: impl Into<String>) -> Self {
        StageOutcome::Failed {
            partial,
            error: error.into(),
        }
    }

    /// Check if the stage completed.
    pub fn is_complete(&self) -> bool {
        matches!(self, StageOutcome::Complete(_))
    }

    /// The (possibly partial) value.
    pub fn value(&self) -> &T {
        match self {
            StageOutcome::Complete(value) => value,
            StageOutcome::Failed { partial, .. } => partial,
        }
    }

    /// The failure description, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            StageOutcome::Complete(_) => None,
            StageOutcome::Failed { error, .. } => Some(error),
        }
    }

    /// Split into the value and the failure description.
    pub fn into_parts(self) -> (T, Option<String>) {
        match self {
            StageOutcome::Complete(value) => (value, None),
            StageOutcome::Failed { partial, error } => (partial, Some(error)),
        }
    }

    /// Map the carried value, keeping completion state.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> StageOutcome<U> {
        match self {
            StageOutcome::Complete(value) => StageOutcome::Complete(f(value)),
            StageOutcome::Failed { partial, error } => StageOutcome::Failed {
                partial: f(partial),
                error,
            },
        }
    }
}

/// Overall processing status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Extraction and analysis both completed
    Success,
    /// Extraction completed, analysis failed
    Partial,
    /// Extraction failed
    Failed,
}

impl Status {
    /// Derive the status from the two stage outcomes.
    pub fn from_stages<A, B>(extraction: &StageOutcome<A>, analysis: &StageOutcome<B>) -> Self {
        match (extraction.is_complete(), analysis.is_complete()) {
            (false, _) => Status::Failed,
            (true, false) => Status::Partial,
            (true, true) => Status::Success,
        }
    }

    /// Check if this is a success status.
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Success => "success",
            Status::Partial => "partial",
            Status::Failed => "failed",
        };
        f.write_str(s)
    }
}
