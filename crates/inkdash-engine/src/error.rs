//! Error types for inkdash-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A single provider event could not be normalized. Callers skip it and
    /// carry on with the rest of the batch.
    #[error("Malformed event '{summary}': {reason}")]
    MalformedEvent { summary: String, reason: String },

    #[error("Invalid day window: {0}")]
    InvalidWindow(String),

    #[error("Invalid layout: {0} display days (expected 1, 2 or 3)")]
    InvalidLayout(usize),

    #[error("Invalid event limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid time format: {0} (expected 12 or 24)")]
    InvalidClock(u32),
}

impl EngineError {
    pub(crate) fn malformed(summary: Option<&str>, reason: impl Into<String>) -> Self {
        EngineError::MalformedEvent {
            summary: summary.unwrap_or("<untitled>").to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
