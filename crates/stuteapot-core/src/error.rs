//! Scoring error types.
//!
//! Defined as a typed enum so callers can tell malformed answers apart from
//! I/O or configuration failures without string matching.

use thiserror::Error;

/// Errors raised while scoring a response set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// A scored field holds a value that is not an integer answer.
    #[error("invalid answer for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
}

impl ScoringError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ScoringError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// The field identifier the error refers to.
    pub fn field(&self) -> &str {
        match self {
            ScoringError::InvalidInput { field, .. } => field,
        }
    }
}
