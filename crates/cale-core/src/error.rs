//! Core error types.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors produced while turning raw availability into schedule lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The service returned no day entries for the queried range.
    #[error("no slots found")]
    NoAvailability,

    /// A cutoff or slot timestamp could not be parsed.
    #[error("could not parse time: {value} ({reason})")]
    TimeParse { value: String, reason: String },
}

impl CoreError {
    /// Creates a time parse error.
    pub fn time_parse(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TimeParse {
            value: value.into(),
            reason: reason.into(),
        }
    }
}
