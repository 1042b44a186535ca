//! Client error types.

use cale_core::CoreError;
use cale_providers::{ProviderError, ProviderErrorCode};
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
///
/// Every variant is terminal: `main` prints it once and exits non-zero.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// No event type matches the slug.
    #[error("slug not found: {slug}")]
    LookupNotFound { slug: String },

    /// The service reported no days for the queried range.
    #[error("no slots found")]
    NoAvailability,

    /// A time-of-day flag or slot timestamp could not be parsed.
    #[error("could not parse time: {value} ({reason})")]
    TimeParse { value: String, reason: String },

    /// The scheduling service could not be reached or answered badly.
    #[error("{0}")]
    Network(#[source] ProviderError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid command-line usage.
    #[error("{0}")]
    Usage(String),
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoAvailability => Self::NoAvailability,
            CoreError::TimeParse { value, reason } => Self::TimeParse { value, reason },
        }
    }
}

impl From<ProviderError> for ClientError {
    fn from(err: ProviderError) -> Self {
        match err.code() {
            ProviderErrorCode::ConfigurationError => Self::Config(err.message().to_string()),
            _ => Self::Network(err),
        }
    }
}
