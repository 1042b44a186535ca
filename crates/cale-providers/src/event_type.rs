//! Event types: bookable meeting templates resolved by slug.

use chrono::Duration;
use url::Url;

use crate::error::{ProviderError, ProviderResult};

/// A bookable meeting template on the scheduling service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventType {
    /// Canonical resource URI; its last path segment is the identifier.
    pub uri: String,
    /// URL slug chosen by the owner (e.g. `30min`).
    pub slug: String,
    /// Length of one meeting, shared by every slot of this event type.
    pub duration_minutes: u32,
}

impl EventType {
    /// Creates a new event type.
    pub fn new(uri: impl Into<String>, slug: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            uri: uri.into(),
            slug: slug.into(),
            duration_minutes,
        }
    }

    /// Returns the slot duration.
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Returns the identifier: the last non-empty path segment of the URI.
    ///
    /// # Errors
    ///
    /// Returns an invalid-response error if the URI cannot be parsed or has
    /// no path.
    pub fn uuid(&self) -> ProviderResult<String> {
        let url = Url::parse(&self.uri).map_err(|e| {
            ProviderError::invalid_response(format!("invalid event type URI {}: {}", self.uri, e))
        })?;
        url.path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderError::invalid_response(format!("event type URI has no identifier: {}", self.uri))
            })
    }
}

/// Finds the first event type with the given slug.
pub fn find_by_slug<'a>(event_types: &'a [EventType], slug: &str) -> Option<&'a EventType> {
    event_types.iter().find(|et| et.slug == slug)
}
