//! Calendly wire types.

use cale_core::{RawSlot, SlotDay};
use serde::Deserialize;

use crate::event_type::EventType;

/// Response from `users/me`.
#[derive(Debug, Deserialize)]
pub(crate) struct MeResponse {
    pub(crate) resource: MeResource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MeResource {
    pub(crate) uri: String,
}

/// Response from `event_types`.
#[derive(Debug, Deserialize)]
pub(crate) struct EventTypesResponse {
    #[serde(default)]
    pub(crate) collection: Vec<ApiEventType>,
    #[serde(default)]
    pub(crate) pagination: Option<ApiPagination>,
}

impl EventTypesResponse {
    /// Returns the URL of the next page, if any.
    pub(crate) fn next_page(&self) -> Option<&str> {
        self.pagination
            .as_ref()
            .and_then(|p| p.next_page.as_deref())
            .filter(|next| !next.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiPagination {
    pub(crate) next_page: Option<String>,
}

/// An event type from the API.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEventType {
    pub(crate) uri: String,
    pub(crate) slug: String,
    /// Meeting length in minutes.
    pub(crate) duration: u32,
}

impl From<ApiEventType> for EventType {
    fn from(api: ApiEventType) -> Self {
        EventType::new(api.uri, api.slug, api.duration)
    }
}

/// Response from the booking `calendar/range` endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct RangeResponse {
    #[serde(default)]
    pub(crate) days: Vec<ApiDay>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiDay {
    pub(crate) date: String,
    #[serde(default)]
    pub(crate) status: String,
    #[serde(default)]
    pub(crate) spots: Vec<ApiSpot>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiSpot {
    #[serde(default)]
    pub(crate) status: String,
    pub(crate) start_time: String,
}

impl From<ApiDay> for SlotDay {
    fn from(day: ApiDay) -> Self {
        let slots = day
            .spots
            .into_iter()
            .map(|spot| RawSlot::new(spot.start_time, spot.status))
            .collect();
        SlotDay::new(day.date, day.status, slots)
    }
}
