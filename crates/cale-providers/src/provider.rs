//! AvailabilityProvider trait definition.
//!
//! This module defines the [`AvailabilityProvider`] trait, the abstraction
//! over scheduling services that offer bookable slots.
//!
//! Providers are responsible for:
//! - Resolving an event type from its slug
//! - Fetching the offered slots of an event type for a date range
//! - Handling authentication against the service

use std::future::Future;
use std::pin::Pin;

use cale_core::SlotDay;
use chrono::{Days, NaiveDate};

use crate::error::ProviderResult;
use crate::event_type::EventType;

/// Date range and timezone of an availability query.
///
/// Both bounds are calendar dates in `timezone`; the service reports slot
/// times in that timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range.
    pub end: NaiveDate,
    /// IANA timezone identifier (e.g. `America/New_York`).
    pub timezone: String,
}

impl RangeQuery {
    /// Timezone used when none is configured.
    pub const DEFAULT_TIMEZONE: &'static str = "America/New_York";

    /// Number of days queried when none is configured.
    pub const DEFAULT_DAYS_IN_FUTURE: u32 = 21;

    /// Creates a query for an explicit range.
    pub fn new(start: NaiveDate, end: NaiveDate, timezone: impl Into<String>) -> Self {
        Self {
            start,
            end,
            timezone: timezone.into(),
        }
    }

    /// Creates a query from `today` through `today + days_in_future`.
    pub fn days_from(today: NaiveDate, days_in_future: u32, timezone: impl Into<String>) -> Self {
        let end = today
            .checked_add_days(Days::new(u64::from(days_in_future)))
            .unwrap_or(NaiveDate::MAX);
        Self::new(today, end, timezone)
    }

    /// Returns the start date as `YYYY-MM-DD`.
    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// Returns the end date as `YYYY-MM-DD`.
    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so callers can hold a
/// `&dyn AvailabilityProvider`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The core abstraction for scheduling providers.
///
/// # Example Implementation
///
/// ```ignore
/// impl AvailabilityProvider for MyProvider {
///     fn name(&self) -> &str { "mine" }
///
///     fn resolve_event_type<'a>(&'a self, slug: &'a str) -> BoxFuture<'a, ProviderResult<EventType>> {
///         Box::pin(async move { self.lookup(slug).await })
///     }
///
///     fn fetch_availability<'a>(
///         &'a self,
///         event_type: &'a EventType,
///         query: &'a RangeQuery,
///     ) -> BoxFuture<'a, ProviderResult<Vec<SlotDay>>> {
///         Box::pin(async move { self.range(event_type, query).await })
///     }
/// }
/// ```
pub trait AvailabilityProvider: Send + Sync {
    /// Returns the name/type of this provider (e.g., "calendly").
    fn name(&self) -> &str;

    /// Resolves the event type with the given slug.
    ///
    /// # Errors
    ///
    /// Returns an `EventTypeNotFound` error if no event type has this slug,
    /// or a network/authentication error if the lookup itself fails.
    fn resolve_event_type<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, ProviderResult<EventType>>;

    /// Fetches the offered slots of an event type, grouped by day.
    ///
    /// Days are returned in the order the service reports them. An empty
    /// list means the service reported no days for the range.
    fn fetch_availability<'a>(
        &'a self,
        event_type: &'a EventType,
        query: &'a RangeQuery,
    ) -> BoxFuture<'a, ProviderResult<Vec<SlotDay>>>;
}
