//! Calendly provider implementation.
//!
//! This module implements the [`AvailabilityProvider`] trait for Calendly.

use cale_core::SlotDay;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};
use crate::event_type::{EventType, find_by_slug};
use crate::provider::{AvailabilityProvider, BoxFuture, RangeQuery};

use super::client::CalendlyClient;
use super::config::CalendlyConfig;

const PROVIDER_NAME: &str = "calendly";

/// Calendly provider.
///
/// Event types are looked up with the API token; availability comes from the
/// public booking endpoint.
#[derive(Debug)]
pub struct CalendlyProvider {
    config: CalendlyConfig,
    client: CalendlyClient,
}

impl CalendlyProvider {
    /// Creates a new Calendly provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: CalendlyConfig) -> ProviderResult<Self> {
        config
            .validate()
            .map_err(|e| e.with_provider(PROVIDER_NAME))?;
        let client = CalendlyClient::new(&config).map_err(|e| e.with_provider(PROVIDER_NAME))?;
        Ok(Self { config, client })
    }

    /// Builds a query from `today` through `today + days_in_future` in the
    /// configured timezone.
    pub fn query_for(&self, today: NaiveDate, days_in_future: u32) -> RangeQuery {
        RangeQuery::days_from(today, days_in_future, self.config.timezone.as_str())
    }

    /// Returns the configured user URI, or asks the API for the token owner.
    async fn user_uri(&self) -> ProviderResult<String> {
        match self.config.user_uri {
            Some(ref uri) => Ok(uri.clone()),
            None => self.client.current_user_uri().await,
        }
    }

    async fn resolve(&self, slug: &str) -> ProviderResult<EventType> {
        let user_uri = self.user_uri().await?;
        let event_types = self.client.list_event_types(&user_uri).await?;

        let event_type = find_by_slug(&event_types, slug)
            .cloned()
            .ok_or_else(|| ProviderError::event_type_not_found(slug))?;

        info!(
            "resolved event type {} ({} minutes)",
            event_type.slug, event_type.duration_minutes
        );
        Ok(event_type)
    }

    async fn fetch(&self, event_type: &EventType, query: &RangeQuery) -> ProviderResult<Vec<SlotDay>> {
        let uuid = event_type.uuid()?;
        debug!(
            "querying {} from {} to {} in {}",
            uuid,
            query.start_param(),
            query.end_param(),
            query.timezone
        );
        self.client.fetch_range(&uuid, query).await
    }
}

impl AvailabilityProvider for CalendlyProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn resolve_event_type<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, ProviderResult<EventType>> {
        Box::pin(async move {
            self.resolve(slug)
                .await
                .map_err(|e| e.with_provider(PROVIDER_NAME))
        })
    }

    fn fetch_availability<'a>(
        &'a self,
        event_type: &'a EventType,
        query: &'a RangeQuery,
    ) -> BoxFuture<'a, ProviderResult<Vec<SlotDay>>> {
        Box::pin(async move {
            self.fetch(event_type, query)
                .await
                .map_err(|e| e.with_provider(PROVIDER_NAME))
        })
    }
}
