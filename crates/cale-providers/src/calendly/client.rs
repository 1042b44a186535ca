//! Calendly API client.
//!
//! This module provides a low-level HTTP client for the Calendly REST API
//! and the public booking endpoint, handling authentication, request
//! building, and response parsing.

use std::collections::HashSet;

use cale_core::SlotDay;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::api::{EventTypesResponse, MeResponse, RangeResponse};
use super::config::CalendlyConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::event_type::EventType;
use crate::provider::RangeQuery;

/// Page size requested from the `event_types` endpoint.
const EVENT_TYPES_PAGE_SIZE: &str = "100";

/// Upper bound on `event_types` pages followed for one user.
const MAX_EVENT_TYPE_PAGES: usize = 50;

/// Calendly API client.
pub struct CalendlyClient {
    http_client: reqwest::Client,
    access_token: String,
    api_base: String,
    booking_base: String,
}

impl CalendlyClient {
    /// Creates a new client from the provider configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &CalendlyConfig) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            http_client,
            access_token: config.api_token.clone(),
            api_base: config.api_base().to_string(),
            booking_base: config.booking_base().to_string(),
        })
    }

    /// Returns the URI of the user owning the API token.
    pub async fn current_user_uri(&self) -> ProviderResult<String> {
        let url = format!("{}/users/me", self.api_base);
        let request = self.http_client.get(&url).bearer_auth(&self.access_token);
        let me: MeResponse = self.send_json(request).await?;
        debug!("resolved current user {}", me.resource.uri);
        Ok(me.resource.uri)
    }

    /// Lists all event types owned by a user, following pagination.
    pub async fn list_event_types(&self, user_uri: &str) -> ProviderResult<Vec<EventType>> {
        let mut event_types = Vec::new();
        let mut next_page: Option<String> = None;
        let mut seen_pages = HashSet::new();

        for _ in 0..MAX_EVENT_TYPE_PAGES {
            let request = match next_page.take() {
                Some(url) => self.http_client.get(url),
                None => self
                    .http_client
                    .get(format!("{}/event_types", self.api_base))
                    .query(&[("user", user_uri), ("count", EVENT_TYPES_PAGE_SIZE)]),
            };

            let page: EventTypesResponse = self
                .send_json(request.bearer_auth(&self.access_token))
                .await?;
            let next = page.next_page().map(str::to_string);
            event_types.extend(page.collection.into_iter().map(EventType::from));

            match next {
                None => {
                    debug!("fetched {} event types for {}", event_types.len(), user_uri);
                    return Ok(event_types);
                }
                Some(url) if !seen_pages.insert(url.clone()) => {
                    return Err(ProviderError::invalid_response(format!(
                        "event_types pagination repeats page {}",
                        url
                    )));
                }
                Some(url) => next_page = Some(url),
            }
        }

        Err(ProviderError::invalid_response(format!(
            "event_types pagination exceeded {} pages",
            MAX_EVENT_TYPE_PAGES
        )))
    }

    /// Builds the booking range URL for an event type.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the booking base cannot be joined
    /// with the event type path.
    pub fn range_url(&self, uuid: &str, query: &RangeQuery) -> ProviderResult<Url> {
        let raw = format!(
            "{}/api/booking/event_types/{}/calendar/range",
            self.booking_base,
            urlencoding::encode(uuid)
        );
        let mut url = Url::parse(&raw).map_err(|e| {
            ProviderError::configuration(format!("invalid booking URL {}: {}", raw, e))
                .with_source(e)
        })?;

        url.query_pairs_mut()
            .append_pair("timezone", &query.timezone)
            .append_pair("range_start", &query.start_param())
            .append_pair("range_end", &query.end_param())
            .append_pair("diagnostics", "false");

        Ok(url)
    }

    /// Fetches the offered slots of an event type, grouped by day.
    ///
    /// The booking endpoint is public; no token is sent.
    pub async fn fetch_range(&self, uuid: &str, query: &RangeQuery) -> ProviderResult<Vec<SlotDay>> {
        let url = self.range_url(uuid, query)?;
        debug!("fetching availability from {}", url);

        let range: RangeResponse = self.send_json(self.http_client.get(url)).await?;
        let days: Vec<SlotDay> = range.days.into_iter().map(SlotDay::from).collect();

        debug!(
            "fetched {} days ({} slots) for event type {}",
            days.len(),
            days.iter().map(|d| d.slots.len()).sum::<usize>(),
            uuid
        );
        Ok(days)
    }

    /// Sends a request and decodes a JSON body, mapping failures to
    /// provider errors.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ProviderResult<T> {
        let response = request
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                let err = if e.is_timeout() {
                    ProviderError::network("request timeout")
                } else if e.is_connect() {
                    ProviderError::network(format!("connection failed: {}", e))
                } else {
                    ProviderError::network(format!("request failed: {}", e))
                };
                err.with_source(e)
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(ProviderError::rate_limited(format!(
                "rate limit exceeded{}",
                retry_after
                    .map(|s| format!(", retry after {} seconds", s))
                    .unwrap_or_default()
            )));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::authentication("API token expired or invalid"));
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::authorization("access denied"));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::not_found(format!(
                "resource not found: {}",
                response.url()
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::server(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let body = response.text().await.map_err(|e| {
            ProviderError::network(format!("failed to read response: {}", e)).with_source(e)
        })?;

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse response: {}", e))
                .with_source(e)
        })
    }
}

impl std::fmt::Debug for CalendlyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendlyClient")
            .field("api_base", &self.api_base)
            .field("booking_base", &self.booking_base)
            .finish_non_exhaustive()
    }
}
