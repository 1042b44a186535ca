//! Calendly provider implementation.
//!
//! This module provides a [`CalendlyProvider`] that resolves event types and
//! fetches bookable slots from Calendly.
//!
//! # Request Flow
//!
//! 1. `GET {api_base}/users/me` to find the owning user, unless a user URI
//!    is configured
//! 2. `GET {api_base}/event_types?user=<uri>` and pick the event type whose
//!    slug matches
//! 3. `GET {booking_base}/api/booking/event_types/<uuid>/calendar/range` for
//!    the queried dates; this endpoint needs no token
//!
//! # Example
//!
//! ```ignore
//! use cale_providers::calendly::{CalendlyConfig, CalendlyProvider};
//!
//! let config = CalendlyConfig::new(token).with_timezone("Europe/Paris");
//! let provider = CalendlyProvider::new(config)?;
//!
//! let event_type = provider.resolve_event_type("30min").await?;
//! let days = provider.fetch_availability(&event_type, &query).await?;
//! ```

mod api;
mod client;
mod config;
mod provider;

pub use client::CalendlyClient;
pub use config::CalendlyConfig;
pub use provider::CalendlyProvider;
