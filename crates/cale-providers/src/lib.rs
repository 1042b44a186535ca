//! AvailabilityProvider trait and implementations.
//!
//! This crate provides the abstraction layer between the scheduling service
//! and the core pipeline:
//!
//! - [`AvailabilityProvider`] - The trait every scheduling backend implements
//! - [`EventType`] - A bookable meeting template resolved by slug
//! - [`RangeQuery`] - The date range and timezone of an availability query
//! - [`ProviderError`] - Error types for provider operations
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Calendly API   │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │ CalendlyProvider │
//! └────────┬─────────┘
//!          │  AvailabilityProvider
//!          ▼
//!   ┌─────────────┐     ┌──────────────────────┐
//!   │  SlotDay[]  │ ──▶ │ AvailabilityPipeline │
//!   └─────────────┘     └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cale_providers::{AvailabilityProvider, RangeQuery};
//!
//! async fn slots(provider: &dyn AvailabilityProvider, query: &RangeQuery) -> ProviderResult<Vec<SlotDay>> {
//!     let event_type = provider.resolve_event_type("30min").await?;
//!     provider.fetch_availability(&event_type, query).await
//! }
//! ```

pub mod calendly;
pub mod error;
pub mod event_type;
pub mod provider;

// Re-export main types at crate root
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use event_type::{EventType, find_by_slug};
pub use provider::{AvailabilityProvider, BoxFuture, RangeQuery};
