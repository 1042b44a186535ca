//! Calendly provider configuration.

use std::time::Duration;

use url::Url;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::RangeQuery;

/// Configuration for the Calendly provider.
#[derive(Clone)]
pub struct CalendlyConfig {
    /// Personal access token for the Calendly API.
    pub api_token: String,

    /// URI of the user owning the event types. Looked up via `users/me`
    /// when unset.
    pub user_uri: Option<String>,

    /// Base URL of the authenticated REST API.
    pub api_base: String,

    /// Base URL of the public booking site serving the availability range.
    pub booking_base: String,

    /// Timezone the availability range is requested in.
    pub timezone: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl CalendlyConfig {
    /// Default REST API base URL.
    pub const DEFAULT_API_BASE: &'static str = "https://api.calendly.com";

    /// Default booking site base URL.
    pub const DEFAULT_BOOKING_BASE: &'static str = "https://calendly.com";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

    /// Creates a new configuration with the given API token and defaults.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            user_uri: None,
            api_base: Self::DEFAULT_API_BASE.to_string(),
            booking_base: Self::DEFAULT_BOOKING_BASE.to_string(),
            timezone: RangeQuery::DEFAULT_TIMEZONE.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("cale/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the owning user's URI, skipping the `users/me` lookup.
    pub fn with_user_uri(mut self, uri: impl Into<String>) -> Self {
        self.user_uri = Some(uri.into());
        self
    }

    /// Sets the REST API base URL.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the booking site base URL.
    pub fn with_booking_base(mut self, base: impl Into<String>) -> Self {
        self.booking_base = base.into();
        self
    }

    /// Sets the timezone for availability queries.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the REST API base without a trailing slash.
    pub(crate) fn api_base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    /// Returns the booking base without a trailing slash.
    pub(crate) fn booking_base(&self) -> &str {
        self.booking_base.trim_end_matches('/')
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty token or timezone, a zero
    /// timeout, or a base URL that is not an absolute http(s) URL.
    pub fn validate(&self) -> ProviderResult<()> {
        if self.api_token.trim().is_empty() {
            return Err(ProviderError::configuration("Calendly API token is empty"));
        }
        if self.timezone.trim().is_empty() {
            return Err(ProviderError::configuration("timezone is empty"));
        }
        if self.timeout.is_zero() {
            return Err(ProviderError::configuration("timeout must be greater than zero"));
        }
        validate_base("api_base", &self.api_base)?;
        validate_base("booking_base", &self.booking_base)?;
        if let Some(ref uri) = self.user_uri {
            Url::parse(uri).map_err(|e| {
                ProviderError::configuration(format!("invalid user_uri {}: {}", uri, e))
                    .with_source(e)
            })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for CalendlyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendlyConfig")
            .field("api_token", &"<redacted>")
            .field("user_uri", &self.user_uri)
            .field("api_base", &self.api_base)
            .field("booking_base", &self.booking_base)
            .field("timezone", &self.timezone)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn validate_base(name: &str, base: &str) -> ProviderResult<()> {
    let url = Url::parse(base).map_err(|e| {
        ProviderError::configuration(format!("invalid {} {}: {}", name, base, e)).with_source(e)
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ProviderError::configuration(format!(
            "{} must use http or https, got {}",
            name, other
        ))),
    }
}
