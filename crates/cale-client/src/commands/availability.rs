//! Availability command: prints the open windows of one event type.

use std::io::Write;
use std::time::Duration;

use cale_core::{AvailabilityPipeline, FilterConfig, TimeOfDay};
use cale_providers::calendly::{CalendlyConfig, CalendlyProvider};
use cale_providers::{AvailabilityProvider, ProviderErrorCode, RangeQuery};
use chrono::Local;
use tracing::debug;

use crate::cli::QueryArgs;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Runs the availability query and prints one line per window to stdout.
pub async fn run(args: &QueryArgs, config: &ClientConfig) -> ClientResult<()> {
    let slug = parse_slug(args.slug.as_deref())?;

    // Bad cutoffs fail before any request is made.
    let filter = filter_config(args, config)?;
    let provider = CalendlyProvider::new(provider_config(args, config)?)?;
    let query = provider.query_for(Local::now().date_naive(), days_in_future(args, config));

    let lines = availability_lines(&provider, slug, &query, filter).await?;

    let mut stdout = std::io::stdout().lock();
    for line in &lines {
        writeln!(stdout, "{}", line)?;
    }
    Ok(())
}

/// Resolves the event type, fetches its slots and runs the pipeline.
pub async fn availability_lines(
    provider: &dyn AvailabilityProvider,
    slug: &str,
    query: &RangeQuery,
    filter: FilterConfig,
) -> ClientResult<Vec<String>> {
    let event_type = provider
        .resolve_event_type(slug)
        .await
        .map_err(|e| match e.code() {
            ProviderErrorCode::EventTypeNotFound => ClientError::LookupNotFound {
                slug: slug.to_string(),
            },
            _ => ClientError::from(e),
        })?;

    let days = provider.fetch_availability(&event_type, query).await?;
    debug!("{} returned {} days", provider.name(), days.len());

    let pipeline = AvailabilityPipeline::new(event_type.duration(), filter);
    Ok(pipeline.run(&days)?)
}

/// Validates the positional argument.
pub fn parse_slug(arg: Option<&str>) -> ClientResult<&str> {
    let slug = arg
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ClientError::Usage("missing event type slug; see 'cale --help'".to_string()))?;

    if slug.starts_with("https") {
        return Err(ClientError::Usage("URL argument not implemented yet".to_string()));
    }
    Ok(slug)
}

/// Builds the filter from flags, falling back to `[filters]`.
pub fn filter_config(args: &QueryArgs, config: &ClientConfig) -> ClientResult<FilterConfig> {
    let settings = &config.filters;
    let mut filter = FilterConfig::new().with_weekdays_only(args.weekdays || settings.weekdays);

    if let Some(raw) = args.start_by.as_ref().or(settings.start_by.as_ref()) {
        filter = filter.with_start_by(raw.parse::<TimeOfDay>()?);
    }
    if let Some(raw) = args.end_by.as_ref().or(settings.end_by.as_ref()) {
        filter = filter.with_end_by(raw.parse::<TimeOfDay>()?);
    }

    Ok(filter)
}

/// Builds the Calendly provider configuration from flags, the config file
/// and the environment.
pub fn provider_config(args: &QueryArgs, config: &ClientConfig) -> ClientResult<CalendlyConfig> {
    let settings = &config.calendly;
    let mut provider = CalendlyConfig::new(config.api_token()?);

    if let Some(ref uri) = settings.user_uri {
        provider = provider.with_user_uri(uri);
    }
    if let Some(ref base) = settings.api_base {
        provider = provider.with_api_base(base);
    }
    if let Some(ref base) = settings.booking_base {
        provider = provider.with_booking_base(base);
    }
    if let Some(tz) = args.timezone.as_ref().or(settings.timezone.as_ref()) {
        provider = provider.with_timezone(tz);
    }
    if let Some(secs) = args.timeout.or(settings.timeout) {
        provider = provider.with_timeout(Duration::from_secs(secs));
    }

    provider.validate()?;
    Ok(provider)
}

/// Returns the query range size from flags, `[filters]`, or the default.
pub fn days_in_future(args: &QueryArgs, config: &ClientConfig) -> u32 {
    args.num_days_in_future
        .or(config.filters.num_days_in_future)
        .unwrap_or(RangeQuery::DEFAULT_DAYS_IN_FUTURE)
}
