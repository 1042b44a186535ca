//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/cale/config.toml` by default.
//!
//! The API token is taken from `CALENDLY_API_KEY` when set, otherwise from
//! `[calendly] api_key`, which supports secret references:
//! - `pass::path/in/store`: resolved via `pass show`
//! - `env::VAR_NAME`: resolved from the environment
//! - plain text: used as-is
//!
//! `~/.env` is loaded into the environment before anything else is read.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Environment variable holding the Calendly API token.
pub const API_KEY_ENV: &str = "CALENDLY_API_KEY";

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the cale client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Calendly connection settings.
    pub calendly: CalendlySettings,

    /// Default filter settings.
    pub filters: FilterSettings,
}

/// Calendly connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendlySettings {
    /// API token (supports `pass::` and `env::` prefixes).
    pub api_key: Option<String>,

    /// Owner of the event types; looked up from the token when unset.
    pub user_uri: Option<String>,

    /// Timezone the slots are requested in.
    pub timezone: Option<String>,

    /// REST API base URL.
    pub api_base: Option<String>,

    /// Booking site base URL.
    pub booking_base: Option<String>,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,
}

/// Default filter settings, overridden by command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Number of days to query, starting today.
    pub num_days_in_future: Option<u32>,

    /// Omit weekends.
    pub weekdays: bool,

    /// Omit slots starting after this time of day.
    pub start_by: Option<String>,

    /// Omit slots ending after this time of day.
    pub end_by: Option<String>,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!("no config file at {}", path.display());
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = toml::from_str(&content).map_err(|e| {
            ClientError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cale")
    }

    /// Resolves the API token from the environment, then the config file.
    pub fn api_token(&self) -> ClientResult<String> {
        self.resolve_api_token(std::env::var(API_KEY_ENV).ok())
    }

    /// Resolves the API token given the value of `CALENDLY_API_KEY`.
    pub(crate) fn resolve_api_token(&self, env_token: Option<String>) -> ClientResult<String> {
        if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
            return Ok(token);
        }

        let raw = self.calendly.api_key.as_deref().ok_or_else(|| {
            ClientError::Config(format!(
                "Calendly API token not found. Set {} or add to {}:\n  \
                 [calendly]\n  \
                 api_key = \"YOUR_TOKEN\"",
                API_KEY_ENV,
                Self::default_path().display()
            ))
        })?;

        crate::secret::resolve(raw)
            .map_err(|e| ClientError::Config(format!("failed to resolve api_key: {}", e)))
    }

    /// Returns a copy safe to print: plain-text tokens are masked, secret
    /// references are kept.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if let Some(ref key) = config.calendly.api_key
            && !crate::secret::is_reference(key)
        {
            config.calendly.api_key = Some("<redacted>".to_string());
        }
        config
    }
}

// ---------------------------------------------------------------------------
// ~/.env
// ---------------------------------------------------------------------------

/// Loads `~/.env` into the process environment if it exists.
///
/// Variables already set in the environment are left untouched.
pub fn load_dotenv() -> ClientResult<()> {
    match dirs::home_dir() {
        Some(home) => load_dotenv_from(&home.join(".env")),
        None => Ok(()),
    }
}

/// Loads a dotenv file if it exists.
pub fn load_dotenv_from(path: &Path) -> ClientResult<()> {
    if !path.exists() {
        return Ok(());
    }
    dotenvy::from_path(path).map_err(|e| {
        ClientError::Config(format!("failed to load {}: {}", path.display(), e))
    })?;
    debug!("loaded environment from {}", path.display());
    Ok(())
}
