//! Configuration commands.

use std::path::Path;

use crate::cli::QueryArgs;
use crate::commands::availability;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout, with plain-text tokens masked.
pub fn dump(config: &ClientConfig, path: Option<&Path>) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(&config.redacted())
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", config_path(path).display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
///
/// Checks that a token can be resolved, the cutoffs parse, and the
/// Calendly settings are well-formed.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    let defaults = QueryArgs::default();
    availability::filter_config(&defaults, config)?;
    availability::provider_config(&defaults, config)?;

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: Option<&Path>) -> ClientResult<()> {
    println!("config: {}", config_path(path).display());
    Ok(())
}

fn config_path(path: Option<&Path>) -> std::path::PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(ClientConfig::default_path)
}
