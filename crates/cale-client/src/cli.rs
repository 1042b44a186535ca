//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// cale - a Calendly helper that prints open meeting windows
#[derive(Debug, Parser)]
#[command(name = "cale")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CALE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(flatten)]
    pub query: QueryArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Availability query flags.
///
/// Unset values fall back to the `[filters]` and `[calendly]` sections of
/// the configuration file, then to built-in defaults.
#[derive(Debug, Clone, Default, Args)]
pub struct QueryArgs {
    /// Event type slug (e.g. 30min)
    pub slug: Option<String>,

    // --- Range flags ---
    /// Number of days to query, starting today [default: 21]
    #[arg(long, short = 'n', value_name = "N")]
    pub num_days_in_future: Option<u32>,

    /// Timezone the slots are requested in [default: America/New_York]
    #[arg(long, value_name = "TZ")]
    pub timezone: Option<String>,

    /// HTTP request timeout in seconds [default: 15]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    // --- Filter flags ---
    /// Omit weekends
    #[arg(long, short = 'w')]
    pub weekdays: bool,

    /// Omit slots starting after this time (3, 3PM, 3 PM, 3:04PM, 3:04 PM)
    #[arg(long, short = 's', value_name = "TIME")]
    pub start_by: Option<String>,

    /// Omit slots ending after this time (3, 3PM, 3 PM, 3:04PM, 3:04 PM)
    #[arg(long, short = 'e', value_name = "TIME")]
    pub end_by: Option<String>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
