//! cale CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use cale_client::cli::{Cli, Command, ConfigAction};
use cale_client::commands;
use cale_client::config::{ClientConfig, load_dotenv};
use cale_client::error::ClientResult;
use cale_core::{TracingConfig, init_tracing};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ~/.env may set RUST_LOG, so it is loaded before tracing starts.
    let dotenv = if is_config_path(&cli) {
        Ok(())
    } else {
        load_dotenv()
    };

    let tracing = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::cli()
    };
    if let Err(e) = init_tracing(tracing) {
        eprintln!("warning: {}", e);
    }

    let result = match dotenv {
        Ok(()) => run(cli).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// `config path` works without reading `~/.env` or the config file.
fn is_config_path(cli: &Cli) -> bool {
    matches!(
        cli.command,
        Some(Command::Config {
            action: ConfigAction::Path
        })
    )
}

async fn run(cli: Cli) -> ClientResult<()> {
    if is_config_path(&cli) {
        return commands::config::path(cli.config.as_deref());
    }

    let config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };

    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config, cli.config.as_deref()),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(cli.config.as_deref()),
        },
        None => commands::availability::run(&cli.query, &config).await,
    }
}
