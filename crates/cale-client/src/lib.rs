//! CLI, configuration loading, availability and config commands
//!
//! This crate provides the `cale` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod secret;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
