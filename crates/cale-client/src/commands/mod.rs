//! CLI command implementations.

pub mod availability;
pub mod config;
