//! Subcommand handlers

pub mod config;
pub mod serve;
pub mod tools;

use crate::cli::Cli;
use anyhow::Context;
use mcp_local_config::{ConfigProvider, Settings};

/// Load settings from every source, then apply command-line overrides
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut provider = ConfigProvider::new();
    if let Some(path) = &cli.config {
        provider = provider.with_config_file(path);
    }
    let mut settings = provider.load().context("Failed to load configuration")?;
    apply_overrides(&mut settings, cli);
    settings
        .validate()
        .context("Invalid command-line override")?;
    Ok(settings)
}

fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(dir) = &cli.backup_dir {
        settings.backup_dir = dir.clone();
    }
    if let Some(max_history) = cli.max_history {
        settings.max_edit_history = max_history;
    }
}
