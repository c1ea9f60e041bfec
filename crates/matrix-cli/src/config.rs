//! Effective client configuration.
//!
//! Precedence: command-line flags, then environment (through clap), then the
//! config file, then built-in defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use matrix_client::ClientConfig;

use crate::cli::Cli;

/// Path of the config file in use.
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(ClientConfig::config_path)
}

/// Load the config file and apply command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let path = config_path(cli);
    let mut config = ClientConfig::load_from(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;

    if let Some(api_url) = &cli.api_url {
        config.api_url.clone_from(api_url);
    }
    if let Some(game_url) = &cli.game_url {
        config.game_url = Some(game_url.clone());
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    config.validate().context("invalid configuration")?;

    tracing::debug!(
        path = %path.display(),
        api_url = %config.api_url,
        timeout_secs = config.timeout_secs,
        "resolved configuration"
    );
    Ok(config)
}
