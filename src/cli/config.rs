//! Config command - show effective configuration

use crate::cli::style::Stylize;
use anstream::println;
use formsync::config::Config;
use formsync::error::{Error, Result};

/// Print the effective configuration as JSON
pub fn run_config(config: &Config) -> Result<()> {
    let path = Config::default_path()
        .map_or_else(|| "(no config directory)".to_string(), |p| p.display().to_string());
    println!("{} {}", "Config file:".emphasis(), path.muted());

    let rendered = serde_json::to_string_pretty(config)
        .map_err(|e| Error::Internal(format!("failed to render config: {e}")))?;
    println!("{rendered}");

    Ok(())
}
