//! CLI configuration: thin wrapper around `sensorboard_config`.
//!
//! Adds resolution that respects `GlobalOpts` overrides (--profile,
//! --api-url, --timeout).

use std::time::Duration;

use clap::ValueEnum;
use sensorboard_config::ConfigError;
use sensorboard_core::DashboardConfig;

use tracing::warn;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use sensorboard_config::{Config, Profile, config_path, load_config, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Load config for the `config` subcommands. An unreadable file falls back
/// to defaults so `config init` can overwrite it.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        warn!(path = %config_path().display(), error = %e, "ignoring unreadable config file");
        Config::default()
    })
}

/// Translate config + flags into a `DashboardConfig`.
///
/// Flag overrides take priority over profile values.
pub fn dashboard_config(global: &GlobalOpts, cfg: &Config) -> Result<DashboardConfig, CliError> {
    let mut dash = match cfg.dashboard_config(global.profile.as_deref()) {
        Ok(dash) => dash,
        Err(ConfigError::ProfileNotFound { name }) => {
            let names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
            return Err(CliError::ProfileNotFound {
                name,
                available: if names.is_empty() {
                    "(none)".into()
                } else {
                    names.join(", ")
                },
            });
        }
        Err(e) => return Err(e.into()),
    };

    if !global.api_urls.is_empty() {
        dash.endpoints = sensorboard_config::validate_urls(&global.api_urls)?;
    }
    if let Some(secs) = global.timeout {
        dash.timeout = Some(Duration::from_secs(secs));
    }
    Ok(dash)
}

/// Output format: flag, else config default, else table.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    global
        .output
        .or_else(|| OutputFormat::from_str(&cfg.defaults.output, true).ok())
        .unwrap_or(OutputFormat::Table)
}

/// Color mode: flag, else config default, else auto.
pub fn color_mode(global: &GlobalOpts, cfg: &Config) -> ColorMode {
    global
        .color
        .or_else(|| ColorMode::from_str(&cfg.defaults.color, true).ok())
        .unwrap_or(ColorMode::Auto)
}
