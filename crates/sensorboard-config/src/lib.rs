//! Configuration for sensorboard.
//!
//! TOML profiles naming candidate API endpoints, layered with
//! `SENSORBOARD_*` environment variables, and translation to
//! `sensorboard_core::DashboardConfig`. The CLI adds flag overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sensorboard_core::DashboardConfig;
use sensorboard_core::config::DEFAULT_ENDPOINT;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    ProfileNotFound { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named endpoint profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Per-attempt timeout in seconds for every call. Unset keeps each
    /// endpoint's own timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Readings per query.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: None,
            limit: default_limit(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_limit() -> u32 {
    20
}

/// A named set of candidate endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Candidate base URLs, tried in order (e.g. local backend, then Cloud Run).
    pub api_urls: Vec<String>,

    /// Override timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Override readings limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "sensorboard", "sensorboard").map_or_else(
        || PathBuf::from(".sensorboard").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load defaults, then `path` (if it exists), then `SENSORBOARD_*` env.
///
/// Nested keys use a double underscore: `SENSORBOARD_DEFAULTS__TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SENSORBOARD_").split("__"))
        .extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Resolution ──────────────────────────────────────────────────────

impl Config {
    /// Name of the profile to use: explicit, else `default_profile`, else "default".
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Translate the selected profile into a `DashboardConfig`.
    ///
    /// An explicitly named profile must exist. When the implicit default
    /// profile is missing, the local backend is the only candidate.
    pub fn dashboard_config(&self, explicit: Option<&str>) -> Result<DashboardConfig, ConfigError> {
        let name = self.active_profile_name(explicit);
        let Some(profile) = self.profiles.get(&name) else {
            if explicit.is_some() {
                return Err(ConfigError::ProfileNotFound { name });
            }
            return Ok(DashboardConfig {
                endpoints: vec![DEFAULT_ENDPOINT.to_owned()],
                timeout: self.defaults.timeout.map(Duration::from_secs),
                limit: self.defaults.limit,
            });
        };

        profile_to_dashboard_config(profile, &self.defaults)
    }
}

/// Build a `DashboardConfig` from a profile, filling gaps from `defaults`.
pub fn profile_to_dashboard_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<DashboardConfig, ConfigError> {
    let endpoints = validate_urls(&profile.api_urls)?;
    Ok(DashboardConfig {
        endpoints,
        timeout: profile.timeout.or(defaults.timeout).map(Duration::from_secs),
        limit: profile.limit.unwrap_or(defaults.limit),
    })
}

/// Trim, drop blanks and check every entry parses as a URL.
pub fn validate_urls(raw: &[String]) -> Result<Vec<String>, ConfigError> {
    let urls: Vec<String> = raw
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_owned)
        .collect();

    if urls.is_empty() {
        return Err(ConfigError::Validation {
            field: "api_urls".into(),
            reason: "at least one endpoint URL is required".into(),
        });
    }
    for u in &urls {
        url::Url::parse(u).map_err(|e| ConfigError::Validation {
            field: "api_urls".into(),
            reason: format!("invalid URL '{u}': {e}"),
        })?;
    }
    Ok(urls)
}
