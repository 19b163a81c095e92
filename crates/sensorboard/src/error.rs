//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a distinct exit code per class.

use miette::Diagnostic;
use thiserror::Error;

use sensorboard_config::ConfigError;
use sensorboard_core::{CoreError, SERVICE_UNAVAILABLE_MESSAGE};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REMOTE: i32 = 5;
    pub const UNAVAILABLE: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(sensorboard::connection_failed),
        help(
            "Check that the API is running and reachable.\n\
             Last failure: {reason}\n\
             Override endpoints with: sensorboard --api-url http://localhost:8000 health"
        )
    )]
    ConnectionFailed { message: String, reason: String },

    #[error("{}", SERVICE_UNAVAILABLE_MESSAGE)]
    #[diagnostic(
        code(sensorboard::service_unavailable),
        help("The storage backend is down. Run: sensorboard health")
    )]
    ServiceUnavailable,

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(sensorboard::api_error), help("The API answered with HTTP {status}."))]
    Remote { status: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sensorboard::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(sensorboard::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: sensorboard config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(sensorboard::config),
        help(
            "Locate the file with: sensorboard config path\n\
             Rewrite it with: sensorboard config init"
        )
    )]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(sensorboard::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(sensorboard::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::ServiceUnavailable => exit_code::UNAVAILABLE,
            Self::Remote { .. } => exit_code::REMOTE,
            Self::Validation { .. } => exit_code::USAGE,
            Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Config { .. } => exit_code::CONFIG,
            Self::Io(_) | Self::Json(_) | Self::Yaml(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Connection { ref reason } => CliError::ConnectionFailed {
                reason: reason.clone(),
                message: err.to_string(),
            },
            CoreError::ServiceUnavailable => CliError::ServiceUnavailable,
            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Remote { status, message } => CliError::Remote {
                status: status.map_or_else(|| "2xx with an unreadable body".into(), |s| s.to_string()),
                message,
            },
            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::ProfileNotFound { name } => CliError::ProfileNotFound {
                name,
                available: "(none)".into(),
            },
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
