use thiserror::Error;

/// Top-level error type for the `sensorboard-api` crate.
///
/// Describes what went wrong with a single HTTP exchange. The fallback sweep
/// in [`ApiClient::call`](crate::ApiClient::call) returns the error of the
/// last candidate tried, unchanged. `sensorboard-core` classifies these into
/// user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// The candidate list was empty after trimming and deduplication.
    #[error("No API endpoints configured")]
    NoCandidates,

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, reset, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The per-attempt timeout elapsed before a response arrived.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Service ─────────────────────────────────────────────────────
    /// Non-2xx response. `detail` comes from the `{ "detail": ... }` body.
    #[error("API error (HTTP {status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Request body could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(serde_json::Error),
}

impl Error {
    /// Returns `true` when no HTTP response was received at all
    /// (connect failure, reset, or timeout).
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout { .. })
    }

    /// HTTP status of the response, if the service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for HTTP 503 (service up, storage backend down).
    pub fn is_service_unavailable(&self) -> bool {
        self.status() == Some(503)
    }

    /// The service-provided `detail` message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
