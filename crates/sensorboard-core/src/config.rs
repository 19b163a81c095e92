// ── Runtime dashboard configuration ──
//
// Describes which endpoints to try and how long to wait. Never touches
// disk: the CLI resolves profiles and hands a `DashboardConfig` in.

use std::time::Duration;

use crate::model::DEFAULT_LIMIT;

/// Used when no endpoint is configured anywhere.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Candidate base URLs, tried in order.
    pub endpoints: Vec<String>,
    /// Per-attempt timeout for every call. `None` keeps each endpoint's
    /// own timeout.
    pub timeout: Option<Duration>,
    /// Initial readings limit.
    pub limit: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoints: vec![DEFAULT_ENDPOINT.to_owned()],
            timeout: None,
            limit: DEFAULT_LIMIT,
        }
    }
}
