// Wire types for the sensor-reading service.
//
// Field names follow the service's JSON (`sede`, `sensor_type`, `ts`).
// `sensorboard-core` converts these into domain types.

use serde::{Deserialize, Serialize};

// ── Health ───────────────────────────────────────────────────────────

/// Payload of `GET /`.
///
/// Every field is optional: the probe is informational and an unexpected
/// payload must not fail the call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Whether the service reports a live storage backend connection.
    #[serde(default)]
    pub cassandra_connected: Option<bool>,
}

impl HealthReport {
    /// `true` when the service self-reports as `ok` or `healthy`.
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_deref(), Some("ok" | "healthy"))
    }

    /// Interpret an arbitrary JSON payload, defaulting unknown shapes.
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

// ── Readings ─────────────────────────────────────────────────────────

/// One reading as returned by `GET /readings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireReading {
    pub sede: String,
    pub sensor_type: String,
    pub sensor_id: String,
    /// ISO-8601 timestamp, usually naive UTC.
    pub ts: String,
    pub value: f64,
}

/// Body of `POST /readings`. The service assigns the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReading {
    pub sede: String,
    pub sensor_type: String,
    pub sensor_id: String,
    pub value: f64,
}

/// Response of `POST /readings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatedReading {
    #[serde(default)]
    pub status: Option<String>,
    /// Server-assigned timestamp of the stored reading.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Query parameters of `GET /readings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingQuery {
    pub sede: String,
    pub sensor_type: String,
    pub limit: u32,
}
