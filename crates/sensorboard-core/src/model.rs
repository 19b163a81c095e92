// Domain types
//
// Readings, query filters and the raw create form. Wire types from
// sensorboard-api are converted here; consumers never see `sede` or `ts`.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use sensorboard_api::{NewReading, ReadingQuery, WireReading};

use crate::error::CoreError;
use crate::time;

pub const DEFAULT_LIMIT: u32 = 20;
pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 100;

// ── Timestamp ───────────────────────────────────────────────────────

/// A reading's time in the display zone, or the raw service string when
/// it could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    Local(DateTime<FixedOffset>),
    Unparsed(String),
}

impl Timestamp {
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Local(dt) => Some(dt),
            Self::Unparsed(_) => None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S %:z")),
            Self::Unparsed(raw) => f.write_str(raw),
        }
    }
}

// ── Reading ─────────────────────────────────────────────────────────

/// One observed sensor value. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub site: String,
    pub sensor_type: String,
    pub sensor_id: String,
    pub timestamp: Timestamp,
    pub value: f64,
}

impl Reading {
    /// Convert a wire reading, normalizing its timestamp to local time.
    pub fn from_wire(wire: WireReading) -> Self {
        let timestamp = time::normalize_local(&wire.ts);
        Self {
            site: wire.sede,
            sensor_type: wire.sensor_type,
            sensor_id: wire.sensor_id,
            timestamp,
            value: wire.value,
        }
    }
}

// ── Filters ─────────────────────────────────────────────────────────

/// Current query parameters. Empty strings mean "unselected".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filters {
    pub site: String,
    pub sensor_type: String,
    pub limit: u32,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            site: String::new(),
            sensor_type: String::new(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Filters {
    pub fn clamp_limit(limit: u32) -> u32 {
        limit.clamp(MIN_LIMIT, MAX_LIMIT)
    }

    /// Both site and sensor type selected.
    pub fn is_searchable(&self) -> bool {
        !self.site.is_empty() && !self.sensor_type.is_empty()
    }

    /// Whether a reading for `site`/`sensor_type` would show up under these filters.
    pub fn matches(&self, site: &str, sensor_type: &str) -> bool {
        self.site == site && self.sensor_type == sensor_type
    }

    pub(crate) fn to_query(&self) -> ReadingQuery {
        ReadingQuery {
            sede: self.site.clone(),
            sensor_type: self.sensor_type.clone(),
            limit: self.limit,
        }
    }
}

// ── ReadingDraft ────────────────────────────────────────────────────

/// Raw form input for a new reading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingDraft {
    pub site: String,
    pub sensor_type: String,
    pub sensor_id: String,
    pub value: String,
}

impl ReadingDraft {
    /// Check every field and parse `value`. Fields are trimmed.
    pub fn validate(&self) -> Result<NewReading, CoreError> {
        let site = self.site.trim();
        let sensor_type = self.sensor_type.trim();
        let sensor_id = self.sensor_id.trim();
        let raw_value = self.value.trim();

        if [site, sensor_type, sensor_id, raw_value]
            .iter()
            .any(|f| f.is_empty())
        {
            return Err(CoreError::validation(
                "All fields are required: site, sensor type, sensor id and value",
            ));
        }

        let value = raw_value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                CoreError::validation(format!("Value must be a valid number, got \"{raw_value}\""))
            })?;

        Ok(NewReading {
            sede: site.to_owned(),
            sensor_type: sensor_type.to_owned(),
            sensor_id: sensor_id.to_owned(),
            value,
        })
    }
}
