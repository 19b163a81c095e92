// Timestamp normalization
//
// The service stores UTC and usually serializes it without an offset
// (`2024-05-01T12:00:00.123456`). Offsets are honored when present.
// Conversion goes through chrono's zone rules so DST transitions resolve
// per instant.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::model::Timestamp;

/// Parse a service timestamp into a UTC instant.
///
/// Accepts RFC 3339 (with `Z` or an explicit offset) and naive ISO-8601
/// with `T` or space separator, optional fractional seconds. Naive values
/// are UTC.
pub fn parse_service_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Normalize a service timestamp into `tz`. Unparseable input is kept
/// verbatim so a malformed row never drops out of the list.
pub fn normalize_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Timestamp {
    match parse_service_time(raw) {
        Some(utc) => Timestamp::Local(utc.with_timezone(tz).fixed_offset()),
        None => Timestamp::Unparsed(raw.to_owned()),
    }
}

/// Normalize a service timestamp into the machine's local zone.
pub fn normalize_local(raw: &str) -> Timestamp {
    normalize_in(raw, &Local)
}
