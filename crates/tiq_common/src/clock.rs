//! Temporal helpers for the loosely formatted feed timestamps.
//!
//! The feed emits `YYYY-MM-DD HH:MM:SS` or ISO `YYYY-MM-DDTHH:MM:SS`;
//! naive timestamps are taken as UTC. Wall clock is always injected by the
//! caller so every computation here stays deterministic.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Parse a feed timestamp, accepting a space or a literal `T` separator.
///
/// Never panics; anything unparsable yields `None`, not a default instant.
pub fn parse_created(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let iso = trimmed.replacen(' ', "T", 1);
    if let Ok(dt) = DateTime::parse_from_rfc3339(&iso) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&iso, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(&iso, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Seconds elapsed between a ticket's creation and `now`.
///
/// `None` for empty or unparsable input. May be negative when the
/// timestamp lies in the future; no clamping.
pub fn seconds_since(created: &str, now: DateTime<Utc>) -> Option<f64> {
    let then = parse_created(created)?;
    Some((now - then).num_milliseconds() as f64 / 1000.0)
}

/// Render a second count as whole hours, e.g. `"26h"`.
///
/// Zero, NaN and other non-finite inputs all render as `"0h"`.
pub fn format_hours(seconds: f64) -> String {
    if !seconds.is_finite() || seconds == 0.0 {
        return "0h".to_string();
    }
    format!("{}h", (seconds / 3600.0).round() as i64)
}
