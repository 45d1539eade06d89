//! Timestamp parsing for stored documents
//!
//! Documents carry dates as strings written by several clients over time.
//! RFC 3339 is the norm; older records use a naive `YYYY-MM-DDTHH:MM[:SS]`
//! form which is read as UTC, or a bare `YYYY-MM-DD` read as UTC midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse a stored timestamp, `None` when no known format matches.
#[must_use]
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .map(|day| day.and_time(NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc())
}

/// Combine form inputs (`YYYY-MM-DD`, `HH:MM`) into a UTC instant.
#[must_use]
pub fn combine_date_time(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M:%S"))
        .ok()?;
    Some(day.and_time(time).and_utc())
}

/// Format an instant the way the web client stores it (`...T14:00:00.000Z`).
#[must_use]
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
