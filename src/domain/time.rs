//! Date and timestamp helpers shared by the trending and price-change rules.
//!
//! Event timestamps arrive from the ingestion pipeline as text. Some rows
//! carry a full RFC 3339 offset, others a naive ISO-8601 string; both are
//! accepted here and normalized to UTC.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d"];

/// Parses an event timestamp into a UTC instant.
///
/// Accepts RFC 3339 strings (`2025-06-01T20:00:00Z`, `...+02:00`) and naive
/// ISO strings, which are taken to already be in UTC. Returns `None` for
/// anything else.
#[must_use]
pub fn parse_utc_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(raw, fmt)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, fmt)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .map(|naive| naive.and_utc())
    })
}

/// Parses a local event timestamp, ignoring any offset it carries.
///
/// Used where the original wall-clock value matters more than the instant,
/// e.g. the "not older than N days" search filter.
#[must_use]
pub fn parse_local_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_local());
    }
    NAIVE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(raw, fmt).ok().or_else(|| {
            NaiveDate::parse_from_str(raw, fmt)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
    })
}

/// Parses a snapshot `fetch_date` (`YYYY-MM-DD`).
#[must_use]
pub fn parse_fetch_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Formats a snapshot date the way it is stored.
#[must_use]
pub fn format_fetch_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns `date - days`, saturating at [`NaiveDate::MIN`].
#[must_use]
pub fn days_before(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}
