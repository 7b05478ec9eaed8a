//! Inclusive, UTC-normalized date range filtering of raw provider entries

use crate::app::services::record_mapping::required_str;
use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::debug;

/// Parse an ISO-8601 date or instant and normalize it to UTC
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    parse_offset_instant(value).map(|dt| dt.with_timezone(&Utc))
}

/// Parse an ISO-8601 date or instant, keeping the offset it was written with
///
/// Naive date-times and bare dates are interpreted as UTC (a bare date means
/// midnight).
pub fn parse_offset_instant(value: &str) -> Result<DateTime<FixedOffset>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive_dt.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().fixed_offset());
        }
    }

    Err(Error::parse(format!(
        "Error parsing holiday date: '{}' is not an ISO-8601 date or instant",
        value
    )))
}

/// Keep the entries whose `date.iso` lies within `[start, end]`, both ends inclusive
///
/// Relative order is preserved. An entry without `date.iso` fails with
/// [`Error::MissingField`]; an unparsable one with [`Error::Parse`]. Neither is
/// skipped.
pub fn filter_by_date_range(
    entries: Vec<Value>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Value>> {
    let total = entries.len();
    let mut kept = Vec::with_capacity(total);

    for entry in entries {
        let instant = parse_instant(required_str(&entry, &["date", "iso"])?)?;
        if start <= instant && instant <= end {
            kept.push(entry);
        }
    }

    debug!(
        "Date filter kept {} of {} entries in [{}, {}]",
        kept.len(),
        total,
        start,
        end
    );
    Ok(kept)
}
