//! Data models for holiday listings
//!
//! This module contains the typed holiday record produced from provider data,
//! the inbound request, and the rendering used for both HTTP responses and
//! persisted files.

use crate::app::services::date_filter::parse_offset_instant;
use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Holidays keyed by the country code exactly as the caller submitted it
pub type HolidaysByCountry = BTreeMap<String, Vec<HolidayRecord>>;

/// Country where a holiday is observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Lower-case country code, e.g. `ua`
    pub id: String,
    pub name: String,
}

/// Calendar components of a holiday date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDetails {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateDetails {
    /// Convert to a calendar date, rejecting impossible combinations
    pub fn to_naive_date(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            Error::parse(format!(
                "Invalid calendar date {:04}-{:02}-{:02}",
                self.year, self.month, self.day
            ))
        })
    }

    /// Render as midnight UTC using a strftime format
    pub fn format(&self, date_format: &str) -> Result<String> {
        let midnight = self
            .to_naive_date()?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| Error::parse("Invalid midnight time"))?
            .and_utc();
        Ok(midnight.format(date_format).to_string())
    }
}

/// Date of a holiday as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayDate {
    /// ISO-8601 date or instant, e.g. `2024-08-24` or `2024-03-31T03:00:00+03:00`
    pub iso: String,
    pub datetime: DateDetails,
}

/// A single holiday, immutable once built from provider data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub name: String,
    pub description: String,
    pub country: Country,
    pub date: HolidayDate,
    #[serde(rename = "type")]
    pub categories: Vec<String>,
    #[serde(rename = "primary_type")]
    pub primary_category: String,
    pub canonical_url: String,
    #[serde(rename = "urlid")]
    pub url_id: String,
    pub locations: String,
    pub states: String,
}

/// Request for holidays of several countries within a time window
///
/// Instants keep the offset they were submitted with: the calendar years to
/// query are taken in that offset, while range comparisons happen in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryHolidaysRequest {
    /// Country codes, matched case-insensitively, e.g. `["UA", "FR"]`
    #[serde(rename = "countries_list")]
    pub countries: Vec<String>,

    /// Window start, e.g. `2024-05-24T10:16:48.147Z`
    #[serde(rename = "start_time", deserialize_with = "deserialize_instant")]
    pub start: DateTime<FixedOffset>,

    /// Window end, e.g. `2024-08-24T10:16:48.147Z`
    #[serde(rename = "end_time", deserialize_with = "deserialize_instant")]
    pub end: DateTime<FixedOffset>,
}

impl CountryHolidaysRequest {
    pub fn new(
        countries: Vec<String>,
        start: impl Into<DateTime<FixedOffset>>,
        end: impl Into<DateTime<FixedOffset>>,
    ) -> Self {
        Self {
            countries,
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Accepts offset, `Z`-suffixed and naive instants; naive ones are taken as UTC
fn deserialize_instant<'de, D>(
    deserializer: D,
) -> std::result::Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_offset_instant(&raw).map_err(serde::de::Error::custom)
}

/// Render a listing to JSON, formatting every `date.datetime` with `date_format`
///
/// HTTP responses and persisted files both go through this function, so a
/// record always serializes identically in the two places.
pub fn render_listing(
    holidays: &HolidaysByCountry,
    date_format: &str,
) -> Result<serde_json::Value> {
    let mut rendered = serde_json::Map::with_capacity(holidays.len());

    for (country_code, records) in holidays {
        let mut rendered_records = Vec::with_capacity(records.len());
        for record in records {
            let mut value = serde_json::to_value(record)?;
            value["date"]["datetime"] =
                serde_json::Value::String(record.date.datetime.format(date_format)?);
            rendered_records.push(value);
        }
        rendered.insert(country_code.clone(), serde_json::Value::Array(rendered_records));
    }

    Ok(serde_json::Value::Object(rendered))
}
