//! Test utilities and mock provider for service-level tests
//!
//! This module provides a recording [`MockProvider`] and fixtures shaped like
//! real Calendarific responses.

mod holiday_service_tests;

use crate::app::services::provider_client::HolidayProvider;
use crate::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

/// Failure a mock provider returns for a given country/year
#[derive(Debug, Clone)]
pub enum MockFailure {
    Status(u16, &'static str),
    Timeout,
    Transport,
}

/// In-memory provider keyed by lower-case country code and year
#[derive(Debug, Default)]
pub struct MockProvider {
    years: HashMap<(String, i32), Vec<Value>>,
    failures: HashMap<(String, i32), MockFailure>,
    calls: Mutex<Vec<(String, i32)>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `holidays` for `country` in `year`
    pub fn with_year(mut self, country: &str, year: i32, holidays: Vec<Value>) -> Self {
        self.years.insert((country.to_lowercase(), year), holidays);
        self
    }

    /// Fail every request for `country` in `year`
    pub fn with_failure(mut self, country: &str, year: i32, failure: MockFailure) -> Self {
        self.failures.insert((country.to_lowercase(), year), failure);
        self
    }

    /// Calls received so far, in arrival order, with the country as requested
    pub fn calls(&self) -> Vec<(String, i32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, country: &str) -> Vec<i32> {
        self.calls()
            .into_iter()
            .filter(|(c, _)| c.eq_ignore_ascii_case(country))
            .map(|(_, year)| year)
            .collect()
    }
}

impl HolidayProvider for MockProvider {
    async fn fetch_year(
        &self,
        country_code: &str,
        year: i32,
        _month: Option<u32>,
        _day: Option<u32>,
    ) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((country_code.to_string(), year));

        let key = (country_code.to_lowercase(), year);
        if let Some(failure) = self.failures.get(&key) {
            return Err(match failure {
                MockFailure::Status(status, text) => Error::http_status(
                    *status,
                    format!("HTTP error occurred while fetching holidays: {} - {}", status, text),
                ),
                MockFailure::Timeout => {
                    Error::timeout("Request timed out while fetching holidays: deadline elapsed")
                }
                MockFailure::Transport => {
                    Error::transport("Error occurred while fetching holidays: connection refused")
                }
            });
        }

        let holidays = self.years.get(&key).cloned().unwrap_or_default();
        Ok(json!({ "meta": { "code": 200 }, "response": { "holidays": holidays } }))
    }
}

/// A complete raw holiday entry; `iso` may be a date or an instant
pub fn holiday(country_id: &str, name: &str, iso: &str) -> Value {
    let year: i32 = iso[0..4].parse().unwrap();
    let month: u32 = iso[5..7].parse().unwrap();
    let day: u32 = iso[8..10].parse().unwrap();

    json!({
        "name": name,
        "description": format!("{} is observed in {}", name, country_id.to_uppercase()),
        "country": { "id": country_id, "name": country_name(country_id) },
        "date": {
            "iso": iso,
            "datetime": { "year": year, "month": month, "day": day }
        },
        "type": ["National holiday"],
        "primary_type": "National holiday",
        "canonical_url": format!("https://calendarific.com/holiday/{}/{}", country_id, slug(name)),
        "urlid": format!("{}/{}", country_id, slug(name)),
        "locations": "All",
        "states": "All"
    })
}

fn country_name(country_id: &str) -> &'static str {
    match country_id {
        "ua" => "Ukraine",
        "fr" => "France",
        "de" => "Germany",
        _ => "Testland",
    }
}

fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap()
}

pub fn names(entries: &[Value]) -> Vec<&str> {
    entries
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect()
}

pub fn codes(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|c| c.to_string()).collect()
}
