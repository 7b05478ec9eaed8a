//! Mapping of raw provider entries into typed holiday records
//!
//! Field access follows two failure rules: a key that is absent yields
//! [`Error::MissingField`] carrying the dotted path, while a key holding a
//! value of the wrong shape (including `null`) yields [`Error::Parse`].

use crate::app::models::{Country, DateDetails, HolidayDate, HolidayRecord};
use crate::{Error, Result};
use serde_json::Value;

/// Walk `path` through nested objects and return the value at its end
pub fn lookup<'a>(entry: &'a Value, path: &[&str]) -> Result<&'a Value> {
    let mut current = entry;

    for (depth, key) in path.iter().enumerate() {
        let object = current.as_object().ok_or_else(|| {
            Error::parse(format!(
                "Expected an object at '{}'",
                dotted(&path[..depth])
            ))
        })?;
        current = object
            .get(*key)
            .ok_or_else(|| Error::missing_field(dotted(&path[..=depth])))?;
    }

    Ok(current)
}

/// Get a required string field
pub fn required_str<'a>(entry: &'a Value, path: &[&str]) -> Result<&'a str> {
    let value = lookup(entry, path)?;
    value.as_str().ok_or_else(|| {
        Error::parse(format!(
            "Expected a string for '{}', found {}",
            dotted(path),
            type_name(value)
        ))
    })
}

/// Get a required integer field
pub fn required_i64(entry: &Value, path: &[&str]) -> Result<i64> {
    let value = lookup(entry, path)?;
    value.as_i64().ok_or_else(|| {
        Error::parse(format!(
            "Expected an integer for '{}', found {}",
            dotted(path),
            type_name(value)
        ))
    })
}

/// Get a required list of strings
pub fn required_str_list(entry: &Value, path: &[&str]) -> Result<Vec<String>> {
    let value = lookup(entry, path)?;
    let items = value.as_array().ok_or_else(|| {
        Error::parse(format!(
            "Expected a list for '{}', found {}",
            dotted(path),
            type_name(value)
        ))
    })?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                Error::parse(format!(
                    "Expected only strings in '{}', found {}",
                    dotted(path),
                    type_name(item)
                ))
            })
        })
        .collect()
}

/// Extract `response.holidays` from a provider response body
pub fn holiday_entries(mut response: Value) -> Result<Vec<Value>> {
    // Both levels are objects once the lookup succeeds
    lookup(&response, &["response", "holidays"])?;

    match response["response"]["holidays"].take() {
        Value::Array(entries) => Ok(entries),
        other => Err(Error::parse(format!(
            "Expected a list for 'response.holidays', found {}",
            type_name(&other)
        ))),
    }
}

/// Whether a raw entry's `country.id` matches a requested code, ignoring case
pub fn is_entry_for_country(entry: &Value, country_code: &str) -> Result<bool> {
    Ok(required_str(entry, &["country", "id"])?.eq_ignore_ascii_case(country_code))
}

/// Build a [`HolidayRecord`] from one raw provider entry
pub fn map_entry(entry: &Value) -> Result<HolidayRecord> {
    let datetime = DateDetails {
        year: to_i32(required_i64(entry, &["date", "datetime", "year"])?, "date.datetime.year")?,
        month: to_u32(required_i64(entry, &["date", "datetime", "month"])?, "date.datetime.month")?,
        day: to_u32(required_i64(entry, &["date", "datetime", "day"])?, "date.datetime.day")?,
    };
    datetime.to_naive_date()?;

    Ok(HolidayRecord {
        name: required_str(entry, &["name"])?.to_string(),
        description: required_str(entry, &["description"])?.to_string(),
        country: Country {
            id: required_str(entry, &["country", "id"])?.to_string(),
            name: required_str(entry, &["country", "name"])?.to_string(),
        },
        date: HolidayDate {
            iso: required_str(entry, &["date", "iso"])?.to_string(),
            datetime,
        },
        categories: required_str_list(entry, &["type"])?,
        primary_category: required_str(entry, &["primary_type"])?.to_string(),
        canonical_url: required_str(entry, &["canonical_url"])?.to_string(),
        url_id: required_str(entry, &["urlid"])?.to_string(),
        locations: required_str(entry, &["locations"])?.to_string(),
        states: required_str(entry, &["states"])?.to_string(),
    })
}

fn to_i32(value: i64, field: &str) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| Error::parse(format!("Value {} out of range for '{}'", value, field)))
}

fn to_u32(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| Error::parse(format!("Value {} out of range for '{}'", value, field)))
}

fn dotted(path: &[&str]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(".")
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
