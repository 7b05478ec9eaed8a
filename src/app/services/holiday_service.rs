//! Request handling: validation, range fetch, per-country assembly, persistence
//!
//! [`HolidayService::handle`] is the single entry point used by both the HTTP
//! API and the `fetch` command. Every failure it returns carries an
//! [`ErrorKind`](crate::ErrorKind) that maps to the externally visible status.

use crate::app::adapters::filesystem::JsonFileStore;
use crate::app::models::{CountryHolidaysRequest, HolidaysByCountry, render_listing};
use crate::app::services::provider_client::HolidayProvider;
use crate::app::services::range_fetcher::RangeFetcher;
use crate::app::services::record_mapping::{is_entry_for_country, map_entry};
use crate::config::Config;
use crate::constants::{EMPTY_RESULT_MESSAGE, MAX_COUNTRY_CODE_LEN};
use crate::{Error, Result};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

/// Outcome of one handled request
#[derive(Debug)]
pub struct HolidayListing {
    /// Typed records per requested country
    pub holidays: HolidaysByCountry,
    /// The JSON body returned to callers, identical to the persisted file
    pub rendered: Value,
    pub saved_to: PathBuf,
}

/// Holiday lookup service, constructed once and shared across requests
pub struct HolidayService<P> {
    fetcher: RangeFetcher<P>,
    store: JsonFileStore,
    date_format: String,
}

impl<P: HolidayProvider> HolidayService<P> {
    pub fn new(
        fetcher: RangeFetcher<P>,
        store: JsonFileStore,
        date_format: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            store,
            date_format: date_format.into(),
        }
    }

    /// Wire a provider into a service using validated configuration
    pub fn from_config(provider: P, config: &Config) -> Self {
        Self::new(
            RangeFetcher::new(provider, config.max_concurrent_countries),
            JsonFileStore::new(config.data_dir.clone()),
            config.date_format.clone(),
        )
    }

    pub fn provider(&self) -> &P {
        self.fetcher.provider()
    }

    /// Fetch, assemble and persist the holidays for one request
    ///
    /// Either the full country-keyed listing is returned, or a single error;
    /// one failing country fails the whole request.
    pub async fn handle(&self, request: &CountryHolidaysRequest) -> Result<HolidayListing> {
        let countries = validate_request(request)?;

        let entries = self
            .fetcher
            .fetch_range(&countries, request.start, request.end)
            .await?;

        if entries.is_empty() {
            warn!("No holidays found for {:?} in the given range", countries);
            return Err(Error::empty_result(EMPTY_RESULT_MESSAGE));
        }

        let holidays = partition_by_country(&countries, &entries)?;

        let rendered = render_listing(&holidays, &self.date_format)?;
        let saved_to = self.store.save(&countries, &rendered).await?;

        info!(
            "Assembled {} holidays across {} countries",
            holidays.values().map(Vec::len).sum::<usize>(),
            holidays.len()
        );
        Ok(HolidayListing {
            holidays,
            rendered,
            saved_to,
        })
    }
}

/// Group raw entries under each requested code by the entry's own country id
///
/// The match is case-insensitive on both sides and the key keeps the caller's
/// casing. Requested countries without a matching entry get an empty list;
/// entries for countries nobody asked for are dropped.
pub fn partition_by_country(
    countries: &[String],
    entries: &[Value],
) -> Result<HolidaysByCountry> {
    let mut holidays = HolidaysByCountry::new();

    for country_code in countries {
        let mut records = Vec::new();

        for entry in entries {
            if is_entry_for_country(entry, country_code)? {
                records.push(map_entry(entry)?);
            }
        }

        holidays.insert(country_code.clone(), records);
    }

    Ok(holidays)
}

/// Check a request and return its country codes with duplicates removed
///
/// Duplicates are detected case-insensitively; the first spelling wins.
pub fn validate_request(request: &CountryHolidaysRequest) -> Result<Vec<String>> {
    if request.countries.is_empty() {
        return Err(Error::invalid_request(
            "countries_list must contain at least one country code",
        ));
    }
    if request.start > request.end {
        return Err(Error::invalid_request(format!(
            "start_time {} is after end_time {}",
            request.start, request.end
        )));
    }

    let mut countries: Vec<String> = Vec::with_capacity(request.countries.len());
    for code in &request.countries {
        if !is_valid_country_code(code) {
            return Err(Error::invalid_request(format!(
                "Invalid country code '{}': expected 1-{} letters, digits or '-'",
                code, MAX_COUNTRY_CODE_LEN
            )));
        }
        if !countries.iter().any(|seen| seen.eq_ignore_ascii_case(code)) {
            countries.push(code.clone());
        }
    }

    Ok(countries)
}

fn is_valid_country_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_COUNTRY_CODE_LEN
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
