//! Multi-year, multi-country range fetching over a year-granular provider
//!
//! For each country the requested window `[start, end]` is split by the
//! calendar years of `start` and `end` in the offset they were submitted with;
//! entries are compared against the bounds in UTC:
//! - a window inside one year is fetched once and filtered to `[start, end]`
//! - otherwise the first year is filtered to `[start, Dec 31 23:59:59]`, the
//!   last year to `[Jan 1 00:00:00, end]`, and every year in between is taken
//!   whole without a date check
//!
//! Taking intermediate years whole relies on the provider never returning
//! entries outside the year that was queried.
//!
//! Countries are fetched concurrently up to a configured limit; years within a
//! country are fetched in ascending order. Any failure for a country discards
//! that country's partial results and fails the whole range with
//! [`Error::CountryFetch`].

use crate::app::services::date_filter::filter_by_date_range;
use crate::app::services::provider_client::HolidayProvider;
use crate::app::services::record_mapping::holiday_entries;
use crate::{Error, Result};
use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Utc};
use futures::{StreamExt, TryStreamExt, stream};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Fetches and date-filters holidays for arbitrary windows
pub struct RangeFetcher<P> {
    provider: P,
    max_concurrent_countries: usize,
}

impl<P: HolidayProvider> RangeFetcher<P> {
    pub fn new(provider: P, max_concurrent_countries: usize) -> Self {
        Self {
            provider,
            max_concurrent_countries: max_concurrent_countries.max(1),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch raw entries for all `countries` within `[start, end]`
    ///
    /// Entries come back flat, countries in the order supplied, years
    /// ascending within a country, and the provider's order within a year.
    pub async fn fetch_range(
        &self,
        countries: &[String],
        start: impl Into<DateTime<FixedOffset>>,
        end: impl Into<DateTime<FixedOffset>>,
    ) -> Result<Vec<Value>> {
        let start: DateTime<FixedOffset> = start.into();
        let end: DateTime<FixedOffset> = end.into();
        info!(
            "Fetching holidays for {} countries from {} to {}",
            countries.len(),
            start,
            end
        );

        let per_country: Vec<Vec<Value>> = stream::iter(countries.iter().cloned())
            .map(|country| self.fetch_country(country, start, end))
            .buffered(self.max_concurrent_countries)
            .try_collect()
            .await?;

        let entries: Vec<Value> = per_country.into_iter().flatten().collect();
        info!("Fetched {} holidays in range", entries.len());
        Ok(entries)
    }

    async fn fetch_country(
        &self,
        country: String,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Vec<Value>> {
        let (start_year, end_year) = (start.year(), end.year());

        match self.fetch_country_years(&country, start, end).await {
            Ok(entries) => {
                debug!(
                    "Collected {} holidays for {} over {}-{}",
                    entries.len(),
                    country,
                    start_year,
                    end_year
                );
                Ok(entries)
            }
            Err(e) => {
                warn!("Fetching holidays for {} failed: {}", country, e);
                Err(Error::country_fetch(country, start_year, end_year, e))
            }
        }
    }

    async fn fetch_country_years(
        &self,
        country: &str,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Vec<Value>> {
        let (start_year, end_year) = (start.year(), end.year());
        let (start, end) = (start.with_timezone(&Utc), end.with_timezone(&Utc));

        if start_year == end_year {
            let entries = self.fetch_entries(country, start_year).await?;
            return filter_by_date_range(entries, start, end);
        }

        let first = self.fetch_entries(country, start_year).await?;
        let mut collected = filter_by_date_range(first, start, end_of_year(start_year)?)?;

        for year in (start_year + 1)..end_year {
            collected.extend(self.fetch_entries(country, year).await?);
        }

        let last = self.fetch_entries(country, end_year).await?;
        collected.extend(filter_by_date_range(last, start_of_year(end_year)?, end)?);

        Ok(collected)
    }

    async fn fetch_entries(&self, country: &str, year: i32) -> Result<Vec<Value>> {
        let response = self.provider.fetch_year(country, year, None, None).await?;
        let entries = holiday_entries(response)?;
        debug!(
            "Provider returned {} holidays for {} in {}",
            entries.len(),
            country,
            year
        );
        Ok(entries)
    }
}

/// `Jan 1 00:00:00 UTC` of `year`
pub fn start_of_year(year: i32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| Error::unexpected(format!("Year {} is out of range", year)))
}

/// `Dec 31 23:59:59 UTC` of `year`
pub fn end_of_year(year: i32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 12, 31, 23, 59, 59)
        .single()
        .ok_or_else(|| Error::unexpected(format!("Year {} is out of range", year)))
}
