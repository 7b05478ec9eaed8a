//! Client for the Calendarific holiday API
//!
//! The provider is year-granular: one request returns every holiday of one
//! country for one calendar year, optionally narrowed to a month and day.
//! [`HolidayProvider`] is the seam the range fetcher depends on; the
//! production implementation is [`CalendarificClient`].

use crate::config::Config;
use crate::constants::{MAX_UPSTREAM_ERROR_BODY, query_params};
use crate::{Error, Result};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Source of raw holiday data, queried per country per calendar year
pub trait HolidayProvider: Send + Sync {
    /// Fetch the raw provider response for one country and year
    ///
    /// `month` and `day` narrow the query when given. Failures are returned
    /// immediately as [`Error::HttpStatus`], [`Error::Timeout`] or
    /// [`Error::Transport`]; nothing is retried.
    fn fetch_year(
        &self,
        country_code: &str,
        year: i32,
        month: Option<u32>,
        day: Option<u32>,
    ) -> impl Future<Output = Result<Value>> + Send;
}

/// HTTP client for the Calendarific API
///
/// Built once at startup from [`Config`] and shared by every request.
#[derive(Debug, Clone)]
pub struct CalendarificClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CalendarificClient {
    /// Create a client with a per-request deadline
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Create a client from validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.request_timeout,
        )
    }

    /// Query parameters for one request; `month` and `day` are omitted entirely when absent
    pub(crate) fn query(
        &self,
        country_code: &str,
        year: i32,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            (query_params::API_KEY, self.api_key.clone()),
            (query_params::COUNTRY, country_code.to_string()),
            (query_params::YEAR, year.to_string()),
        ];
        if let Some(month) = month {
            params.push((query_params::MONTH, month.to_string()));
        }
        if let Some(day) = day {
            params.push((query_params::DAY, day.to_string()));
        }
        params
    }
}

impl HolidayProvider for CalendarificClient {
    async fn fetch_year(
        &self,
        country_code: &str,
        year: i32,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Result<Value> {
        debug!(
            "Requesting holidays for {} in {} (month: {:?}, day: {:?})",
            country_code, year, month, day
        );

        let response = self
            .http
            .get(&self.base_url)
            .query(&self.query(country_code, year, month, day))
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("Could not read error body from provider: {}", e.without_url());
                    String::new()
                }
            };
            warn!(
                "Provider returned {} for {} in {}",
                status, country_code, year
            );
            return Err(Error::http_status(
                status.as_u16(),
                format!(
                    "HTTP error occurred while fetching holidays: {}{}",
                    status,
                    body_excerpt(&body)
                ),
            ));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                Error::parse(format!(
                    "Provider returned a body that is not valid JSON: {}",
                    e.without_url()
                ))
            } else {
                classify_request_error(e)
            }
        })
    }
}

/// Classify a reqwest failure, dropping the URL since it carries the API key
fn classify_request_error(error: reqwest::Error) -> Error {
    let error = error.without_url();

    if error.is_timeout() {
        Error::timeout(format!(
            "Request timed out while fetching holidays: {}",
            error
        ))
    } else if let Some(status) = error.status() {
        Error::http_status(
            status.as_u16(),
            format!("HTTP error occurred while fetching holidays: {}", error),
        )
    } else {
        Error::transport(format!(
            "Error occurred while fetching holidays: {}",
            error
        ))
    }
}

fn body_excerpt(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }

    let excerpt: String = body.chars().take(MAX_UPSTREAM_ERROR_BODY).collect();
    format!(" - {}", excerpt)
}
