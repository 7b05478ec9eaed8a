//! Configuration management and validation.
//!
//! Settings are resolved in layers: built-in defaults, then environment
//! variables, then CLI overrides, and finally [`Config::validate`] rejects
//! anything the service cannot start with.

use crate::constants::{
    DEFAULT_BIND_ADDR, DEFAULT_DATA_DIR, DEFAULT_DATE_FORMAT, DEFAULT_MAX_CONCURRENT_COUNTRIES,
    DEFAULT_REQUEST_TIMEOUT, ENV_API_KEY, ENV_BASE_URL, ENV_BIND_ADDR, ENV_DATA_DIR,
    ENV_DATE_FORMAT, ENV_MAX_CONCURRENT_COUNTRIES, ENV_TIMEOUT_SECS,
};
use crate::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Runtime configuration for the holiday fetcher
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider endpoint, e.g. `https://calendarific.com/api/v2/holidays`
    pub base_url: String,

    /// Provider API key, sent as the `api_key` query parameter
    pub api_key: String,

    /// Directory receiving persisted listings
    pub data_dir: PathBuf,

    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,

    /// strftime format for `date.datetime` in rendered output
    pub date_format: String,

    /// Deadline for a single provider request
    pub request_timeout: Duration,

    /// Countries fetched concurrently per request
    pub max_concurrent_countries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8000))),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_concurrent_countries: DEFAULT_MAX_CONCURRENT_COUNTRIES,
        }
    }
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Unset variables keep their defaults. Values that are present but
    /// unparsable are reported rather than silently replaced.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(api_key) = lookup(ENV_API_KEY) {
            config.api_key = api_key.trim().to_string();
        }
        if let Some(data_dir) = lookup(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(bind_addr) = lookup(ENV_BIND_ADDR) {
            config.bind_addr = bind_addr.trim().parse().map_err(|e| {
                Error::configuration(format!("Invalid {}: '{}' ({})", ENV_BIND_ADDR, bind_addr, e))
            })?;
        }
        if let Some(date_format) = lookup(ENV_DATE_FORMAT) {
            config.date_format = date_format;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = timeout.trim().parse().map_err(|e| {
                Error::configuration(format!("Invalid {}: '{}' ({})", ENV_TIMEOUT_SECS, timeout, e))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = lookup(ENV_MAX_CONCURRENT_COUNTRIES) {
            config.max_concurrent_countries = limit.trim().parse().map_err(|e| {
                Error::configuration(format!(
                    "Invalid {}: '{}' ({})",
                    ENV_MAX_CONCURRENT_COUNTRIES, limit, e
                ))
            })?;
        }

        debug!(
            "Configuration loaded from environment (data_dir: {}, bind_addr: {})",
            config.data_dir.display(),
            config.bind_addr
        );
        Ok(config)
    }

    /// Override the persistence directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Override the server bind address
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Override the provider request deadline
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Override the output date format
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::configuration(format!(
                "{} must be set to the provider base URL",
                ENV_BASE_URL
            )));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::configuration(format!(
                "{} must be an http(s) URL, got '{}'",
                ENV_BASE_URL, self.base_url
            )));
        }
        if self.api_key.is_empty() {
            return Err(Error::configuration(format!(
                "{} must be set to the provider API key",
                ENV_API_KEY
            )));
        }
        if self.date_format.is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(Error::configuration(format!(
                "Invalid date format: '{}'",
                self.date_format
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::configuration("Request timeout must be greater than zero"));
        }
        if self.max_concurrent_countries == 0 {
            return Err(Error::configuration(
                "Concurrent country limit must be at least 1",
            ));
        }
        Ok(())
    }
}
