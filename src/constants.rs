//! Application constants for the holiday fetcher
//!
//! This module contains environment variable names, default values,
//! and wire-level names used throughout the application.

use std::time::Duration;

// =============================================================================
// Environment Variables
// =============================================================================

/// Provider base URL (required)
pub const ENV_BASE_URL: &str = "BASE_URL";

/// Provider API key (required)
pub const ENV_API_KEY: &str = "CALENDARIFIC_API_KEY";

/// Directory that receives persisted holiday listings
pub const ENV_DATA_DIR: &str = "HOLIDAY_FETCHER_DATA_DIR";

/// Socket address the HTTP server binds to
pub const ENV_BIND_ADDR: &str = "HOLIDAY_FETCHER_BIND_ADDR";

/// strftime format used for `date.datetime` in output
pub const ENV_DATE_FORMAT: &str = "HOLIDAY_FETCHER_DATE_FORMAT";

/// Provider request deadline in seconds
pub const ENV_TIMEOUT_SECS: &str = "HOLIDAY_FETCHER_TIMEOUT_SECS";

/// Upper bound on countries fetched at the same time
pub const ENV_MAX_CONCURRENT_COUNTRIES: &str = "HOLIDAY_FETCHER_MAX_CONCURRENT_COUNTRIES";

// =============================================================================
// Defaults
// =============================================================================

pub const DEFAULT_DATA_DIR: &str = "data";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Default output format for `date.datetime`
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_MAX_CONCURRENT_COUNTRIES: usize = 4;

// =============================================================================
// Request Validation
// =============================================================================

/// Longest accepted country code (ISO 3166-2 subdivisions included)
pub const MAX_COUNTRY_CODE_LEN: usize = 10;

// =============================================================================
// Provider Wire Format
// =============================================================================

/// Query parameter names sent to the provider
pub mod query_params {
    pub const API_KEY: &str = "api_key";
    pub const COUNTRY: &str = "country";
    pub const YEAR: &str = "year";
    pub const MONTH: &str = "month";
    pub const DAY: &str = "day";
}

/// Longest slice of an upstream error body carried into error messages
pub const MAX_UPSTREAM_ERROR_BODY: usize = 512;

// =============================================================================
// Persistence
// =============================================================================

/// Suffix of every persisted listing file name
pub const HOLIDAYS_FILE_SUFFIX: &str = "_holidays.json";

/// Indentation used when pretty-printing persisted listings
pub const JSON_INDENT: &[u8] = b"    ";

/// Detail returned when no holiday matched the requested window
pub const EMPTY_RESULT_MESSAGE: &str = "No holidays found in the given date range.";
