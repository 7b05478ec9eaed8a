//! Holiday Fetcher Library
//!
//! A Rust service that collects public holidays for a list of countries over an
//! arbitrary date range from the Calendarific API.
//!
//! This library provides tools for:
//! - Fetching one country's holidays for one calendar year from the provider
//! - Spanning multi-year ranges with boundary-year date filtering
//! - Mapping raw provider entries into a typed, country-keyed holiday listing
//! - Persisting each listing as a pretty-printed JSON file
//! - Serving the whole pipeline over HTTP (`POST /holidays/`)

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod date_filter;
        pub mod holiday_service;
        pub mod provider_client;
        pub mod range_fetcher;
        pub mod record_mapping;

        #[cfg(test)]
        mod tests;
    }
    pub mod adapters {
        pub mod filesystem;
    }
}

// HTTP surface
pub mod api;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CountryHolidaysRequest, HolidayRecord, HolidaysByCountry};
pub use app::services::holiday_service::HolidayService;
pub use app::services::provider_client::{CalendarificClient, HolidayProvider};
pub use config::Config;

/// Result type alias for the holiday fetcher
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for holiday fetching operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("{message}")]
    Configuration { message: String },

    /// Inbound request failed validation
    #[error("{message}")]
    InvalidRequest { message: String },

    /// Provider answered with a non-2xx status
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    /// Provider did not answer within the configured deadline
    #[error("{message}")]
    Timeout { message: String },

    /// Any other network-level failure talking to the provider
    #[error("{message}")]
    Transport { message: String },

    /// An expected field is absent from provider data
    #[error("Missing expected field '{field}'")]
    MissingField { field: String },

    /// A provider value does not have the expected shape or format
    #[error("{message}")]
    Parse { message: String },

    /// Aggregate failure of one country's multi-year fetch sequence
    #[error(
        "Error fetching holidays for {country} in {}: {source}",
        year_span(.start_year, .end_year)
    )]
    CountryFetch {
        country: String,
        start_year: i32,
        end_year: i32,
        #[source]
        source: Box<Error>,
    },

    /// No holiday matched the requested window in any country
    #[error("{message}")]
    EmptyResult { message: String },

    /// Writing the listing to disk failed
    #[error("{message}: {source}")]
    Persistence {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Anything not covered by the other kinds
    #[error("{message}")]
    Unexpected { message: String },
}

/// Classification of an [`Error`], used to pick the externally visible status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InvalidRequest,
    HttpStatus,
    Timeout,
    Transport,
    MissingField,
    Parse,
    EmptyResult,
    Persistence,
    Unexpected,
}

impl ErrorKind {
    /// HTTP status code reported to callers for this kind
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::HttpStatus => 500,
            ErrorKind::Timeout => 504,
            ErrorKind::Transport => 500,
            ErrorKind::MissingField => 500,
            ErrorKind::Parse => 400,
            ErrorKind::EmptyResult => 404,
            ErrorKind::Persistence => 500,
            ErrorKind::InvalidRequest => 422,
            ErrorKind::Configuration => 500,
            ErrorKind::Unexpected => 500,
        }
    }

    /// Prefix placed in front of the error message in the `detail` body
    pub fn detail_prefix(self) -> Option<&'static str> {
        match self {
            ErrorKind::HttpStatus => Some("HTTP error occurred"),
            ErrorKind::Timeout => Some("Request timed out"),
            ErrorKind::Transport => Some("Request error occurred"),
            ErrorKind::MissingField => Some("Missing expected data in response"),
            ErrorKind::Parse => Some("Invalid data format"),
            ErrorKind::EmptyResult => None,
            ErrorKind::Persistence => Some("Error writing to file"),
            ErrorKind::InvalidRequest => Some("Invalid request"),
            ErrorKind::Configuration => Some("Configuration error"),
            ErrorKind::Unexpected => Some("An unexpected error occurred"),
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a request validation error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an upstream HTTP status error
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// Create an upstream timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create an upstream transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a data format error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Wrap a failure from one country's fetch sequence
    pub fn country_fetch(
        country: impl Into<String>,
        start_year: i32,
        end_year: i32,
        source: Error,
    ) -> Self {
        Self::CountryFetch {
            country: country.into(),
            start_year,
            end_year,
            source: Box::new(source),
        }
    }

    /// Create an empty result error
    pub fn empty_result(message: impl Into<String>) -> Self {
        Self::EmptyResult {
            message: message.into(),
        }
    }

    /// Create a persistence error with context
    pub fn persistence(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Persistence {
            message: message.into(),
            source,
        }
    }

    /// Create an unclassified error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Classify this error; aggregate failures report the kind they wrap
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            Error::HttpStatus { .. } => ErrorKind::HttpStatus,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::MissingField { .. } => ErrorKind::MissingField,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::CountryFetch { source, .. } => source.kind(),
            Error::EmptyResult { .. } => ErrorKind::EmptyResult,
            Error::Persistence { .. } => ErrorKind::Persistence,
            Error::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    /// HTTP status code reported to callers
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Human-readable detail string for the error response body
    pub fn detail(&self) -> String {
        match self.kind().detail_prefix() {
            Some(prefix) => format!("{}: {}", prefix, self),
            None => self.to_string(),
        }
    }
}

fn year_span(start_year: &i32, end_year: &i32) -> String {
    if start_year == end_year {
        format!("year {}", start_year)
    } else {
        format!("range {}-{}", start_year, end_year)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Unexpected {
            message: format!("JSON serialization failed: {}", error),
        }
    }
}
