//! Command-line argument definitions for the holiday fetcher
//!
//! This module defines the CLI interface using the clap derive API. Provider
//! credentials come from the environment; flags here only override settings.

use crate::app::services::date_filter::parse_offset_instant;
use chrono::{DateTime, FixedOffset};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// CLI arguments for the holiday fetcher
///
/// Collects public holidays for a set of countries within a date range from
/// the Calendarific API, either as an HTTP service or as a one-off fetch.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "holiday-fetcher",
    version,
    about = "Fetch public holidays for countries and a date range from Calendarific",
    long_about = "Queries the Calendarific API per country and calendar year, keeps the holidays \
                  that fall inside the requested window, and returns them grouped by country. \
                  Every result is also saved as a JSON file in the data directory. \
                  BASE_URL and CALENDARIFIC_API_KEY must be set in the environment."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the HTTP service (POST /holidays/)
    Serve(ServeArgs),
    /// Fetch holidays once and print a summary
    Fetch(FetchArgs),
}

/// Settings shared by every command
#[derive(Debug, Clone, ClapArgs)]
pub struct CommonArgs {
    /// Directory receiving persisted holiday listings
    #[arg(
        short = 'd',
        long = "data-dir",
        value_name = "PATH",
        help = "Directory for persisted holiday files"
    )]
    pub data_dir: Option<PathBuf>,

    /// Deadline for each provider request
    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        help = "Provider request timeout in seconds"
    )]
    pub timeout_secs: Option<u64>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Get the log level string for tracing configuration
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Arguments for the serve command
#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    /// Socket address to listen on
    #[arg(
        short = 'b',
        long = "bind",
        value_name = "ADDR",
        help = "Address to listen on, e.g. 0.0.0.0:8000"
    )]
    pub bind_addr: Option<SocketAddr>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the fetch command
#[derive(Debug, Clone, Parser)]
pub struct FetchArgs {
    /// Country codes, comma separated
    #[arg(
        short = 'c',
        long = "countries",
        value_name = "CODES",
        value_delimiter = ',',
        required = true,
        help = "Country codes, e.g. UA,FR"
    )]
    pub countries: Vec<String>,

    /// Window start (ISO-8601)
    #[arg(
        short = 's',
        long = "start",
        value_name = "INSTANT",
        value_parser = parse_instant_arg,
        help = "Start of the window, e.g. 2024-06-24T11:26:23Z"
    )]
    pub start: DateTime<FixedOffset>,

    /// Window end (ISO-8601)
    #[arg(
        short = 'e',
        long = "end",
        value_name = "INSTANT",
        value_parser = parse_instant_arg,
        help = "End of the window, e.g. 2024-09-24T11:26:23Z"
    )]
    pub end: DateTime<FixedOffset>,

    /// Output format for the result
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output formats for the fetch command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Per-country summary
    Human,
    /// The rendered listing, as returned by the HTTP API
    Json,
}

fn parse_instant_arg(value: &str) -> Result<DateTime<FixedOffset>, String> {
    parse_offset_instant(value).map_err(|e| e.to_string())
}
