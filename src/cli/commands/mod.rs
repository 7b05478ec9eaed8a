//! Command implementations for the holiday fetcher CLI
//!
//! Each command lives in its own module:
//! - `serve`: run the HTTP service
//! - `fetch`: run a single request from the command line

pub mod fetch;
pub mod serve;
pub mod shared;

use crate::cli::args::{Args, Commands};

/// Main command runner, dispatching on the parsed subcommand
pub async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Some(Commands::Serve(serve_args)) => serve::run_serve(serve_args).await,
        Some(Commands::Fetch(fetch_args)) => fetch::run_fetch(fetch_args).await,
        None => Ok(()),
    }
}
