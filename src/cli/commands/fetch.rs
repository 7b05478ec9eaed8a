//! `fetch` command: run one holiday request and report it on stdout

use crate::app::models::{CountryHolidaysRequest, HolidaysByCountry};
use crate::cli::args::{FetchArgs, OutputFormat};
use crate::cli::commands::shared::{build_service, load_configuration, setup_logging};
use anyhow::anyhow;
use colored::*;
use std::path::Path;

pub async fn run_fetch(args: FetchArgs) -> anyhow::Result<()> {
    setup_logging(&args.common);

    let config = load_configuration(&args.common)?;
    let service = build_service(&config)?;

    let request = CountryHolidaysRequest::new(args.countries, args.start, args.end);

    let listing = match service.handle(&request).await {
        Ok(listing) => listing,
        Err(e) => return Err(anyhow!("{} ({})", e.detail(), e.status_code())),
    };

    match args.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&listing.rendered)?);
        }
        OutputFormat::Human => print_summary(&listing.holidays, &listing.saved_to),
    }

    Ok(())
}

fn print_summary(holidays: &HolidaysByCountry, saved_to: &Path) {
    println!("\n{}", "Holiday Summary".bright_green().bold());

    for (country, records) in holidays {
        println!(
            "  {}: {} holidays",
            country.bright_white().bold(),
            records.len().to_string().bright_white().bold()
        );
        for record in records {
            println!(
                "    {:04}-{:02}-{:02}  {}",
                record.date.datetime.year,
                record.date.datetime.month,
                record.date.datetime.day,
                record.name
            );
        }
    }

    println!("  Saved to: {}", saved_to.display().to_string().cyan());
}
