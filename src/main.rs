use clap::Parser;
use holiday_fetcher::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Holiday Fetcher - public holidays by country and date range");
    println!("============================================================");
    println!();
    println!("USAGE:");
    println!("    holiday-fetcher <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    serve       Run the HTTP service (POST /holidays/)");
    println!("    fetch       Fetch holidays once and print a summary");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("ENVIRONMENT:");
    println!("    BASE_URL                  Calendarific endpoint (required)");
    println!("    CALENDARIFIC_API_KEY      Calendarific API key (required)");
    println!();
    println!("EXAMPLES:");
    println!("    holiday-fetcher serve --bind 0.0.0.0:8000");
    println!(
        "    holiday-fetcher fetch --countries UA,FR --start 2024-06-24T11:26:23Z --end 2024-09-24T11:26:23Z"
    );
    println!();
    println!("For detailed help on any command, use:");
    println!("    holiday-fetcher <COMMAND> --help");
}
