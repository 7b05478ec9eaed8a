//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading, and service construction
//! used by every command.

use crate::Result;
use crate::app::services::holiday_service::HolidayService;
use crate::app::services::provider_client::CalendarificClient;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use std::time::Duration;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags when set.
pub fn setup_logging(args: &CommonArgs) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("holiday_fetcher={}", log_level)));

    let subscriber = tracing_subscriber::registry().with(filter);
    let initialized = if args.quiet {
        subscriber
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if initialized.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Load configuration using layered approach (defaults -> env -> args)
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    let mut config = Config::from_env()?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    info!(
        "Configuration loaded (provider: {}, data dir: {})",
        config.base_url,
        config.data_dir.display()
    );
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &CommonArgs) {
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.request_timeout = Duration::from_secs(timeout_secs);
    }
}

/// Build the provider client once and wire it into the service
pub fn build_service(config: &Config) -> Result<HolidayService<CalendarificClient>> {
    let client = CalendarificClient::from_config(config)?;
    Ok(HolidayService::from_config(client, config))
}
