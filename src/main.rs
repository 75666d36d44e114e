//! IP list sync CLI entrypoint.
//!
//! This is the main entrypoint for the iplist-sync command-line tool.

use std::process::ExitCode;

use iplist_sync::cli::{Cli, OutputFormat, OutputFormatter};
use iplist_sync::config::{load_dotenv, PceSettings, SettingsValidator};
use iplist_sync::error::Result;
use iplist_sync::feed::ZscalerFeed;
use iplist_sync::pce::PceClient;
use iplist_sync::sync::Synchronizer;

use clap::Parser;
use tracing::{debug, info, Level};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    // Must run before parsing so `.env` values feed the `env` fallbacks.
    let dotenv = load_dotenv(".");

    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.output);

    match dotenv {
        Ok(Some(path)) => debug!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => tracing::warn!("Ignoring .env file: {e}"),
    }

    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Run async runtime
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&cli, &settings)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// Warnings and errors go to stderr, everything else to stdout. JSON output
/// keeps stdout for the report unless verbose logging was asked for.
fn init_logging(verbose: bool, output: OutputFormat) {
    let filter = if verbose {
        EnvFilter::new("iplist_sync=debug,info")
    } else if output == OutputFormat::Json {
        EnvFilter::new("warn")
    } else {
        EnvFilter::new("info")
    };

    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .init();
}

/// Resolves and validates PCE settings.
fn resolve_settings(cli: &Cli) -> Result<PceSettings> {
    let settings = PceSettings::from_cli(cli)?;
    SettingsValidator::new().validate(&settings)?;

    if settings.org_id_defaulted {
        info!("Using default organization ID: {}", settings.org_id);
        info!("  (set --org-id or ILLUMIO_ORG_ID to use a different organization)");
    } else {
        info!("Using organization ID: {}", settings.org_id);
    }
    debug!("PCE settings: {settings:?}");

    Ok(settings)
}

/// Main async entry point.
async fn run(cli: &Cli, settings: &PceSettings) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    let feed = ZscalerFeed::new()?;

    info!(
        "Connecting to Illumio PCE at {}:{}...",
        settings.host, settings.port
    );
    let client = PceClient::new(settings)?;
    info!(
        "Successfully connected to Illumio PCE (Org ID: {})",
        client.org_id()
    );

    let report = Synchronizer::new(&feed, &client)
        .run(&cli.iplist_name)
        .await?;

    println!("{}", formatter.format_report(&report));

    Ok(())
}
