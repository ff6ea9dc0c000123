//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod resolve;
pub mod serve;
pub mod territory;
pub mod weather;

use crate::client::InmetClient;
use crate::config::Config;
use crate::error::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// INMET geocode resolver and weather lookup
#[derive(Parser)]
#[command(name = "inmet-geocode")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve coordinates to an INMET geocode
    Resolve(resolve::ResolveArgs),

    /// Show current conditions for a geocode
    Current(weather::GeocodeArgs),

    /// Show the forecast for a geocode
    Forecast(weather::GeocodeArgs),

    /// Show the nearest station for coordinates
    Station(weather::StationArgs),

    /// Check whether coordinates lie within Brazil
    Territory(territory::TerritoryArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),
}

/// A latitude/longitude pair on the command line
#[derive(Args, Debug, Clone, Copy)]
pub struct CoordArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    init_logging(default_filter);

    match cli.command {
        Commands::Resolve(args) => resolve::run(args).await,
        Commands::Current(args) => weather::run_current(args).await,
        Commands::Forecast(args) => weather::run_forecast(args).await,
        Commands::Station(args) => weather::run_station(args).await,
        Commands::Territory(args) => territory::run(args),
        Commands::Config(args) => config::run(args),
        Commands::Serve(args) => serve::run(args).await,
    }
}

/// Initialize logging to stderr; `RUST_LOG` overrides the default filter
fn init_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Build a client from the user configuration
fn load_client(offline: bool) -> Result<InmetClient> {
    let mut config = Config::load()?;
    if offline {
        config.resolver.live_lookup = false;
    }
    InmetClient::from_config(&config)
}

/// Print a JSON value to stdout
fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
