//! Weather command handlers
//!
//! Print upstream payloads as pretty JSON. Each run is a single fresh fetch,
//! so an upstream failure makes the command exit with an error.

use crate::cli::{load_client, print_json, CoordArgs};
use crate::error::Result;
use clap::Args;
use serde_json::Value;

/// Arguments for commands keyed by geocode
#[derive(Args)]
pub struct GeocodeArgs {
    /// IBGE municipality code, e.g. 3304557
    pub geocode: String,
}

/// Station command arguments
#[derive(Args)]
pub struct StationArgs {
    #[command(flatten)]
    pub coords: CoordArgs,

    /// Resolve the geocode without the live area lookup
    #[arg(long)]
    pub offline: bool,
}

/// Run the current command
pub async fn run_current(args: GeocodeArgs) -> Result<()> {
    let client = load_client(false)?;
    let payload = client.current_weather(&args.geocode).await;
    print_or_exit(payload, &format!("current weather for {}", args.geocode))
}

/// Run the forecast command
pub async fn run_forecast(args: GeocodeArgs) -> Result<()> {
    let client = load_client(false)?;
    let payload = client.forecast(&args.geocode).await;
    print_or_exit(payload, &format!("forecast for {}", args.geocode))
}

/// Run the station command
pub async fn run_station(args: StationArgs) -> Result<()> {
    let client = load_client(args.offline)?;
    let CoordArgs { lat, lon } = args.coords;
    let payload = client.nearest_station(lat, lon).await;
    print_or_exit(payload, &format!("station near ({}, {})", lat, lon))
}

fn print_or_exit(payload: Option<Value>, what: &str) -> Result<()> {
    match payload {
        Some(payload) => print_json(&payload),
        None => {
            eprintln!("Error: No {} available", what);
            std::process::exit(1);
        }
    }
}
