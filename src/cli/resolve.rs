//! Resolve command handler
//!
//! Resolves coordinates to a geocode and reports which tier answered.

use crate::cli::{load_client, print_json, CoordArgs};
use crate::error::Result;
use clap::Args;

/// Resolve command arguments
#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub coords: CoordArgs,

    /// Skip the live area lookup and use cache or known capitals only
    #[arg(long)]
    pub offline: bool,

    /// Print the full resolution as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the resolve command
pub async fn run(args: ResolveArgs) -> Result<()> {
    let client = load_client(args.offline)?;
    let CoordArgs { lat, lon } = args.coords;

    let Some(resolution) = client.resolve_detailed(lat, lon).await else {
        eprintln!("Error: Could not resolve a geocode for ({}, {})", lat, lon);
        std::process::exit(1);
    };

    if args.json {
        print_json(&resolution)?;
    } else {
        println!("{}", resolution.geocode);
    }

    Ok(())
}
