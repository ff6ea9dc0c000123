//! Territory command handler

use crate::boundary::{self, CheckMethod};
use crate::cli::{print_json, CoordArgs};
use crate::error::Result;
use clap::Args;

/// Territory command arguments
#[derive(Args)]
pub struct TerritoryArgs {
    #[command(flatten)]
    pub coords: CoordArgs,

    /// Print the check as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the territory command
pub fn run(args: TerritoryArgs) -> Result<()> {
    let CoordArgs { lat, lon } = args.coords;
    let check = boundary::check_territory(lat, lon);

    if args.json {
        print_json(&check)?;
    } else {
        let method = match check.method {
            CheckMethod::Polygon => "polygon",
            CheckMethod::BoundingBox => "bounding box",
        };
        let verdict = if check.inside { "inside" } else { "outside" };
        println!("({}, {}) is {} Brazil [{}]", lat, lon, verdict, method);
    }

    Ok(())
}
