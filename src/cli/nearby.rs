//! Nearby command handler

use crate::config::Config;
use crate::error::Result;
use crate::format::Report;
use crate::geo::GeoPoint;
use crate::tourism::korservice::KorServiceClient;
use crate::tourism::ProximityFetcher;
use clap::Args;

/// Nearby command arguments
#[derive(Args)]
pub struct NearbyArgs {
    /// Latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the nearby command
pub async fn run(args: NearbyArgs) -> Result<()> {
    let config = Config::load()?;
    let location = GeoPoint::new(args.lat, args.lng)?;

    let fetcher = ProximityFetcher::new(KorServiceClient::from_config(&config));
    let spots = fetcher.fetch_nearby(location).await?;

    let report = Report::new(format!("Tourism spots near {}", location))
        .with_center(location)
        .with_spots(spots);
    super::emit(&report, &args.format, args.output.as_deref())
}
