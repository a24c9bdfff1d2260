//! Terrain command handler
//!
//! Loads both datasets, classifies them and prints the resulting markers.

use crate::config::Config;
use crate::error::Result;
use crate::format::Report;
use crate::render::MapSurface;
use crate::terrain::dataset::{DatasetLoader, DatasetSource};
use crate::terrain::{self, RawHazardRecord, RawPeakRecord};
use clap::Args;
use tracing::warn;

/// Terrain command arguments
#[derive(Args)]
pub struct TerrainArgs {
    /// Hazard area dataset path or URL (overrides config)
    #[arg(long)]
    pub hazards: Option<String>,

    /// Peak dataset path or URL (overrides config)
    #[arg(long)]
    pub peaks: Option<String>,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

/// Run the terrain command
pub async fn run(args: TerrainArgs) -> Result<()> {
    let config = Config::load()?;
    let hazards = DatasetSource::parse(args.hazards.as_deref().unwrap_or(&config.datasets.hazard_areas));
    let peaks = DatasetSource::parse(args.peaks.as_deref().unwrap_or(&config.datasets.peaks));

    let loader = DatasetLoader::new();
    let (areas, summits) = tokio::try_join!(loader.hazard_areas(&hazards), loader.peaks(&peaks))?;

    let surface = MapSurface::new(config.map_center()?, config.map.level);
    let report = annotate(&areas, &summits, surface);
    super::emit(&report, &args.format, args.output.as_deref())
}

/// Render both datasets onto `surface` and report the markers
///
/// Nothing is drawn unless both datasets hold records.
fn annotate(areas: &[RawHazardRecord], peaks: &[RawPeakRecord], mut surface: MapSurface) -> Report {
    let center = surface.view().center;
    if areas.is_empty() || peaks.is_empty() {
        warn!(
            "Skipping terrain rendering: {} hazard areas, {} peaks",
            areas.len(),
            peaks.len()
        );
    } else {
        let classification = terrain::classify(areas, peaks);
        terrain::render(&classification, &mut surface);
    }

    Report::new("Terrain annotations")
        .with_center(center)
        .with_markers(surface.markers())
}
