//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod nearby;
pub mod search;
pub mod serve;
pub mod terrain;

use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, Report};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Hiking map annotations: hazard zones, peaks and nearby tourism spots
#[derive(Parser)]
#[command(name = "trail-lens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Search places by keyword
    Search(search::SearchArgs),

    /// List tourism spots near a location
    Nearby(nearby::NearbyArgs),

    /// Classify hazard areas and peaks into map markers
    Terrain(terrain::TerrainArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Install the log subscriber: `RUST_LOG` or `info`, written to stderr
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Search(args) => search::run(args).await,
        Commands::Nearby(args) => nearby::run(args).await,
        Commands::Terrain(args) => terrain::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Format a report and print it or write it to `output`
pub(crate) fn emit(report: &Report, format: &str, output: Option<&str>) -> Result<()> {
    let formatter = get_formatter(format).ok_or_else(|| {
        let known: Vec<String> = available_formats().into_iter().map(|f| f.name).collect();
        Error::Config(format!("Unknown format: {} (available: {})", format, known.join(", ")))
    })?;
    let rendered = formatter.format(report)?;

    if let Some(path) = output {
        std::fs::write(path, &rendered)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", rendered);
    }
    Ok(())
}
