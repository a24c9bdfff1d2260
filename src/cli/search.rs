//! Search command handler
//!
//! Runs one keyword search and lists the candidates.

use crate::config::Config;
use crate::error::Result;
use crate::geo::{get_searcher, PlaceCandidate};
use crate::search::SearchCoordinator;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Keyword to search for
    pub keyword: String,

    /// Search backend (overrides config)
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Print candidates as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(backend) = args.backend {
        config.search.backend = backend;
    }

    let searcher = get_searcher(&config)?;
    eprintln!("Searching {:?} with {}", args.keyword, searcher.name());

    let candidates = SearchCoordinator::new(searcher).search(&args.keyword).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    } else {
        print!("{}", list_candidates(&candidates));
    }
    Ok(())
}

fn list_candidates(candidates: &[PlaceCandidate]) -> String {
    if candidates.is_empty() {
        return "No places found.\n".to_string();
    }

    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "{:>2}. {} - {} ({:.6}, {:.6})\n",
                i,
                c.name,
                c.address,
                c.location.latitude(),
                c.location.longitude()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::tests::candidate;

    #[test]
    fn test_list_candidates() {
        let listing = list_candidates(&[candidate("Trailhead", 33.45, 126.57)]);
        assert_eq!(listing, " 0. Trailhead - Trailhead address (33.450000, 126.570000)\n");
    }

    #[test]
    fn test_list_candidates_empty() {
        assert_eq!(list_candidates(&[]), "No places found.\n");
    }
}
