//! Search coordinator
//!
//! Turns free-text input into place candidates. Blank input short-circuits
//! without touching the network, and any non-OK backend status reads as
//! "no results".

use crate::geo::{KeywordSearch, PlaceCandidate, SearchStatus};
use tracing::debug;

/// Runs keyword searches against a backend
#[derive(Debug)]
pub struct SearchCoordinator<S> {
    backend: S,
}

impl<S: KeywordSearch> SearchCoordinator<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// True for empty or whitespace-only input
    pub fn is_blank(keyword: &str) -> bool {
        keyword.trim().is_empty()
    }

    /// Search for candidates matching `keyword`
    ///
    /// The keyword is sent as typed; trimming only decides whether to search.
    pub async fn search(&self, keyword: &str) -> Vec<PlaceCandidate> {
        if Self::is_blank(keyword) {
            return Vec::new();
        }

        let outcome = self.backend.keyword_search(keyword).await;
        match outcome.status {
            SearchStatus::Ok => outcome.places,
            status => {
                debug!("Search {:?} ended with {:?}, clearing results", keyword, status);
                Vec::new()
            }
        }
    }
}
