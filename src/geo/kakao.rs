//! Kakao Local keyword search backend
//!
//! Requires a REST API key sent as `Authorization: KakaoAK <key>`.

use crate::constants::api::KAKAO_KEYWORD_URL;
use crate::error::{Error, Result};
use crate::geo::{GeoPoint, KeywordSearch, PlaceCandidate, SearchOutcome};
use serde::Deserialize;
use tracing::{debug, warn};

/// Kakao Local search backend
#[derive(Debug, Clone)]
pub struct KakaoBackend {
    client: reqwest::Client,
    api_key: String,
    size: usize,
    base_url: String,
}

/// Keyword search response
#[derive(Debug, Deserialize)]
struct KakaoResponse {
    #[serde(default)]
    documents: Vec<KakaoDocument>,
}

/// One search hit; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct KakaoDocument {
    place_name: String,
    #[serde(default)]
    address_name: String,
    x: String,
    y: String,
}

impl KakaoBackend {
    /// Create a Kakao backend with the given REST API key
    ///
    /// Kakao caps `size` at 15 results per page.
    pub fn new(api_key: &str, size: usize) -> Result<Self> {
        Self::with_base_url(api_key, size, KAKAO_KEYWORD_URL)
    }

    /// Create a backend pointing at a different endpoint
    pub fn with_base_url(api_key: &str, size: usize, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Search(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            size: size.clamp(1, 15),
            base_url: base_url.to_string(),
        })
    }

    async fn fetch(&self, keyword: &str) -> Result<Vec<PlaceCandidate>> {
        let url = format!(
            "{}?query={}&size={}",
            self.base_url,
            urlencoding::encode(keyword),
            self.size
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .send()
            .await
            .map_err(|e| Error::Search(format!("Kakao request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Search(format!(
                "Kakao returned status: {}",
                response.status()
            )));
        }

        let body: KakaoResponse = response
            .json()
            .await
            .map_err(|e| Error::Search(format!("Failed to parse Kakao response: {}", e)))?;

        Ok(Self::into_candidates(body.documents))
    }

    /// Convert documents, dropping any with unusable coordinates
    fn into_candidates(documents: Vec<KakaoDocument>) -> Vec<PlaceCandidate> {
        documents
            .into_iter()
            .filter_map(|doc| match Self::parse_point(&doc.x, &doc.y) {
                Ok(location) => Some(PlaceCandidate {
                    name: doc.place_name,
                    address: doc.address_name,
                    location,
                }),
                Err(e) => {
                    warn!("Skipping search result {:?}: {}", doc.place_name, e);
                    None
                }
            })
            .collect()
    }

    /// Parse Kakao's `x` (longitude) and `y` (latitude) strings
    fn parse_point(x: &str, y: &str) -> Result<GeoPoint> {
        let lng: f64 = x
            .parse()
            .map_err(|_| Error::InvalidCoordinates(format!("Invalid longitude: {}", x)))?;
        let lat: f64 = y
            .parse()
            .map_err(|_| Error::InvalidCoordinates(format!("Invalid latitude: {}", y)))?;
        GeoPoint::new(lat, lng)
    }
}

impl KeywordSearch for KakaoBackend {
    async fn keyword_search(&self, keyword: &str) -> SearchOutcome {
        match self.fetch(keyword).await {
            Ok(places) => {
                debug!("Kakao search {:?} returned {} places", keyword, places.len());
                SearchOutcome::from_places(places)
            }
            Err(e) => {
                warn!("Kakao search {:?} failed: {}", keyword, e);
                SearchOutcome::error()
            }
        }
    }
}
