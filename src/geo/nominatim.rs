//! Nominatim keyword search backend (OpenStreetMap)
//!
//! Uses the free Nominatim API; no key needed.
//! Rate limit: 1 request per second (enforced by User-Agent requirement)

use crate::constants::api::NOMINATIM_URL;
use crate::error::{Error, Result};
use crate::geo::{GeoPoint, KeywordSearch, PlaceCandidate, SearchOutcome};
use serde::Deserialize;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("trail-lens/", env!("CARGO_PKG_VERSION"));

/// Nominatim search backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    limit: usize,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    name: Option<String>,
    display_name: String,
}

impl NominatimBackend {
    /// Create a new Nominatim backend returning at most `limit` places
    pub fn new(limit: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Search(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            limit: limit.clamp(1, 50),
        })
    }

    /// Parse lat/lng strings into a point
    fn parse_coords(lat: &str, lng: &str) -> Result<GeoPoint> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::InvalidCoordinates(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::InvalidCoordinates(format!("Invalid longitude: {}", lng)))?;
        GeoPoint::new(lat, lng)
    }

    fn into_candidate(result: NominatimResult) -> Result<PlaceCandidate> {
        let location = Self::parse_coords(&result.lat, &result.lon)?;
        let name = match result.name.filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => result
                .display_name
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string(),
        };
        Ok(PlaceCandidate {
            name,
            address: result.display_name,
            location,
        })
    }

    async fn fetch(&self, keyword: &str) -> Result<Vec<PlaceCandidate>> {
        let url = format!(
            "{}/search?q={}&format=jsonv2&limit={}",
            NOMINATIM_URL,
            urlencoding::encode(keyword),
            self.limit
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Search(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Search(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| Error::Search(format!("Failed to parse Nominatim response: {}", e)))?;

        Ok(results
            .into_iter()
            .filter_map(|r| {
                Self::into_candidate(r)
                    .map_err(|e| warn!("Skipping Nominatim result: {}", e))
                    .ok()
            })
            .collect())
    }
}

impl KeywordSearch for NominatimBackend {
    async fn keyword_search(&self, keyword: &str) -> SearchOutcome {
        match self.fetch(keyword).await {
            Ok(places) => {
                debug!("Nominatim search {:?} returned {} places", keyword, places.len());
                SearchOutcome::from_places(places)
            }
            Err(e) => {
                warn!("Nominatim search {:?} failed: {}", keyword, e);
                SearchOutcome::error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coords() {
        let p = NominatimBackend::parse_coords("40.7128", "-74.0060").unwrap();
        assert!((p.latitude() - 40.7128).abs() < 0.0001);
        assert!((p.longitude() - (-74.0060)).abs() < 0.0001);
    }

    #[test]
    fn test_parse_coords_invalid() {
        assert!(NominatimBackend::parse_coords("invalid", "0").is_err());
        assert!(NominatimBackend::parse_coords("0", "invalid").is_err());
    }

    #[test]
    fn test_name_falls_back_to_display_name() {
        let result = NominatimResult {
            lat: "33.36".to_string(),
            lon: "126.53".to_string(),
            name: None,
            display_name: "Hallasan, Jeju, South Korea".to_string(),
        };
        let candidate = NominatimBackend::into_candidate(result).unwrap();
        assert_eq!(candidate.name, "Hallasan");
        assert_eq!(candidate.address, "Hallasan, Jeju, South Korea");
    }

    #[test]
    fn test_backend_creation() {
        let backend = NominatimBackend::new(10).unwrap();
        assert!(format!("{:?}", backend).contains("NominatimBackend"));
    }
}
