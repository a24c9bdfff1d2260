//! Geographic model and keyword search
//!
//! Provides the shared coordinate type, searchable place candidates and the
//! keyword search backends (Kakao Local, Nominatim).

pub mod kakao;
pub mod nominatim;

use crate::config::Config;
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::future::Future;
use std::sync::Arc;

/// A validated geographic coordinate
///
/// Both components are finite, latitude is within [-90, 90] and longitude
/// within [-180, 180]. Fields are private so a `GeoPoint` cannot be mutated
/// after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = Error;

    fn try_from(raw: RawGeoPoint) -> Result<Self> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Create a coordinate, rejecting non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// A place returned by keyword search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
}

/// Status reported by a keyword search backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchStatus {
    /// Request succeeded with at least one place
    Ok,
    /// Request succeeded but nothing matched
    ZeroResult,
    /// Transport, HTTP or decoding failure
    Error,
}

/// Raw outcome of one keyword search request
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    pub places: Vec<PlaceCandidate>,
}

impl SearchOutcome {
    /// Build an outcome from a list of places, deriving the status
    pub fn from_places(places: Vec<PlaceCandidate>) -> Self {
        let status = if places.is_empty() {
            SearchStatus::ZeroResult
        } else {
            SearchStatus::Ok
        };
        Self { status, places }
    }

    /// A failed request
    pub fn error() -> Self {
        Self {
            status: SearchStatus::Error,
            places: Vec::new(),
        }
    }
}

/// Trait for keyword search backends
///
/// Backends never fail: problems are reported through `SearchStatus::Error`.
pub trait KeywordSearch: Send + Sync {
    /// Search places matching a keyword
    fn keyword_search(&self, keyword: &str) -> impl Future<Output = SearchOutcome> + Send;
}

impl<T: KeywordSearch> KeywordSearch for Arc<T> {
    fn keyword_search(&self, keyword: &str) -> impl Future<Output = SearchOutcome> + Send {
        (**self).keyword_search(keyword)
    }
}

/// Keyword search backend selected by configuration
#[derive(Debug, Clone)]
pub enum Searcher {
    Kakao(kakao::KakaoBackend),
    Nominatim(nominatim::NominatimBackend),
}

impl Searcher {
    /// Backend name as used in configuration
    pub fn name(&self) -> &'static str {
        match self {
            Self::Kakao(_) => "kakao",
            Self::Nominatim(_) => "nominatim",
        }
    }
}

impl KeywordSearch for Searcher {
    async fn keyword_search(&self, keyword: &str) -> SearchOutcome {
        match self {
            Self::Kakao(backend) => backend.keyword_search(keyword).await,
            Self::Nominatim(backend) => backend.keyword_search(keyword).await,
        }
    }
}

/// Get the search backend named in the configuration
pub fn get_searcher(config: &Config) -> Result<Searcher> {
    match config.search.backend.to_lowercase().as_str() {
        "kakao" => Ok(Searcher::Kakao(kakao::KakaoBackend::new(
            &config.api_keys.kakao,
            config.search.size,
        )?)),
        "nominatim" => Ok(Searcher::Nominatim(nominatim::NominatimBackend::new(
            config.search.size,
        )?)),
        other => Err(Error::Config(format!("Unknown search backend: {}", other))),
    }
}

/// Deserialize a float that may be encoded as a JSON number or a string
pub(crate) fn f64_from_number_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid number: {:?}", s))),
    }
}

/// Same as [`f64_from_number_or_string`] for optional fields
pub(crate) fn opt_f64_from_number_or_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "f64_from_number_or_string")] f64);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_valid() {
        let p = GeoPoint::new(33.45, 126.57).unwrap();
        assert_eq!(p.latitude(), 33.45);
        assert_eq!(p.longitude(), 126.57);
    }

    #[test]
    fn test_geo_point_out_of_range() {
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(-90.5, 0.0).is_err());
        assert!(GeoPoint::new(0.0, 180.1).is_err());
        assert!(GeoPoint::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_geo_point_non_finite() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_geo_point_deserialize_validates() {
        let ok: GeoPoint = serde_json::from_str(r#"{"latitude":33.4,"longitude":126.5}"#).unwrap();
        assert_eq!(ok.latitude(), 33.4);

        let bad = serde_json::from_str::<GeoPoint>(r#"{"latitude":120.0,"longitude":126.5}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_search_outcome_status() {
        assert_eq!(SearchOutcome::from_places(Vec::new()).status, SearchStatus::ZeroResult);

        let place = PlaceCandidate {
            name: "Hallasan".to_string(),
            address: "Jeju".to_string(),
            location: GeoPoint::new(33.36, 126.53).unwrap(),
        };
        assert_eq!(SearchOutcome::from_places(vec![place]).status, SearchStatus::Ok);
        assert_eq!(SearchOutcome::error().status, SearchStatus::Error);
    }

    #[test]
    fn test_number_or_string() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(deserialize_with = "f64_from_number_or_string")]
            value: f64,
            #[serde(default, deserialize_with = "opt_f64_from_number_or_string")]
            extra: Option<f64>,
        }

        let a: Row = serde_json::from_str(r#"{"value": 3200}"#).unwrap();
        assert_eq!(a.value, 3200.0);
        assert_eq!(a.extra, None);

        let b: Row = serde_json::from_str(r#"{"value": " 12.5 ", "extra": "7"}"#).unwrap();
        assert_eq!(b.value, 12.5);
        assert_eq!(b.extra, Some(7.0));

        assert!(serde_json::from_str::<Row>(r#"{"value": "abc"}"#).is_err());
    }

    #[test]
    fn test_get_searcher_unknown_backend() {
        let mut config = Config::default();
        config.search.backend = "bing".to_string();
        assert!(get_searcher(&config).is_err());

        config.search.backend = "nominatim".to_string();
        assert_eq!(get_searcher(&config).unwrap().name(), "nominatim");
    }
}
