//! Nearby tourism spots
//!
//! Given the selected location, asks the tourism service for spots within a
//! fixed radius. Failures are contained here: the previous spot list stays
//! in place and the error is only logged.

pub mod korservice;

use crate::constants::nearby;
use crate::error::Result;
use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// A point of interest near the selected location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourismSpot {
    pub title: String,
    pub address: String,
    /// Distance from the query point, in meters as reported by the service
    pub distance_meters: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
}

impl TourismSpot {
    /// Distance formatted for display, e.g. "3.2km"
    pub fn distance_display(&self) -> String {
        format_distance_km(self.distance_meters)
    }
}

/// Format meters as kilometers with one decimal place
pub fn format_distance_km(meters: f64) -> String {
    format!("{:.1}km", meters / 1000.0)
}

/// Parameters of one nearby request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyQuery {
    /// Longitude
    pub map_x: f64,
    /// Latitude
    pub map_y: f64,
    pub radius: u32,
    pub num_of_rows: u32,
    pub page_no: u32,
    pub arrange: &'static str,
}

impl NearbyQuery {
    /// Query centered on a location with the fixed paging and radius
    pub fn around(location: GeoPoint) -> Self {
        Self {
            map_x: location.longitude(),
            map_y: location.latitude(),
            radius: nearby::RADIUS_METERS,
            num_of_rows: nearby::NUM_OF_ROWS,
            page_no: nearby::PAGE_NO,
            arrange: nearby::ARRANGE,
        }
    }
}

/// Trait for tourism data services
pub trait TourismSource: Send + Sync {
    /// Fetch spots for a query
    fn nearby(&self, query: &NearbyQuery) -> impl Future<Output = Result<Vec<TourismSpot>>> + Send;
}

impl<T: TourismSource> TourismSource for Arc<T> {
    fn nearby(&self, query: &NearbyQuery) -> impl Future<Output = Result<Vec<TourismSpot>>> + Send {
        (**self).nearby(query)
    }
}

/// Requests nearby spots for a selected location
#[derive(Debug)]
pub struct ProximityFetcher<T> {
    source: T,
}

impl<T: TourismSource> ProximityFetcher<T> {
    pub fn new(source: T) -> Self {
        Self { source }
    }

    /// Fetch spots around `location`, propagating failures
    pub async fn fetch_nearby(&self, location: GeoPoint) -> Result<Vec<TourismSpot>> {
        let query = NearbyQuery::around(location);
        debug!(
            "Fetching tourism spots around mapX={} mapY={} radius={}",
            query.map_x, query.map_y, query.radius
        );
        self.source.nearby(&query).await
    }

    /// Refresh `spots` for the current selection
    ///
    /// No selection means no request. A failed fetch leaves `spots` untouched.
    pub async fn refresh(&self, selection: Option<GeoPoint>, spots: &mut Vec<TourismSpot>) {
        let Some(location) = selection else {
            return;
        };
        apply_nearby(spots, self.fetch_nearby(location).await);
    }
}

/// Replace `spots` with a successful result, or log and keep them
///
/// Returns true when the list was replaced.
pub fn apply_nearby(spots: &mut Vec<TourismSpot>, result: Result<Vec<TourismSpot>>) -> bool {
    match result {
        Ok(fetched) => {
            debug!("Received {} tourism spots", fetched.len());
            *spots = fetched;
            true
        }
        Err(e) => {
            warn!("Error fetching nearby tourism spots: {}", e);
            false
        }
    }
}
