//! Output formatters
//!
//! Renders a [`Report`] (markers placed on a surface and/or nearby tourism
//! spots) for the CLI.

pub mod gpx;
pub mod json;
pub mod text;

use crate::error::Result;
use crate::geo::GeoPoint;
use crate::render::Marker;
use crate::tourism::TourismSpot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Everything a CLI command wants to print
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<GeoPoint>,
    pub markers: Vec<Marker>,
    pub spots: Vec<TourismSpot>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            center: None,
            markers: Vec::new(),
            spots: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    pub fn with_center(mut self, center: GeoPoint) -> Self {
        self.center = Some(center);
        self
    }

    pub fn with_markers(mut self, markers: Vec<Marker>) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_spots(mut self, spots: Vec<TourismSpot>) -> Self {
        self.spots = spots;
        self
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a report
    fn format(&self, report: &Report) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "json".to_string(),
            description: "Full JSON report".to_string(),
        },
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable text".to_string(),
        },
        FormatInfo {
            name: "gpx".to_string(),
            description: "GPX waypoint file".to_string(),
        },
    ]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::render::{AnnotationRenderer, IconKind, MapSurface};

    /// A report with one peak, one danger area and one spot
    pub(crate) fn sample_report() -> Report {
        let center = GeoPoint::new(33.45, 126.57).unwrap();
        let mut surface = MapSurface::new(center, 4);
        surface.place_marker(GeoPoint::new(33.5, 126.6).unwrap(), "Peak1", IconKind::Peak);
        surface.place_marker(GeoPoint::new(33.4, 126.5).unwrap(), "Ridge & Gully", IconKind::Danger);

        Report::new("Trailhead")
            .with_center(center)
            .with_markers(surface.markers())
            .with_spots(vec![TourismSpot {
                title: "Seongsan".to_string(),
                address: "Jeju".to_string(),
                distance_meters: 3200.0,
                location: Some(GeoPoint::new(33.46, 126.94).unwrap()),
                content_id: Some("126441".to_string()),
            }])
    }

    #[test]
    fn test_get_formatter() {
        assert!(get_formatter("json").is_some());
        assert!(get_formatter("text").is_some());
        assert!(get_formatter("gpx").is_some());
        assert!(get_formatter("url").is_none());
        assert!(get_formatter("unknown").is_none());
    }

    #[test]
    fn test_get_formatter_case_insensitive() {
        assert!(get_formatter("JSON").is_some());
        assert!(get_formatter("Text").is_some());
        assert!(get_formatter("GPX").is_some());
    }

    #[test]
    fn test_available_formats() {
        let formats = available_formats();
        assert_eq!(formats.len(), 3);
        for name in ["json", "text", "gpx"] {
            assert!(formats.iter().any(|f| f.name == name));
            assert_eq!(get_formatter(name).unwrap().name(), name);
        }
    }
}
