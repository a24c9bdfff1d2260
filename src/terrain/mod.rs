//! Hazard and peak annotations
//!
//! Turns the raw hazard-area and peak datasets into styled annotations and
//! emits one marker per annotation.

pub mod dataset;

use crate::geo::{f64_from_number_or_string, GeoPoint};
use crate::render::{AnnotationRenderer, IconKind, MarkerHandle};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Hazard area record as published in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHazardRecord {
    #[serde(deserialize_with = "f64_from_number_or_string")]
    pub lat: f64,
    #[serde(deserialize_with = "f64_from_number_or_string")]
    pub lot: f64,
    #[serde(rename = "plcNm", default)]
    pub name: String,
    #[serde(rename = "plcTypeCd", default)]
    pub type_code: String,
}

/// Peak record as published in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPeakRecord {
    #[serde(deserialize_with = "f64_from_number_or_string")]
    pub lat: f64,
    #[serde(deserialize_with = "f64_from_number_or_string")]
    pub lot: f64,
    #[serde(rename = "placeNm", default)]
    pub name: String,
}

/// Hazard classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HazardCategory {
    Danger,
    Shelter,
    /// Any type code we do not recognize
    Unknown,
}

impl HazardCategory {
    /// Classify a raw type code
    pub fn from_code(code: &str) -> Self {
        match code {
            "DANGER" => Self::Danger,
            "SHELTER" => Self::Shelter,
            _ => Self::Unknown,
        }
    }

    /// Unknown hazards are drawn like dangerous ones so they stay visible
    pub fn icon(&self) -> IconKind {
        match self {
            Self::Danger | Self::Unknown => IconKind::Danger,
            Self::Shelter => IconKind::Shelter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardAnnotation {
    pub name: String,
    pub location: GeoPoint,
    pub category: HazardCategory,
}

impl HazardAnnotation {
    pub fn icon(&self) -> IconKind {
        self.category.icon()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakAnnotation {
    pub name: String,
    pub location: GeoPoint,
}

impl PeakAnnotation {
    pub fn icon(&self) -> IconKind {
        IconKind::Peak
    }
}

/// Result of classifying both datasets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classification {
    pub hazards: Vec<HazardAnnotation>,
    pub peaks: Vec<PeakAnnotation>,
}

impl Classification {
    pub fn len(&self) -> usize {
        self.hazards.len() + self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify raw hazard and peak records
///
/// Records whose coordinates are not valid are skipped with a warning;
/// everything else maps 1:1.
pub fn classify(areas: &[RawHazardRecord], peaks: &[RawPeakRecord]) -> Classification {
    let hazards = areas
        .iter()
        .filter_map(|area| match GeoPoint::new(area.lat, area.lot) {
            Ok(location) => Some(HazardAnnotation {
                name: area.name.clone(),
                location,
                category: HazardCategory::from_code(&area.type_code),
            }),
            Err(e) => {
                warn!("Skipping hazard area {:?}: {}", area.name, e);
                None
            }
        })
        .collect();

    let peaks = peaks
        .iter()
        .filter_map(|peak| match GeoPoint::new(peak.lat, peak.lot) {
            Ok(location) => Some(PeakAnnotation {
                name: peak.name.clone(),
                location,
            }),
            Err(e) => {
                warn!("Skipping peak {:?}: {}", peak.name, e);
                None
            }
        })
        .collect();

    Classification { hazards, peaks }
}

/// Place one marker per annotation, peaks first
///
/// Nothing previously placed is removed, so calling this twice on the same
/// surface doubles the markers.
pub fn render(classification: &Classification, renderer: &mut dyn AnnotationRenderer) -> Vec<MarkerHandle> {
    let mut handles = Vec::with_capacity(classification.len());

    for peak in &classification.peaks {
        handles.push(renderer.place_marker(peak.location, &peak.name, peak.icon()));
    }
    for hazard in &classification.hazards {
        handles.push(renderer.place_marker(hazard.location, &hazard.name, hazard.icon()));
    }

    debug!(
        "Rendered {} peak and {} hazard markers",
        classification.peaks.len(),
        classification.hazards.len()
    );
    handles
}
