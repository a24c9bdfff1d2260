//! Selection resolver
//!
//! Turns a chosen candidate into the single live selected location, pans
//! the map to it and drops a "selected place" marker.

use crate::geo::{GeoPoint, PlaceCandidate};
use crate::render::{AnnotationRenderer, IconKind, MarkerHandle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedLocation {
    pub location: GeoPoint,
}

/// Applies candidate selections
pub struct SelectionResolver;

impl SelectionResolver {
    /// Select `candidate`
    ///
    /// Replaces `current`, then pans and places a marker when a surface is
    /// available. Selecting the same candidate again repeats every effect.
    pub fn select(
        current: &mut Option<SelectedLocation>,
        candidate: &PlaceCandidate,
        surface: Option<&mut dyn AnnotationRenderer>,
    ) -> (SelectedLocation, Option<MarkerHandle>) {
        info!("Selected place: {}", candidate.name);
        info!("Address: {}", candidate.address);
        info!(
            "Coordinates: Latitude {}, Longitude {}",
            candidate.location.latitude(),
            candidate.location.longitude()
        );

        let selected = SelectedLocation {
            location: candidate.location,
        };
        *current = Some(selected);

        let marker = match surface {
            Some(surface) => {
                surface.center(candidate.location);
                Some(surface.place_marker(candidate.location, &candidate.name, IconKind::SelectedPlace))
            }
            None => {
                debug!("No map surface yet; selection recorded without marker");
                None
            }
        };

        (selected, marker)
    }
}
