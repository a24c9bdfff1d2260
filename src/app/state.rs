//! Application state owned by the controller

use crate::app::deps::{ChangeSet, Slot};
use crate::geo::PlaceCandidate;
use crate::render::AnnotationRenderer;
use crate::selection::SelectedLocation;
use crate::terrain::{RawHazardRecord, RawPeakRecord};
use crate::tourism::TourismSpot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every slot the controller tracks
pub struct AppState {
    pub keyword: String,
    pub candidates: Vec<PlaceCandidate>,
    pub selected: Option<SelectedLocation>,
    pub hazards: Option<Vec<RawHazardRecord>>,
    pub peaks: Option<Vec<RawPeakRecord>>,
    pub surface: Option<Box<dyn AnnotationRenderer>>,
    pub spots: Vec<TourismSpot>,
    revisions: BTreeMap<Slot, u64>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            keyword: String::new(),
            candidates: Vec::new(),
            selected: None,
            hazards: None,
            peaks: None,
            surface: None,
            spots: Vec::new(),
            revisions: BTreeMap::new(),
        }
    }

    /// Record that `slot` was written
    pub fn touch(&mut self, slot: Slot, changes: &mut ChangeSet) {
        *self.revisions.entry(slot).or_insert(0) += 1;
        changes.mark(slot);
    }

    /// Number of writes to `slot` so far
    pub fn revision(&self, slot: Slot) -> u64 {
        self.revisions.get(&slot).copied().unwrap_or(0)
    }

    /// Both datasets hold records and a surface exists
    pub fn terrain_ready(&self) -> bool {
        let has_records = |len: Option<usize>| len.is_some_and(|n| n > 0);
        self.surface.is_some()
            && has_records(self.hazards.as_ref().map(Vec::len))
            && has_records(self.peaks.as_ref().map(Vec::len))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// A tourism spot with its display distance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotView {
    #[serde(flatten)]
    pub spot: TourismSpot,
    pub distance: String,
}

impl From<&TourismSpot> for SpotView {
    fn from(spot: &TourismSpot) -> Self {
        Self {
            spot: spot.clone(),
            distance: spot.distance_display(),
        }
    }
}

/// Request counters kept by the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub search_requests: u64,
    pub nearby_requests: u64,
    pub terrain_renders: u64,
}

/// Read-only copy of the state, safe to hand across tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub keyword: String,
    pub candidates: Vec<PlaceCandidate>,
    pub selected: Option<SelectedLocation>,
    pub spots: Vec<SpotView>,
    pub hazard_records: Option<usize>,
    pub peak_records: Option<usize>,
    pub map_ready: bool,
    pub counters: Counters,
    pub revisions: BTreeMap<Slot, u64>,
    pub taken_at: DateTime<Utc>,
}

impl AppState {
    pub fn snapshot(&self, counters: Counters) -> Snapshot {
        Snapshot {
            keyword: self.keyword.clone(),
            candidates: self.candidates.clone(),
            selected: self.selected,
            spots: self.spots.iter().map(SpotView::from).collect(),
            hazard_records: self.hazards.as_ref().map(Vec::len),
            peak_records: self.peaks.as_ref().map(Vec::len),
            map_ready: self.surface.is_some(),
            counters,
            revisions: self.revisions.clone(),
            taken_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::render::MapSurface;

    fn peak() -> RawPeakRecord {
        RawPeakRecord {
            lat: 33.5,
            lot: 126.6,
            name: "Peak1".to_string(),
        }
    }

    fn area() -> RawHazardRecord {
        RawHazardRecord {
            lat: 33.4,
            lot: 126.5,
            name: "Ridge".to_string(),
            type_code: "DANGER".to_string(),
        }
    }

    #[test]
    fn test_touch_bumps_revision() {
        let mut state = AppState::new();
        let mut changes = ChangeSet::new();

        assert_eq!(state.revision(Slot::Candidates), 0);
        state.touch(Slot::Candidates, &mut changes);
        state.touch(Slot::Candidates, &mut changes);

        assert_eq!(state.revision(Slot::Candidates), 2);
        assert!(changes.contains(Slot::Candidates));
    }

    #[test]
    fn test_terrain_ready_requires_all_inputs() {
        let mut state = AppState::new();
        assert!(!state.terrain_ready());

        state.hazards = Some(vec![area()]);
        state.peaks = Some(vec![peak()]);
        assert!(!state.terrain_ready());

        state.surface = Some(Box::new(MapSurface::new(GeoPoint::new(33.45, 126.57).unwrap(), 4)));
        assert!(state.terrain_ready());

        state.peaks = Some(Vec::new());
        assert!(!state.terrain_ready());
    }

    #[test]
    fn test_snapshot_spot_distance() {
        let mut state = AppState::new();
        state.spots = vec![TourismSpot {
            title: "Beach".to_string(),
            address: "Jeju".to_string(),
            distance_meters: 3200.0,
            location: None,
            content_id: None,
        }];

        let snapshot = state.snapshot(Counters::default());
        assert_eq!(snapshot.spots[0].distance, "3.2km");
        assert_eq!(snapshot.spots[0].spot.distance_meters, 3200.0);
        assert!(!snapshot.map_ready);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["spots"][0]["distance"], "3.2km");
        assert_eq!(json["spots"][0]["title"], "Beach");
    }
}
