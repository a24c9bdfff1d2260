//! Annotation renderer interface
//!
//! The core only ever adds markers and pans the view. It never removes or
//! reads markers back; `MapSurface` records what it was told so the HTTP
//! layer and tests can inspect it.

use crate::constants::marker;
use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Marker categories with their own imagery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    /// Place chosen from search results (blue)
    SelectedPlace,
    /// Mountain summit (black)
    Peak,
    /// Dangerous zone, also used for unclassified hazards (red)
    Danger,
    /// Emergency shelter (orange)
    Shelter,
}

impl IconKind {
    /// Image path served to the map front end
    pub fn image(&self) -> &'static str {
        match self {
            Self::SelectedPlace => marker::SELECTED_IMAGE,
            Self::Peak => marker::PEAK_IMAGE,
            Self::Danger => marker::DANGER_IMAGE,
            Self::Shelter => marker::SHELTER_IMAGE,
        }
    }

    /// Short legend text
    pub fn description(&self) -> &'static str {
        match self {
            Self::SelectedPlace => "Selected place",
            Self::Peak => "Mountain peak",
            Self::Danger => "Hiking hazard zone",
            Self::Shelter => "Emergency shelter",
        }
    }
}

impl std::fmt::Display for IconKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelectedPlace => write!(f, "selected_place"),
            Self::Peak => write!(f, "peak"),
            Self::Danger => write!(f, "danger"),
            Self::Shelter => write!(f, "shelter"),
        }
    }
}

/// Legend entry for one icon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendEntry {
    pub icon: IconKind,
    pub image: String,
    pub description: String,
}

/// List every icon in display order
pub fn legend() -> Vec<LegendEntry> {
    [
        IconKind::SelectedPlace,
        IconKind::Danger,
        IconKind::Shelter,
        IconKind::Peak,
    ]
    .into_iter()
    .map(|icon| LegendEntry {
        icon,
        image: icon.image().to_string(),
        description: icon.description().to_string(),
    })
    .collect()
}

/// Opaque handle to a placed marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerHandle(pub Uuid);

/// A marker as placed on a surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub handle: MarkerHandle,
    pub location: GeoPoint,
    pub label: String,
    pub icon: IconKind,
    pub image: String,
    pub width: u32,
    pub height: u32,
}

/// Contract used by selection and terrain rendering to draw on the map
pub trait AnnotationRenderer: Send {
    /// Place a labeled marker with the given icon
    fn place_marker(&mut self, location: GeoPoint, label: &str, icon: IconKind) -> MarkerHandle;

    /// Pan the view to a location
    fn center(&mut self, location: GeoPoint);
}

/// Everything a surface has been told so far
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceView {
    pub id: Uuid,
    pub center: GeoPoint,
    pub level: u8,
    pub markers: Vec<Marker>,
    /// Every pan instruction in order
    pub pans: Vec<GeoPoint>,
}

/// In-process map surface
///
/// Clones share the same markers, so one clone can be handed to the
/// controller while another is read by the server.
#[derive(Debug, Clone)]
pub struct MapSurface {
    inner: Arc<Mutex<SurfaceView>>,
}

impl MapSurface {
    /// Create a surface centered on `center` at zoom `level`
    pub fn new(center: GeoPoint, level: u8) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SurfaceView {
                id: Uuid::new_v4(),
                center,
                level,
                markers: Vec::new(),
                pans: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceView> {
        // Every write is a single push, so a poisoned view is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Surface identity
    pub fn id(&self) -> Uuid {
        self.lock().id
    }

    /// Copy of the current surface contents
    pub fn view(&self) -> SurfaceView {
        self.lock().clone()
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.lock().markers.clone()
    }

    pub fn pans(&self) -> Vec<GeoPoint> {
        self.lock().pans.clone()
    }

    /// Count markers with the given icon
    pub fn count(&self, icon: IconKind) -> usize {
        self.lock().markers.iter().filter(|m| m.icon == icon).count()
    }
}

impl AnnotationRenderer for MapSurface {
    fn place_marker(&mut self, location: GeoPoint, label: &str, icon: IconKind) -> MarkerHandle {
        let handle = MarkerHandle(Uuid::new_v4());
        self.lock().markers.push(Marker {
            handle,
            location,
            label: label.to_string(),
            icon,
            image: icon.image().to_string(),
            width: marker::WIDTH,
            height: marker::HEIGHT,
        });
        handle
    }

    fn center(&mut self, location: GeoPoint) {
        let mut view = self.lock();
        view.center = location;
        view.pans.push(location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn test_icon_images() {
        assert_eq!(IconKind::Danger.image(), "/Image/MarkerRed.png");
        assert_eq!(IconKind::Shelter.image(), "/Image/MarkerOrange.png");
        assert_eq!(IconKind::Peak.image(), "/Image/MarkerBlack.png");
        assert_eq!(IconKind::SelectedPlace.image(), "/Image/MarkerBlue.png");
    }

    #[test]
    fn test_place_marker_records_style() {
        let mut surface = MapSurface::new(point(33.45, 126.57), 4);
        let handle = surface.place_marker(point(33.4, 126.5), "Ridge", IconKind::Danger);

        let markers = surface.markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].handle, handle);
        assert_eq!(markers[0].label, "Ridge");
        assert_eq!(markers[0].image, "/Image/MarkerRed.png");
        assert_eq!((markers[0].width, markers[0].height), (24, 35));
    }

    #[test]
    fn test_clones_share_markers() {
        let surface = MapSurface::new(point(33.45, 126.57), 4);
        let mut writer = surface.clone();
        writer.place_marker(point(33.5, 126.6), "Peak1", IconKind::Peak);
        writer.center(point(33.5, 126.6));

        assert_eq!(surface.count(IconKind::Peak), 1);
        assert_eq!(surface.pans(), vec![point(33.5, 126.6)]);
        assert_eq!(surface.view().center, point(33.5, 126.6));
        assert_eq!(surface.id(), writer.id());
    }

    #[test]
    fn test_new_surface_has_new_identity() {
        let a = MapSurface::new(point(0.0, 0.0), 4);
        let b = MapSurface::new(point(0.0, 0.0), 4);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_legend() {
        let entries = legend();
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().any(|e| e.icon == IconKind::Shelter));
    }
}
