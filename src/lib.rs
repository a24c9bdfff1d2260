//! trail-lens: hiking map annotations
//!
//! A library and CLI tool that gathers location annotations for a hiking
//! map: keyword place search, the selected location, nearby tourism spots
//! and classified hazard areas and mountain peaks.
//!
//! ## Features
//!
//! - Keyword search backends (Kakao Local, Nominatim)
//! - Hazard/peak classification into map markers
//! - Nearby tourism spots from the Korea Tourism Organization service
//! - A single-owner controller that re-runs work when its inputs change
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use trail_lens::geo::GeoPoint;
//! use trail_lens::render::{IconKind, MapSurface};
//! use trail_lens::terrain::{classify, render, RawHazardRecord, RawPeakRecord};
//!
//! let areas = vec![RawHazardRecord {
//!     lat: 33.4,
//!     lot: 126.5,
//!     name: "Ridge".to_string(),
//!     type_code: "DANGER".to_string(),
//! }];
//! let peaks = vec![RawPeakRecord { lat: 33.5, lot: 126.6, name: "Peak1".to_string() }];
//!
//! let mut surface = MapSurface::new(GeoPoint::new(33.45, 126.57).unwrap(), 4);
//! render(&classify(&areas, &peaks), &mut surface);
//!
//! assert_eq!(surface.count(IconKind::Danger), 1);
//! assert_eq!(surface.count(IconKind::Peak), 1);
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;
pub mod render;
pub mod search;
pub mod selection;
pub mod server;
pub mod terrain;
pub mod tourism;

// Re-export commonly used types
pub use app::{Controller, ControllerHandle};
pub use config::Config;
pub use error::{Error, Result};
pub use geo::{GeoPoint, PlaceCandidate};
pub use render::{AnnotationRenderer, IconKind, MapSurface};
