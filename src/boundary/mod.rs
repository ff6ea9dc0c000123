//! Territory checks
//!
//! Decides whether a coordinate pair lies inside Brazil using the shipped
//! boundary polygons. When the dataset cannot be used, the check degrades to
//! a bounding box and logs the degradation; it never fails.

pub mod dataset;
pub mod geometry;

use crate::constants::boundary::{BBOX_MAX_LAT, BBOX_MAX_LON, BBOX_MIN_LAT, BBOX_MIN_LON};
use crate::coord::Coordinates;
use geometry::BoundaryGeometry;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use dataset::{country_geometry, dataset_override};

/// Axis-aligned latitude/longitude box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Brazil's approximate extent (IBGE)
    pub const BRAZIL: Self = Self {
        min_lat: BBOX_MIN_LAT,
        max_lat: BBOX_MAX_LAT,
        min_lon: BBOX_MIN_LON,
        max_lon: BBOX_MAX_LON,
    };

    /// Inclusive containment test
    pub fn contains(&self, coords: Coordinates) -> bool {
        (self.min_lat..=self.max_lat).contains(&coords.lat)
            && (self.min_lon..=self.max_lon).contains(&coords.lon)
    }
}

/// How a territory answer was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckMethod {
    /// Ray casting against the boundary polygons
    Polygon,
    /// Degraded answer from the bounding box
    BoundingBox,
}

/// Territory answer with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryCheck {
    pub inside: bool,
    pub method: CheckMethod,
}

/// Check coordinates against an optional geometry
///
/// With no geometry the bounding box answers instead. Border and coastal
/// points near the box edges may be misclassified in that mode.
pub fn check_with(geometry: Option<&BoundaryGeometry>, coords: Coordinates) -> TerritoryCheck {
    match geometry {
        Some(geometry) => TerritoryCheck {
            inside: geometry.contains(coords),
            method: CheckMethod::Polygon,
        },
        None => {
            warn!("Boundary geometry unavailable, falling back to bounding box check");
            TerritoryCheck {
                inside: BoundingBox::BRAZIL.contains(coords),
                method: CheckMethod::BoundingBox,
            }
        }
    }
}

/// Check coordinates against the process-wide country geometry
pub fn check_territory(lat: f64, lon: f64) -> TerritoryCheck {
    check_with(country_geometry(), Coordinates::new(lat, lon))
}

/// Whether the coordinates are within Brazil's borders
pub fn is_in_territory(lat: f64, lon: f64) -> bool {
    check_territory(lat, lon).inside
}

/// Whether the polygon dataset loaded (false means bounding-box mode)
pub fn is_dataset_available() -> bool {
    country_geometry().is_some()
}
