//! Boundary dataset loading
//!
//! Reads a GeoJSON FeatureCollection and keeps the first feature's geometry.
//! The country outline is compiled into the binary; `INMET_BOUNDARY_DATASET`
//! swaps in a file instead. Either way it is parsed at most once per process.

use crate::boundary::geometry::{BoundaryGeometry, Polygon, Position, Ring};
use crate::constants::boundary::DATASET_ENV;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, error};

/// Country outline shipped with the crate
pub const EMBEDDED_DATASET: &str = include_str!("../../data/brazil.geojson");

static COUNTRY_GEOMETRY: OnceLock<Option<BoundaryGeometry>> = OnceLock::new();
static DATASET_OVERRIDE: OnceLock<Option<PathBuf>> = OnceLock::new();

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

/// Dataset file replacing the embedded outline, if any
///
/// Taken from `INMET_BOUNDARY_DATASET`. The variable is read once; later
/// changes have no effect.
pub fn dataset_override() -> Option<&'static Path> {
    DATASET_OVERRIDE
        .get_or_init(|| std::env::var_os(DATASET_ENV).map(PathBuf::from))
        .as_deref()
}

/// Process-wide country geometry
///
/// The first call parses the dataset; every later call returns the same
/// shared handle. `None` means the override file is missing or unusable, and
/// callers should degrade to the bounding box.
pub fn country_geometry() -> Option<&'static BoundaryGeometry> {
    COUNTRY_GEOMETRY
        .get_or_init(|| {
            let source = dataset_override();
            match load_country_geometry(source) {
                Ok(geometry) => {
                    debug!(
                        "Loaded boundary geometry with {} polygon(s) from {}",
                        geometry.polygon_count(),
                        source.map_or("embedded outline".into(), |p| p.display().to_string())
                    );
                    Some(geometry)
                }
                Err(e) => {
                    error!("Boundary dataset unavailable, using bounding box: {}", e);
                    None
                }
            }
        })
        .as_ref()
}

/// Parse the override file when given, the embedded outline otherwise
pub fn load_country_geometry(override_path: Option<&Path>) -> Result<BoundaryGeometry> {
    match override_path {
        Some(path) => load_geometry(path),
        None => parse_geometry(EMBEDDED_DATASET),
    }
}

/// Load a geometry from a GeoJSON file
pub fn load_geometry(path: &Path) -> Result<BoundaryGeometry> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Dataset(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_geometry(&content)
}

/// Parse a GeoJSON FeatureCollection and extract its first geometry
pub fn parse_geometry(content: &str) -> Result<BoundaryGeometry> {
    let collection: FeatureCollection = serde_json::from_str(content)
        .map_err(|e| Error::Dataset(format!("Failed to parse GeoJSON: {}", e)))?;

    if collection.kind != "FeatureCollection" {
        return Err(Error::Dataset(format!(
            "Expected FeatureCollection, found {}",
            collection.kind
        )));
    }

    let geometry = collection
        .features
        .into_iter()
        .next()
        .ok_or_else(|| Error::Dataset("FeatureCollection has no features".to_string()))?
        .geometry
        .ok_or_else(|| Error::Dataset("First feature has no geometry".to_string()))?;

    match geometry.kind.as_str() {
        "Polygon" => {
            let rings = parse_rings(geometry.coordinates)?;
            let polygon = Polygon::from_rings(rings)
                .ok_or_else(|| Error::Dataset("Polygon has no rings".to_string()))?;
            Ok(BoundaryGeometry::Polygon(polygon))
        }
        "MultiPolygon" => {
            let groups: Vec<Vec<Vec<Vec<f64>>>> = serde_json::from_value(geometry.coordinates)
                .map_err(|e| Error::Dataset(format!("Invalid MultiPolygon coordinates: {}", e)))?;
            let mut polygons = Vec::with_capacity(groups.len());
            for group in groups {
                let rings = group
                    .into_iter()
                    .map(to_ring)
                    .collect::<Result<Vec<Ring>>>()?;
                // Empty ring groups carry no area
                if let Some(polygon) = Polygon::from_rings(rings) {
                    polygons.push(polygon);
                }
            }
            Ok(BoundaryGeometry::MultiPolygon(polygons))
        }
        other => Err(Error::Geometry(other.to_string())),
    }
}

fn parse_rings(coordinates: Value) -> Result<Vec<Ring>> {
    let rings: Vec<Vec<Vec<f64>>> = serde_json::from_value(coordinates)
        .map_err(|e| Error::Dataset(format!("Invalid Polygon coordinates: {}", e)))?;
    rings.into_iter().map(to_ring).collect()
}

/// Positions may carry an altitude; only lon and lat are kept
fn to_ring(positions: Vec<Vec<f64>>) -> Result<Ring> {
    positions
        .into_iter()
        .map(|p| match p.as_slice() {
            [lon, lat, ..] => Ok::<Position, Error>([*lon, *lat]),
            _ => Err(Error::Dataset(format!("Position needs two values, got {:?}", p))),
        })
        .collect()
}
