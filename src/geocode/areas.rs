//! Area lookup payload decoding
//!
//! The area endpoint has answered in two shapes over time:
//!
//! ```text
//! A: {"3304557": {"centroide": {"lat": -22.9, "lon": "-43.1"}, ...}, ...}
//! B: [{"geocode": 3304557, "centroide": "-43.1,-22.9", ...}, ...]
//! ```
//!
//! Both decode into a flat list of [`AreaCandidate`]s. Records are decoded one
//! by one, so a single bad record is skipped instead of failing the payload.

use crate::coord::distance::nearest;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One area with a usable centroid
#[derive(Debug, Clone, PartialEq)]
pub struct AreaCandidate {
    pub geocode: String,
    pub centroid: Coordinates,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AreaPayload {
    ByGeocode(Map<String, Value>),
    Listing(Vec<Value>),
}

/// A number that may arrive as a JSON string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Centroid {
    Point { lat: Numeric, lon: Numeric },
    /// `"lon,lat"`
    Pair(String),
}

impl Centroid {
    fn coordinates(&self) -> Option<Coordinates> {
        let (lat, lon) = match self {
            Self::Point { lat, lon } => (lat.value()?, lon.value()?),
            Self::Pair(text) => {
                let (lon, lat) = text.split_once(',')?;
                (lat.trim().parse().ok()?, lon.trim().parse().ok()?)
            }
        };
        let coords = Coordinates::new(lat, lon);
        coords.validate().ok().map(|_| coords)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GeocodeId {
    Text(String),
    Code(u64),
}

impl GeocodeId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Code(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct KeyedRecord {
    centroide: Centroid,
}

#[derive(Debug, Deserialize)]
struct ListedRecord {
    geocode: GeocodeId,
    centroide: Centroid,
}

/// Decode every usable candidate from an area payload
///
/// Returns [`Error::Payload`] when the payload is neither shape or yields
/// no candidate at all.
pub fn decode_candidates(payload: &Value) -> Result<Vec<AreaCandidate>> {
    let payload = AreaPayload::deserialize(payload)
        .map_err(|_| Error::Payload("expected an object or an array of areas".to_string()))?;

    let candidates: Vec<AreaCandidate> = match payload {
        AreaPayload::ByGeocode(map) => map
            .into_iter()
            .filter_map(|(geocode, record)| {
                let record = KeyedRecord::deserialize(&record).ok()?;
                Some(AreaCandidate {
                    geocode,
                    centroid: record.centroide.coordinates()?,
                })
            })
            .collect(),
        AreaPayload::Listing(records) => records
            .iter()
            .filter_map(|record| {
                let record = ListedRecord::deserialize(record).ok()?;
                Some(AreaCandidate {
                    centroid: record.centroide.coordinates()?,
                    geocode: record.geocode.into_string(),
                })
            })
            .collect(),
    };

    if candidates.is_empty() {
        return Err(Error::Payload("no area with a usable centroid".to_string()));
    }
    Ok(candidates)
}

/// Geocode of the candidate closest to `origin`, with its distance in km
pub fn nearest_area(payload: &Value, origin: Coordinates) -> Result<(String, f64)> {
    let candidates = decode_candidates(payload)?;
    nearest(origin, candidates, |c| c.centroid)
        .map(|(candidate, distance)| (candidate.geocode, distance))
        .ok_or_else(|| Error::Payload("no comparable area distance".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RIO: Coordinates = Coordinates { lat: -22.9068, lon: -43.1729 };

    #[test]
    fn test_keyed_shape() {
        let payload = json!({
            "3304557": {"nome": "Rio de Janeiro", "centroide": {"lat": -22.9068, "lon": -43.1729}},
            "3550308": {"nome": "Sao Paulo", "centroide": {"lat": "-23.5505", "lon": "-46.6333"}}
        });
        let mut candidates = decode_candidates(&payload).unwrap();
        candidates.sort_by(|a, b| a.geocode.cmp(&b.geocode));

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].geocode, "3550308");
        assert_eq!(candidates[1].centroid, Coordinates::new(-23.5505, -46.6333));
    }

    #[test]
    fn test_listed_shape() {
        let payload = json!([
            {"geocode": 3304557, "centroide": "-43.1729,-22.9068"},
            {"geocode": "5300108", "centroide": " -47.8828 , -15.7939 "}
        ]);
        let candidates = decode_candidates(&payload).unwrap();

        assert_eq!(candidates[0].geocode, "3304557");
        assert_eq!(candidates[0].centroid, RIO);
        assert_eq!(candidates[1].geocode, "5300108");
        assert_eq!(candidates[1].centroid.lat, -15.7939);
    }

    #[test]
    fn test_listed_shape_with_object_centroid() {
        let payload = json!([{"geocode": "1", "centroide": {"lat": 1.0, "lon": 2.0}}]);
        let candidates = decode_candidates(&payload).unwrap();
        assert_eq!(candidates[0].centroid, Coordinates::new(1.0, 2.0));
    }

    #[test]
    fn test_bad_records_are_skipped() {
        let payload = json!({
            "1": {"centroide": {"lat": "north", "lon": 0.0}},
            "2": {"sem_centroide": true},
            "3": "not a record",
            "4": {"centroide": {"lat": 95.0, "lon": 0.0}},
            "5": {"centroide": {"lat": -22.9068, "lon": -43.1729}}
        });
        let candidates = decode_candidates(&payload).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].geocode, "5");
    }

    #[test]
    fn test_empty_payloads_are_malformed() {
        assert!(matches!(decode_candidates(&json!({})), Err(Error::Payload(_))));
        assert!(matches!(decode_candidates(&json!([])), Err(Error::Payload(_))));
    }

    #[test]
    fn test_scalar_payload_is_malformed() {
        assert!(matches!(decode_candidates(&json!("oops")), Err(Error::Payload(_))));
        assert!(matches!(decode_candidates(&json!(null)), Err(Error::Payload(_))));
    }

    #[test]
    fn test_unparseable_pair_is_skipped() {
        let payload = json!([
            {"geocode": "1", "centroide": "-43.1"},
            {"geocode": "2", "centroide": "a,b"},
            {"centroide": "-43.1,-22.9"}
        ]);
        assert!(decode_candidates(&payload).is_err());
    }

    #[test]
    fn test_nearest_area() {
        let payload = json!({
            "3550308": {"centroide": {"lat": -23.5505, "lon": -46.6333}},
            "3304557": {"centroide": {"lat": -22.9068, "lon": -43.1729}},
            "5300108": {"centroide": {"lat": -15.7939, "lon": -47.8828}}
        });
        let (geocode, distance) = nearest_area(&payload, Coordinates::new(-22.95, -43.2)).unwrap();
        assert_eq!(geocode, "3304557");
        assert!(distance < 10.0);
    }
}
