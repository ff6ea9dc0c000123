//! Great-circle distance
//!
//! Haversine distance on a spherical Earth. Used to pick the nearest
//! upstream area centroid and the nearest known capital.

use crate::constants::geo::EARTH_RADIUS_KM;
use crate::coord::Coordinates;

/// Calculate the distance between two points in kilometers (Haversine formula)
///
/// # Arguments
/// * `p1` - First point
/// * `p2` - Second point
///
/// # Returns
/// Distance in kilometers. Symmetric in its arguments and exactly zero for
/// identical points.
pub fn haversine_km(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lon = (p2.lon - p1.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Pick the item closest to `origin`
///
/// Ties keep the earliest item. Items whose distance is not a number are
/// never selected, so the result is `None` when nothing is comparable.
pub fn nearest<T, I, F>(origin: Coordinates, items: I, position: F) -> Option<(T, f64)>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Coordinates,
{
    let mut best: Option<(T, f64)> = None;

    for item in items {
        let distance = haversine_km(origin, position(&item));
        let closer = match &best {
            Some((_, best_distance)) => distance < *best_distance,
            None => distance < f64::INFINITY,
        };
        if closer {
            best = Some((item, distance));
        }
    }

    best
}
