//! Polygon geometry and ray casting
//!
//! Rings are sequences of `[lon, lat]` positions, the GeoJSON order. The rest
//! of the crate speaks `(lat, lon)`; [`BoundaryGeometry::contains`] is the one
//! place where the order flips.

use crate::coord::Coordinates;

/// A `[lon, lat]` vertex
pub type Position = [f64; 2];

/// A closed or open ring of vertices; the closing edge is implied
pub type Ring = Vec<Position>;

/// One polygon: an exterior ring and zero or more holes
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: Ring,
    pub holes: Vec<Ring>,
}

/// Country geometry as loaded from the dataset
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryGeometry {
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
}

impl Polygon {
    /// Build a polygon from GeoJSON ring order: first ring exterior, rest holes
    ///
    /// Returns `None` for an empty ring list.
    pub fn from_rings(rings: Vec<Ring>) -> Option<Self> {
        let mut rings = rings.into_iter();
        let exterior = rings.next()?;
        Some(Self {
            exterior,
            holes: rings.collect(),
        })
    }

    /// Inside the exterior ring and inside none of the holes
    pub fn contains(&self, point: Position) -> bool {
        point_in_ring(point, &self.exterior)
            && !self.holes.iter().any(|hole| point_in_ring(point, hole))
    }
}

impl BoundaryGeometry {
    /// Test whether the coordinates fall inside the geometry
    pub fn contains(&self, coords: Coordinates) -> bool {
        let point = [coords.lon, coords.lat];
        match self {
            Self::Polygon(polygon) => polygon.contains(point),
            Self::MultiPolygon(polygons) => polygons.iter().any(|p| p.contains(point)),
        }
    }

    /// Number of polygons in the geometry
    pub fn polygon_count(&self) -> usize {
        match self {
            Self::Polygon(_) => 1,
            Self::MultiPolygon(polygons) => polygons.len(),
        }
    }
}

/// Ray casting test of a single ring
///
/// Casts a horizontal ray from `point` towards +x and toggles on each edge
/// crossing; an odd count means inside. Horizontal edges get an infinite
/// x-intersection so they never toggle on their own.
pub fn point_in_ring(point: Position, ring: &[Position]) -> bool {
    let [x, y] = point;
    let n = ring.len();
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let [mut p1x, mut p1y] = ring[0];

    for i in 1..=n {
        let [p2x, p2y] = ring[i % n];
        if y > p1y.min(p2y) && y <= p1y.max(p2y) && x <= p1x.max(p2x) {
            let xinters = if p1y != p2y {
                (y - p1y) * (p2x - p1x) / (p2y - p1y) + p1x
            } else {
                f64::INFINITY
            };
            if p1x == p2x || x <= xinters {
                inside = !inside;
            }
        }
        p1x = p2x;
        p1y = p2y;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> Ring {
        vec![[min, min], [max, min], [max, max], [min, max], [min, min]]
    }

    #[test]
    fn test_point_in_square() {
        let ring = square(0.0, 10.0);
        assert!(point_in_ring([5.0, 5.0], &ring));
        assert!(point_in_ring([0.5, 9.5], &ring));
        assert!(!point_in_ring([15.0, 5.0], &ring));
        assert!(!point_in_ring([-1.0, 5.0], &ring));
        assert!(!point_in_ring([5.0, 11.0], &ring));
    }

    #[test]
    fn test_open_ring_is_closed_implicitly() {
        let ring = vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        assert!(point_in_ring([5.0, 5.0], &ring));
        assert!(!point_in_ring([11.0, 5.0], &ring));
    }

    #[test]
    fn test_concave_ring() {
        // U shape opening upwards
        let ring = vec![
            [0.0, 0.0],
            [9.0, 0.0],
            [9.0, 9.0],
            [6.0, 9.0],
            [6.0, 3.0],
            [3.0, 3.0],
            [3.0, 9.0],
            [0.0, 9.0],
        ];
        assert!(point_in_ring([1.5, 6.0], &ring));
        assert!(point_in_ring([7.5, 6.0], &ring));
        assert!(!point_in_ring([4.5, 6.0], &ring));
        assert!(point_in_ring([4.5, 1.5], &ring));
    }

    #[test]
    fn test_ray_through_horizontal_edge() {
        // Point level with the top edge of a notch
        let ring = vec![[0.0, 0.0], [10.0, 0.0], [10.0, 5.0], [5.0, 5.0], [5.0, 10.0], [0.0, 10.0]];
        assert!(point_in_ring([2.0, 5.0], &ring));
        assert!(!point_in_ring([12.0, 5.0], &ring));
    }

    #[test]
    fn test_empty_ring() {
        assert!(!point_in_ring([0.0, 0.0], &[]));
    }

    #[test]
    fn test_polygon_with_hole() {
        let polygon = Polygon::from_rings(vec![square(0.0, 10.0), square(4.0, 6.0)]).unwrap();
        assert!(polygon.contains([2.0, 2.0]));
        assert!(!polygon.contains([5.0, 5.0]));
        assert!(!polygon.contains([20.0, 20.0]));
    }

    #[test]
    fn test_polygon_from_empty_rings() {
        assert!(Polygon::from_rings(Vec::new()).is_none());
    }

    #[test]
    fn test_multipolygon_any_member() {
        let geometry = BoundaryGeometry::MultiPolygon(vec![
            Polygon::from_rings(vec![square(0.0, 10.0), square(4.0, 6.0)]).unwrap(),
            Polygon::from_rings(vec![square(20.0, 30.0)]).unwrap(),
        ]);
        // contains() takes (lat, lon); rings are (lon, lat)
        assert!(geometry.contains(Coordinates::new(2.0, 2.0)));
        assert!(geometry.contains(Coordinates::new(25.0, 25.0)));
        assert!(!geometry.contains(Coordinates::new(5.0, 5.0)));
        assert!(!geometry.contains(Coordinates::new(15.0, 15.0)));
        assert_eq!(geometry.polygon_count(), 2);
    }

    #[test]
    fn test_contains_swaps_to_lon_lat() {
        // Tall thin box: lon in [0, 1], lat in [0, 10]
        let ring = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 10.0], [0.0, 10.0]];
        let geometry = BoundaryGeometry::Polygon(Polygon::from_rings(vec![ring]).unwrap());

        assert!(geometry.contains(Coordinates::new(5.0, 0.5)));
        assert!(!geometry.contains(Coordinates::new(0.5, 5.0)));
    }
}
