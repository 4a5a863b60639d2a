use std::fmt::Display;

use crate::latlon::LatLon;

/// Geographic bounding box in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub(crate) west: f64,
    pub(crate) south: f64,
    pub(crate) east: f64,
    pub(crate) north: f64,
}

impl Bounds {
    /// Creates bounds from its edges, swapping reversed edges into order.
    ///
    /// ```
    /// use mgrs_grid::Bounds;
    ///
    /// let bounds = Bounds::new(-78.0, 38.0, -76.0, 40.0);
    /// assert_eq!(bounds.center().longitude(), -77.0);
    /// assert_eq!(bounds.center().latitude(), 39.0);
    ///
    /// let swapped = Bounds::new(-76.0, 40.0, -78.0, 38.0);
    /// assert_eq!(swapped, bounds);
    /// ```
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Bounds {
        Self {
            west: west.min(east),
            south: south.min(north),
            east: west.max(east),
            north: south.max(north),
        }
    }

    #[inline]
    pub fn west(&self) -> f64 {
        self.west
    }

    #[inline]
    pub fn south(&self) -> f64 {
        self.south
    }

    #[inline]
    pub fn east(&self) -> f64 {
        self.east
    }

    #[inline]
    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    pub fn southwest(&self) -> LatLon {
        LatLon::new(self.south, self.west)
    }

    pub fn northwest(&self) -> LatLon {
        LatLon::new(self.north, self.west)
    }

    pub fn southeast(&self) -> LatLon {
        LatLon::new(self.south, self.east)
    }

    pub fn northeast(&self) -> LatLon {
        LatLon::new(self.north, self.east)
    }

    pub fn corners(&self) -> [LatLon; 4] {
        [self.southwest(), self.northwest(), self.northeast(), self.southeast()]
    }

    pub fn center(&self) -> LatLon {
        LatLon::new((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    /// Whether the point lies inside or on the edge of the bounds
    pub fn contains(&self, point: &LatLon) -> bool {
        (self.west..=self.east).contains(&point.longitude)
            && (self.south..=self.north).contains(&point.latitude)
    }

    /// Whether `other` lies entirely inside these bounds, within `tolerance` degrees
    pub fn contains_bounds(&self, other: &Bounds, tolerance: f64) -> bool {
        other.west >= self.west - tolerance
            && other.east <= self.east + tolerance
            && other.south >= self.south - tolerance
            && other.north <= self.north + tolerance
    }

    /// Whether the interiors of the two bounds overlap. Bounds sharing only
    /// an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.west < other.east
            && other.west < self.east
            && self.south < other.north
            && other.south < self.north
    }

    /// Overlapping region of the two bounds, `None` when they are disjoint.
    /// Bounds sharing an edge overlap in a degenerate region.
    ///
    /// ```
    /// use mgrs_grid::Bounds;
    ///
    /// let a = Bounds::new(0.0, 0.0, 6.0, 8.0);
    /// let b = Bounds::new(3.0, 4.0, 9.0, 12.0);
    /// assert_eq!(a.overlap(&b), Some(Bounds::new(3.0, 4.0, 6.0, 8.0)));
    ///
    /// let c = Bounds::new(7.0, 0.0, 9.0, 8.0);
    /// assert_eq!(a.overlap(&c), None);
    /// ```
    pub fn overlap(&self, other: &Bounds) -> Option<Bounds> {
        let west = self.west.max(other.west);
        let south = self.south.max(other.south);
        let east = self.east.min(other.east);
        let north = self.north.min(other.north);

        (west <= east && south <= north).then_some(Bounds { west, south, east, north })
    }
}

impl Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.west, self.south, self.east, self.north)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_sharing_bounds_do_not_intersect() {
        let a = Bounds::new(-78.0, 32.0, -72.0, 40.0);
        let b = Bounds::new(-72.0, 32.0, -66.0, 40.0);
        assert!(!a.intersects(&b));
        assert_eq!(a.overlap(&b), Some(Bounds::new(-72.0, 32.0, -72.0, 40.0)));
    }

    #[test]
    fn contains_points_on_edges() {
        let a = Bounds::new(-78.0, 32.0, -72.0, 40.0);
        assert!(a.contains(&LatLon::new(32.0, -78.0)));
        assert!(a.contains(&LatLon::new(36.0, -75.0)));
        assert!(!a.contains(&LatLon::new(40.1, -75.0)));
    }

    #[test]
    fn contains_bounds_with_tolerance() {
        let a = Bounds::new(-78.0, 32.0, -72.0, 40.0);
        assert!(a.contains_bounds(&Bounds::new(-77.0, 33.0, -73.0, 39.0), 0.0));
        assert!(!a.contains_bounds(&Bounds::new(-78.1, 33.0, -73.0, 39.0), 0.0));
        assert!(a.contains_bounds(&Bounds::new(-78.000_000_1, 33.0, -73.0, 39.0), 1e-6));
    }
}
