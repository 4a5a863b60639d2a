//! Walks the precision lattice of a grid zone under a tile and clips lattice
//! cells to the zone.

use log::trace;

use crate::{
    bounds::Bounds,
    latlon::LatLon,
    utm::{central_meridian, Hemisphere, Utm},
    zones::GridZone,
};

/// One lattice cell, by its southwest corner in the zone's UTM coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Cell {
    pub easting: f64,
    pub northing: f64,
    pub precision: f64,
}

impl Cell {
    pub fn center(&self) -> (f64, f64) {
        (self.easting + self.precision / 2.0, self.northing + self.precision / 2.0)
    }
}

/// Visible part of a cell inside its zone
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ClippedCell {
    pub bounds: Bounds,
    pub center: LatLon,
}

/// Projection to and from a zone's UTM coordinates, whether or not the
/// point lies in the zone
#[derive(Clone, Copy, Debug)]
pub(crate) struct ZoneProjection {
    number: i32,
    hemisphere: Hemisphere,
}

impl ZoneProjection {
    pub fn new(zone: &GridZone) -> ZoneProjection {
        Self {
            number: zone.number(),
            hemisphere: zone.hemisphere(),
        }
    }

    pub fn to_utm(self, lat: f64, lon: f64) -> Utm {
        Utm::in_zone(&LatLon::new(lat, lon), self.number, self.hemisphere)
    }

    pub fn to_latlon(self, easting: f64, northing: f64) -> LatLon {
        Utm::new(self.number, self.hemisphere, easting, northing).to_latlon()
    }
}

/// Lattice cells covering the part of the zone inside the tile, padded by
/// one cell on every side.
pub(crate) fn cells(tile_bounds: &Bounds, precision: u32, zone: &GridZone) -> Vec<Cell> {
    let Some(bounds) = tile_bounds.overlap(zone.bounds()) else {
        return Vec::new();
    };

    let projection = ZoneProjection::new(zone);
    let extremes: Vec<Utm> = edge_extremes(&bounds, zone)
        .iter()
        .map(|point| projection.to_utm(point.latitude, point.longitude))
        .collect();

    let (min_e, max_e) = extremes
        .iter()
        .fold((f64::MAX, f64::MIN), |(min, max), utm| (min.min(utm.easting), max.max(utm.easting)));
    let (min_n, max_n) = extremes
        .iter()
        .fold((f64::MAX, f64::MIN), |(min, max), utm| (min.min(utm.northing), max.max(utm.northing)));

    let precision = f64::from(precision);
    #[allow(clippy::cast_possible_truncation)]
    let index = |value: f64| (value / precision).floor() as i64;

    let columns = (index(min_e) - 1)..=(index(max_e) + 1);
    let rows = (index(min_n) - 1)..=(index(max_n) + 1);

    // Corners are whole multiples of the precision
    #[allow(clippy::cast_precision_loss)]
    let cells = rows
        .flat_map(|row| {
            columns.clone().map(move |column| Cell {
                easting: column as f64 * precision,
                northing: row as f64 * precision,
                precision,
            })
        })
        .collect();

    cells
}

/// Points of the bounds where the zone's eastings and northings peak. Bounds
/// never cross the equator inside a zone, so meridians peak at the corners;
/// parallels peak on the central meridian.
fn edge_extremes(bounds: &Bounds, zone: &GridZone) -> Vec<LatLon> {
    let mut points = bounds.corners().to_vec();

    let lon0 = central_meridian(zone.number());
    if bounds.west < lon0 && lon0 < bounds.east {
        points.push(LatLon::new(bounds.south, lon0));
        points.push(LatLon::new(bounds.north, lon0));
    }

    points
}

/// Clips a cell to the zone.
///
/// A cell side lying outside the zone is moved onto the zone boundary: the
/// boundary is projected into the zone at the cell's middle, holding the
/// other coordinate fixed. The corners of the remaining cell give the inner
/// geographic bounding box (clipped sides taken on the zone boundary), which
/// is intersected with the zone bounds and
/// inset by `buffer` of its size on every clipped side. The center is the
/// UTM midpoint of the remaining cell. Cells without area in the zone give
/// `None`.
pub(crate) fn clip_cell(cell: &Cell, zone: &GridZone, buffer: f64) -> Option<ClippedCell> {
    let projection = ZoneProjection::new(zone);
    let zone_bounds = zone.bounds();

    let mut west = cell.easting;
    let mut south = cell.northing;
    let mut east = west + cell.precision;
    let mut north = south + cell.precision;
    let mut clipped = Sides::default();

    let (mid_e, _) = cell.center();

    let lon = projection.to_latlon(mid_e, south).longitude;
    let boundary = projection.to_utm(zone_bounds.south, lon).northing;
    if south < boundary {
        south = boundary;
        clipped.south = true;
    }

    let lon = projection.to_latlon(mid_e, north).longitude;
    let boundary = projection.to_utm(zone_bounds.north, lon).northing;
    if north > boundary {
        north = boundary;
        clipped.north = true;
    }

    if south >= north {
        return None;
    }

    let mid_n = (south + north) / 2.0;

    let lat = projection.to_latlon(west, mid_n).latitude;
    let boundary = projection.to_utm(lat, zone_bounds.west).easting;
    if west < boundary {
        west = boundary;
        clipped.west = true;
    }

    let lat = projection.to_latlon(east, mid_n).latitude;
    let boundary = projection.to_utm(lat, zone_bounds.east).easting;
    if east > boundary {
        east = boundary;
        clipped.east = true;
    }

    if west >= east {
        return None;
    }

    let southwest = projection.to_latlon(west, south);
    let northwest = projection.to_latlon(west, north);
    let northeast = projection.to_latlon(east, north);
    let southeast = projection.to_latlon(east, south);

    // Clipped sides lie on the zone boundary
    let min_lat = if clipped.south { zone_bounds.south } else { southwest.latitude.max(southeast.latitude) };
    let max_lat = if clipped.north { zone_bounds.north } else { northwest.latitude.min(northeast.latitude) };
    let min_lon = if clipped.west { zone_bounds.west } else { southwest.longitude.max(northwest.longitude) };
    let max_lon = if clipped.east { zone_bounds.east } else { southeast.longitude.min(northeast.longitude) };

    if min_lat >= max_lat || min_lon >= max_lon {
        return None;
    }

    let inner = Bounds::new(min_lon, min_lat, max_lon, max_lat);
    let mut bounds = inner.overlap(zone_bounds)?;
    if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        return None;
    }

    clipped.west |= bounds.west > inner.west;
    clipped.south |= bounds.south > inner.south;
    clipped.east |= bounds.east < inner.east;
    clipped.north |= bounds.north < inner.north;

    let (inset_lon, inset_lat) = (bounds.width() * buffer, bounds.height() * buffer);
    if clipped.west {
        bounds.west += inset_lon;
    }
    if clipped.east {
        bounds.east -= inset_lon;
    }
    if clipped.south {
        bounds.south += inset_lat;
    }
    if clipped.north {
        bounds.north -= inset_lat;
    }

    Some(ClippedCell {
        bounds,
        center: projection.to_latlon((west + east) / 2.0, mid_n),
    })
}

/// Cells of a zone visible in a tile, clipped to the zone
pub(crate) fn clipped_cells(
    tile_bounds: &Bounds,
    precision: u32,
    zone: &GridZone,
    buffer: f64,
) -> Vec<(Cell, ClippedCell)> {
    cells(tile_bounds, precision, zone)
        .into_iter()
        .filter_map(|cell| match clip_cell(&cell, zone, buffer) {
            Some(clipped) if clipped.bounds.intersects(tile_bounds) => Some((cell, clipped)),
            Some(_) => None,
            None => {
                trace!("Cell {} {} has no area in {zone}", cell.easting, cell.northing);
                None
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default)]
struct Sides {
    west: bool,
    south: bool,
    east: bool,
    north: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_cover_tile_with_padding() {
        let zone = GridZone::new(18, 'S').unwrap();
        // Inside 18SUJ, the 100km square from 300000 to 400000 easting
        let tile = Bounds::new(-77.1, 38.85, -77.0, 38.95);
        let cells = cells(&tile, 100_000, &zone);

        assert_eq!(cells.len(), 9);
        assert!(cells.contains(&Cell { easting: 300_000.0, northing: 4_300_000.0, precision: 100_000.0 }));
    }

    #[test]
    fn cells_reach_parallel_bulge_at_central_meridian() {
        // Zone 18 from 78°W to 72°W, central meridian 75°W
        let zone = GridZone::new(18, 'T').unwrap();
        let tile = Bounds::new(-78.0, 40.0, -72.0, 41.0);

        let projection = ZoneProjection::new(&zone);
        let corner = projection.to_utm(40.0, -78.0).northing;
        let bulge = projection.to_utm(40.0, -75.0).northing;
        assert!(corner - bulge > 3_000.0);

        let min_northing = cells(&tile, 1_000, &zone)
            .iter()
            .map(|cell| cell.northing)
            .fold(f64::MAX, f64::min);
        assert!(min_northing <= bulge - 1_000.0);
    }

    #[test]
    fn interior_cell_is_not_clipped() {
        let zone = GridZone::new(18, 'S').unwrap();
        let cell = Cell { easting: 323_000.0, northing: 4_306_000.0, precision: 1_000.0 };
        let clipped = clip_cell(&cell, &zone, 0.25).unwrap();

        let projection = ZoneProjection::new(&zone);
        let southwest = projection.to_latlon(323_000.0, 4_306_000.0);
        let northeast = projection.to_latlon(324_000.0, 4_307_000.0);

        // Inner bounding box, never inset
        assert!(clipped.bounds.west >= southwest.longitude);
        assert!(clipped.bounds.south >= southwest.latitude);
        assert!(clipped.bounds.east <= northeast.longitude);
        assert!(clipped.bounds.north <= northeast.latitude);
        assert!(clipped.bounds.width() > 0.9 * (northeast.longitude - southwest.longitude));
    }

    #[test]
    fn cell_straddling_zone_edge_is_clipped_and_inset() {
        let zone = GridZone::new(18, 'S').unwrap();
        // Column 2 of 18S reaches past 78°W at 38°N
        let cell = Cell { easting: 200_000.0, northing: 4_200_000.0, precision: 100_000.0 };

        let clipped = clip_cell(&cell, &zone, 0.0).unwrap();
        assert!((clipped.bounds.west - -78.0).abs() < 1e-9);

        let buffered = clip_cell(&cell, &zone, 0.1).unwrap();
        assert!(buffered.bounds.west > -78.0);
        assert!(zone.bounds().contains_bounds(&buffered.bounds, 0.0));
        assert!(zone.bounds().contains(&buffered.center));
    }

    #[test]
    fn cell_outside_zone_has_no_area() {
        let zone = GridZone::new(18, 'S').unwrap();
        let cell = Cell { easting: 100_000.0, northing: 4_200_000.0, precision: 100_000.0 };
        assert_eq!(clip_cell(&cell, &zone, 0.0), None);
    }
}
