//! Grid line segments inside a tile, clipped to the grid zone.

use crate::{bounds::Bounds, latlon::LatLon, zones::GridZone};

use super::{GridType, cell::{self, ZoneProjection}};

/// Straight geographic segment of a grid line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    start: LatLon,
    end: LatLon,
    grid_type: GridType,
}

impl GridLine {
    pub fn start(&self) -> &LatLon {
        &self.start
    }

    pub fn end(&self) -> &LatLon {
        &self.end
    }

    pub fn grid_type(&self) -> GridType {
        self.grid_type
    }
}

/// Lines of a grid inside a tile and zone. The GZD grid gives the zone's
/// edges, the others the west and south edges of every lattice cell.
///
/// ```
/// use mgrs_grid::{Bounds, GridType, GridZone};
/// use mgrs_grid::grid::lines::lines;
///
/// let zone = GridZone::new(18, 'S').unwrap();
/// let tile = Bounds::new(-77.2, 38.8, -76.9, 39.0);
///
/// let gzd = lines(&tile, GridType::Gzd, &zone);
/// assert!(gzd.is_empty());
///
/// let kilometer = lines(&tile, GridType::Kilometer, &zone);
/// assert!(kilometer.iter().all(|line| tile.contains(line.start()) && tile.contains(line.end())));
/// ```
pub fn lines(tile_bounds: &Bounds, grid_type: GridType, zone: &GridZone) -> Vec<GridLine> {
    let Some(clip_bounds) = tile_bounds.overlap(zone.bounds()) else {
        return Vec::new();
    };

    let segments = match grid_type.precision() {
        None => {
            let [southwest, northwest, northeast, southeast] = zone.bounds().corners();
            vec![
                (southwest, northwest),
                (northwest, northeast),
                (northeast, southeast),
                (southeast, southwest),
            ]
        }
        Some(precision) => {
            let projection = ZoneProjection::new(zone);

            cell::cells(tile_bounds, precision, zone)
                .iter()
                .flat_map(|cell| {
                    let southwest = projection.to_latlon(cell.easting, cell.northing);
                    let northwest = projection.to_latlon(cell.easting, cell.northing + cell.precision);
                    let southeast = projection.to_latlon(cell.easting + cell.precision, cell.northing);
                    [(southwest, northwest), (southwest, southeast)]
                })
                .collect()
        }
    };

    segments
        .into_iter()
        .filter_map(|(start, end)| clip(start, end, &clip_bounds))
        .filter(|(start, end)| start != end)
        .map(|(start, end)| GridLine { start, end, grid_type })
        .collect()
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(point: &LatLon, bounds: &Bounds) -> u8 {
    let mut code = INSIDE;
    if point.longitude < bounds.west {
        code |= LEFT;
    } else if point.longitude > bounds.east {
        code |= RIGHT;
    }
    if point.latitude < bounds.south {
        code |= BOTTOM;
    } else if point.latitude > bounds.north {
        code |= TOP;
    }
    code
}

/// Cohen-Sutherland clipping of a segment to bounds
fn clip(start: LatLon, end: LatLon, bounds: &Bounds) -> Option<(LatLon, LatLon)> {
    let (mut p0, mut p1) = (start, end);
    let (mut code0, mut code1) = (outcode(&p0, bounds), outcode(&p1, bounds));

    loop {
        if code0 | code1 == INSIDE {
            return Some((p0, p1));
        }
        if code0 & code1 != INSIDE {
            return None;
        }

        let out = if code0 == INSIDE { code1 } else { code0 };
        let (dx, dy) = (p1.longitude - p0.longitude, p1.latitude - p0.latitude);

        // The segment crosses the edge, so the divisor is never zero
        let point = if out & TOP != 0 {
            LatLon::new(bounds.north, p0.longitude + dx * (bounds.north - p0.latitude) / dy)
        } else if out & BOTTOM != 0 {
            LatLon::new(bounds.south, p0.longitude + dx * (bounds.south - p0.latitude) / dy)
        } else if out & RIGHT != 0 {
            LatLon::new(p0.latitude + dy * (bounds.east - p0.longitude) / dx, bounds.east)
        } else {
            LatLon::new(p0.latitude + dy * (bounds.west - p0.longitude) / dx, bounds.west)
        };

        if out == code0 {
            p0 = point;
            code0 = outcode(&p0, bounds);
        } else {
            p1 = point;
            code1 = outcode(&p1, bounds);
        }
    }
}
