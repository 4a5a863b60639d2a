// Semi-major axis a
pub(crate) const WGS84_A: f64 = 6_378_137.;
// Flattening
#[allow(clippy::unreadable_literal)]
pub(crate) const WGS84_F: f64 = 1.0 / 298.257223563;

// UTM central scale factor
pub(crate) const UTM_K0: f64 = 9996.0 / 10_000.;

pub(crate) const FALSE_EASTING: f64 = 500_000.;
pub(crate) const FALSE_NORTHING: f64 = 10_000_000.;

// MGRS latitude limits
pub(crate) const MIN_LAT: f64 = -80.;
pub(crate) const MAX_LAT: f64 = 84.;
pub(crate) const MIN_LON: f64 = -180.;
pub(crate) const MAX_LON: f64 = 180.;

/// Highest zoom level the grid registry indexes
pub const MAX_MAP_ZOOM: u8 = 21;
