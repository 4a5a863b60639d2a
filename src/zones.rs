//! UTM zone numbers, latitude band letters and the grid zones (GZD) they form.

use std::fmt::Display;

use crate::{
    bounds::Bounds,
    constants::{MAX_LAT, MIN_LAT},
    latlon::{check_range, LatLon},
    utility::{dms, GeoMath},
    utm::Hemisphere,
    Error,
};

/// Latitude band letters from 80°S northwards, I and O omitted
pub const BAND_LETTERS: &str = "CDEFGHJKLMNPQRSTUVWX";
/// First band letter of the northern hemisphere
pub const BAND_LETTER_NORTH: char = 'N';

pub const MIN_ZONE_NUMBER: i32 = 1;
pub const MAX_ZONE_NUMBER: i32 = 60;

const ZONE_WIDTH: f64 = 6.;
const BAND_HEIGHT: f64 = 8.;

/// Band index in `[-10, 9]`, 0 being the first band north of the equator.
/// Seams belong to the northern band and 84° stays in band X.
pub(crate) fn to_latitude_band(lat: f64) -> i32 {
    #[allow(clippy::cast_possible_truncation)]
    let lat_int = lat.floor() as i32;
    (-10).max(9.min((lat_int + 80).div_euclid(8) - 10))
}

/// Returns the band letter for a latitude.
///
/// # Errors
///
/// Returns [`Error::InvalidCoordinate`] if the latitude is outside `[-80, 84]`.
///
/// ```
/// use mgrs_grid::zones::band_letter;
///
/// assert_eq!(band_letter(-80.0).unwrap(), 'C');
/// assert_eq!(band_letter(0.0).unwrap(), 'N');
/// assert_eq!(band_letter(-0.5).unwrap(), 'M');
/// assert_eq!(band_letter(72.0).unwrap(), 'X');
/// assert_eq!(band_letter(84.0).unwrap(), 'X');
/// assert!(band_letter(84.5).is_err());
/// ```
pub fn band_letter(lat: f64) -> Result<char, Error> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(Error::InvalidCoordinate(format!("Latitude {lat} outside of MGRS range [{MIN_LAT}, {MAX_LAT}].")));
    }

    band_char(to_latitude_band(lat))
}

fn band_char(band_idx: i32) -> Result<char, Error> {
    usize::try_from(band_idx + 10)
        .ok()
        .and_then(|i| BAND_LETTERS.chars().nth(i))
        .ok_or_else(|| Error::UnresolvableZone(format!("Band index {band_idx} has no letter")))
}

/// Band index in `[-10, 9]` of a band letter
pub(crate) fn band_index(letter: char) -> Result<i32, Error> {
    BAND_LETTERS
        .find(letter.to_ascii_uppercase())
        .and_then(|i| i32::try_from(i).ok())
        .map(|i| i - 10)
        .ok_or_else(|| Error::InvalidIdentifier(format!("Band letter {letter} not in set {BAND_LETTERS}")))
}

/// Returns the zone number of a point, applying the Norway and Svalbard
/// exceptions.
///
/// # Errors
///
/// Returns [`Error::InvalidCoordinate`] if the point is outside the MGRS range.
///
/// ```
/// use mgrs_grid::zones::zone_number;
///
/// assert_eq!(zone_number(38.9, -77.0).unwrap(), 18);
/// // Seams belong to the higher zone
/// assert_eq!(zone_number(0.0, -72.0).unwrap(), 19);
/// // Norway
/// assert_eq!(zone_number(61.0, 5.0).unwrap(), 32);
/// // Svalbard
/// assert_eq!(zone_number(78.0, 20.0).unwrap(), 33);
/// ```
pub fn zone_number(lat: f64, lon: f64) -> Result<i32, Error> {
    check_range(lat, lon)?;

    #[allow(clippy::cast_possible_truncation)]
    let mut lon_int = lon.ang_normalize().floor() as i32;
    if lon_int == dms::HD {
        lon_int = -dms::HD;
    }

    let mut zone = (lon_int + 186) / 6;
    let band = to_latitude_band(lat);
    // The Norway exception
    if band == 7 && zone == 31 && lon_int >= 3 {
        zone = 32;
    }
    // The Svalbard exception
    else if band == 9 && (0..42).contains(&lon_int) {
        zone = 2 * ((lon_int + 183) / 12) + 1;
    }

    if (MIN_ZONE_NUMBER..=MAX_ZONE_NUMBER).contains(&zone) {
        Ok(zone)
    } else {
        Err(Error::UnresolvableZone(format!("Longitude {lon} gave zone {zone}")))
    }
}

/// One UTM zone by latitude band cell of the grid zone designation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridZone {
    number: i32,
    letter: char,
    bounds: Bounds,
    irregular: bool,
}

impl GridZone {
    /// Creates the grid zone for a zone number and band letter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the zone number is outside
    /// `[1, 60]`, the band letter is unknown, or the pair does not exist
    /// (32X, 34X and 36X).
    ///
    /// ```
    /// use mgrs_grid::GridZone;
    ///
    /// let zone = GridZone::new(32, 'V').unwrap();
    /// assert_eq!(zone.bounds().west(), 3.0);
    /// assert_eq!(zone.bounds().east(), 12.0);
    /// assert!(zone.is_irregular());
    ///
    /// assert!(GridZone::new(34, 'X').is_err());
    /// ```
    pub fn new(number: i32, letter: char) -> Result<GridZone, Error> {
        if !(MIN_ZONE_NUMBER..=MAX_ZONE_NUMBER).contains(&number) {
            return Err(Error::InvalidIdentifier(format!("Zone {number} not in [{MIN_ZONE_NUMBER},{MAX_ZONE_NUMBER}]")));
        }

        let letter = letter.to_ascii_uppercase();
        let band_idx = band_index(letter)?;

        let south = BAND_HEIGHT * f64::from(band_idx);
        // Band X is 12° tall
        let north = if letter == 'X' { MAX_LAT } else { south + BAND_HEIGHT };

        let west = ZONE_WIDTH * f64::from(number - 1) - f64::from(dms::HD);
        let east = west + ZONE_WIDTH;

        let (west, east) = match (letter, number) {
            ('V', 31) => (west, 3.),
            ('V', 32) => (3., east),
            ('X', 32 | 34 | 36) => {
                return Err(Error::InvalidIdentifier(format!("Grid zone {number}{letter} does not exist")));
            }
            ('X', 31) => (west, 9.),
            ('X', 33) => (9., 21.),
            ('X', 35) => (21., 33.),
            ('X', 37) => (33., 42.),
            _ => (west, east),
        };

        let irregular = !(east - west).eps_eq(ZONE_WIDTH);

        Ok(Self {
            number,
            letter,
            bounds: Bounds::new(west, south, east, north),
            irregular,
        })
    }

    /// Grid zone containing a point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinate`] if the point is outside the MGRS
    /// range, [`Error::UnresolvableZone`] if no single zone could be assigned.
    ///
    /// ```
    /// use mgrs_grid::{GridZone, LatLon};
    ///
    /// let zone = GridZone::from_latlon(&LatLon::create(61.0, 5.0).unwrap()).unwrap();
    /// assert_eq!(zone.name(), "32V");
    /// ```
    pub fn from_latlon(value: &LatLon) -> Result<GridZone, Error> {
        let number = zone_number(value.latitude, value.longitude)?;
        let letter = band_letter(value.latitude)?;

        GridZone::new(number, letter)
            .map_err(|e| Error::UnresolvableZone(format!("{value}: {e}")))
    }

    #[inline]
    pub fn number(&self) -> i32 {
        self.number
    }

    #[inline]
    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn hemisphere(&self) -> Hemisphere {
        Hemisphere::from_band_letter(self.letter)
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Whether the zone is one of the widened or narrowed Norway/Svalbard zones
    pub fn is_irregular(&self) -> bool {
        self.irregular
    }

    /// Grid zone designator, e.g. `18S`
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl Display for GridZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.number, self.letter)
    }
}

/// All grid zones whose area overlaps `bounds`, ordered by band then zone.
///
/// ```
/// use mgrs_grid::{Bounds, zones::zones};
///
/// let names: Vec<_> = zones(&Bounds::new(-80.0, 30.0, -70.0, 35.0))
///     .iter()
///     .map(|zone| zone.name())
///     .collect();
/// assert_eq!(names, ["17R", "18R", "19R", "17S", "18S", "19S"]);
/// ```
pub fn zones(bounds: &Bounds) -> Vec<GridZone> {
    let Some(bounds) = bounds.overlap(&Bounds::new(-f64::from(dms::HD), MIN_LAT, f64::from(dms::HD), MAX_LAT)) else {
        return Vec::new();
    };

    let min_band = to_latitude_band(bounds.south);
    let max_band = to_latitude_band(bounds.north);

    // Irregular zones reach into the neighbouring nominal zone
    #[allow(clippy::cast_possible_truncation)]
    let nominal = |lon: f64| ((lon + f64::from(dms::HD)) / ZONE_WIDTH).floor() as i32 + 1;
    let min_zone = (nominal(bounds.west) - 1).max(MIN_ZONE_NUMBER);
    let max_zone = (nominal(bounds.east) + 1).min(MAX_ZONE_NUMBER);

    (min_band..=max_band)
        .filter_map(|band_idx| band_char(band_idx).ok())
        .flat_map(|letter| {
            (min_zone..=max_zone).filter_map(move |number| GridZone::new(number, letter).ok())
        })
        .filter(|zone| zone.bounds.intersects(&bounds))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_seams_belong_to_northern_band() {
        for (i, letter) in BAND_LETTERS.chars().enumerate() {
            let lat = -80.0 + 8.0 * i as f64;
            assert_eq!(band_letter(lat).unwrap(), letter, "lat {lat}");
        }
    }

    #[test]
    fn band_indices_round_trip() {
        for letter in BAND_LETTERS.chars() {
            let idx = band_index(letter).unwrap();
            assert_eq!(band_char(idx).unwrap(), letter);
        }
        assert!(band_index('I').is_err());
        assert!(band_index('O').is_err());
    }

    #[test]
    fn antimeridian_wraps_to_zone_one() {
        assert_eq!(zone_number(10.0, 180.0).unwrap(), 1);
        assert_eq!(zone_number(10.0, -180.0).unwrap(), 1);
        assert_eq!(zone_number(10.0, 179.999).unwrap(), 60);
    }

    #[test]
    fn every_zone_has_zone_width_bounds_except_exceptions() {
        for letter in BAND_LETTERS.chars() {
            for number in MIN_ZONE_NUMBER..=MAX_ZONE_NUMBER {
                match GridZone::new(number, letter) {
                    Ok(zone) => {
                        let expected = matches!((number, letter), (31 | 32, 'V') | (31 | 33 | 35 | 37, 'X'));
                        assert_eq!(zone.is_irregular(), expected, "{zone}");
                    }
                    Err(_) => assert!(matches!((number, letter), (32 | 34 | 36, 'X'))),
                }
            }
        }
    }

    #[test]
    fn svalbard_zones_tile_without_gaps() {
        let svalbard: Vec<_> = [31, 33, 35, 37]
            .iter()
            .map(|n| GridZone::new(*n, 'X').unwrap())
            .collect();
        for pair in svalbard.windows(2) {
            assert!(pair[0].bounds().east().eps_eq(pair[1].bounds().west()));
        }
    }

    #[test]
    fn zones_include_irregular_neighbours() {
        let names: Vec<_> = zones(&Bounds::new(9.5, 79.0, 10.5, 80.0))
            .iter()
            .map(GridZone::name)
            .collect();
        assert_eq!(names, ["33X"]);

        let names: Vec<_> = zones(&Bounds::new(2.0, 60.0, 4.0, 61.0))
            .iter()
            .map(GridZone::name)
            .collect();
        assert_eq!(names, ["31V", "32V"]);
    }
}
