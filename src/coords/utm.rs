use std::fmt::Display;

use crate::{
    constants::{FALSE_EASTING, FALSE_NORTHING},
    latlon::{check_range, LatLon},
    mgrs::{self, Mgrs},
    projections::transverse_mercator::TransverseMercator,
    zones::{self, BAND_LETTER_NORTH},
    Error, ThisOrThat,
};

// Index 0 is the southern hemisphere, 1 the northern
const MIN_EASTING: [i32; 2] = [
    mgrs::MINUTMCOL * mgrs::TILE,
    mgrs::MINUTMCOL * mgrs::TILE,
];

const MAX_EASTING: [i32; 2] = [
    mgrs::MAXUTMCOL * mgrs::TILE,
    mgrs::MAXUTMCOL * mgrs::TILE,
];

const MIN_NORTHING: [i32; 2] = [
    mgrs::MINUTM_S_ROW * mgrs::TILE,
    mgrs::MINUTM_N_ROW * mgrs::TILE,
];

const MAX_NORTHING: [i32; 2] = [
    mgrs::MAXUTM_S_ROW * mgrs::TILE,
    mgrs::MAXUTM_N_ROW * mgrs::TILE,
];

/// Hemisphere of a UTM coordinate. The equator belongs to the north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Hemisphere of a latitude band letter
    ///
    /// ```
    /// use mgrs_grid::Hemisphere;
    ///
    /// assert_eq!(Hemisphere::from_band_letter('M'), Hemisphere::South);
    /// assert_eq!(Hemisphere::from_band_letter('N'), Hemisphere::North);
    /// ```
    pub fn from_band_letter(letter: char) -> Hemisphere {
        (letter.to_ascii_uppercase() < BAND_LETTER_NORTH).ternary(Hemisphere::South, Hemisphere::North)
    }

    pub fn from_latitude(lat: f64) -> Hemisphere {
        (lat >= 0.0).ternary(Hemisphere::North, Hemisphere::South)
    }

    pub fn is_north(self) -> bool {
        self == Hemisphere::North
    }

    fn index(self) -> usize {
        self.is_north().ternary(1, 0)
    }
}

impl Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.is_north().ternary("N", "S"))
    }
}

/// Representation of a WGS84
/// [UTM](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system)
/// point. Southern hemisphere northings include the 10,000,000m false northing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Utm {
    pub(crate) zone: i32,
    pub(crate) hemisphere: Hemisphere,
    pub(crate) easting: f64,
    pub(crate) northing: f64,
}

impl Utm {
    /// Internal-only constructor that doesn't check the coordinate
    pub(crate) fn new(zone: i32, hemisphere: Hemisphere, easting: f64, northing: f64) -> Utm {
        Self {
            zone,
            hemisphere,
            easting,
            northing,
        }
    }

    /// Tries to create a UTM point from its constituent parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinate`] if the zone is outside the range
    /// `[1, 60]` or the easting/northing are outside the range UTM uses for
    /// the hemisphere.
    ///
    /// # Usage
    ///
    /// ```
    /// use mgrs_grid::{Hemisphere, Utm};
    ///
    /// let coord = Utm::create(18, Hemisphere::North, 585664.121, 4511315.422);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.zone(), 18);
    /// assert_eq!(coord.is_north(), true);
    /// assert!((coord.easting() - 585664.121).abs() < 1e-3);
    /// assert!((coord.northing() - 4511315.422).abs() < 1e-3);
    ///
    /// let invalid_coord_zone_neg = Utm::create(-10, Hemisphere::North, 585664.121, 4511315.422);
    /// assert!(invalid_coord_zone_neg.is_err());
    ///
    /// let invalid_coord_zone_too_big = Utm::create(70, Hemisphere::North, 585664.121, 4511315.422);
    /// assert!(invalid_coord_zone_too_big.is_err());
    ///
    /// let invalid_easting = Utm::create(18, Hemisphere::North, 1_200_000.0, 4511315.422);
    /// assert!(invalid_easting.is_err());
    /// ```
    pub fn create(zone: i32, hemisphere: Hemisphere, easting: f64, northing: f64) -> Result<Utm, Error> {
        // Make sure zone is a valid value
        if !(zones::MIN_ZONE_NUMBER..=zones::MAX_ZONE_NUMBER).contains(&zone) {
            return Err(Error::InvalidCoordinate(format!("Zone {zone} not in range [1, 60]")));
        }

        check_coords(hemisphere, easting, northing)?;

        Ok(Utm::new(zone, hemisphere, easting, northing))
    }

    /// Returns the UTM zone.
    pub fn zone(&self) -> i32 {
        self.zone
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Returns whether the coordinate is in the northern hemisphere.
    pub fn is_north(&self) -> bool {
        self.hemisphere.is_north()
    }

    /// Returns the UTM easting.
    pub fn easting(&self) -> f64 {
        self.easting
    }

    /// Returns the UTM northing.
    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Converts from [`LatLon`] to [`Utm`] in the zone the point belongs to,
    /// including the Norway and Svalbard exceptions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinate`] if the point is outside the MGRS range.
    ///
    /// # Usage
    ///
    /// ```
    /// use mgrs_grid::{LatLon, Utm};
    ///
    /// let coord = LatLon::create(61.0, 5.0).unwrap();
    /// let converted = Utm::from_latlon(&coord).unwrap();
    ///
    /// assert_eq!(converted.zone(), 32);
    /// assert!((converted.easting() - 283749.823).abs() < 1e-3);
    /// assert!((converted.northing() - 6769393.416).abs() < 1e-3);
    /// ```
    pub fn from_latlon(value: &LatLon) -> Result<Utm, Error> {
        check_range(value.latitude, value.longitude)?;

        let zone = zones::zone_number(value.latitude, value.longitude)?;
        let hemisphere = Hemisphere::from_latitude(value.latitude);

        Ok(Utm::in_zone(value, zone, hemisphere))
    }

    /// Projects a point into the given zone and hemisphere, whether or not
    /// the point lies inside that zone.
    ///
    /// ```
    /// use mgrs_grid::{Hemisphere, LatLon, Utm};
    ///
    /// // A point in zone 19 expressed in zone 18
    /// let coord = LatLon::create(40.0, -71.0).unwrap();
    /// let converted = Utm::in_zone(&coord, 18, Hemisphere::North);
    ///
    /// assert_eq!(converted.zone(), 18);
    /// assert!(converted.easting() > 800_000.0);
    /// ```
    pub fn in_zone(value: &LatLon, zone: i32, hemisphere: Hemisphere) -> Utm {
        let (mut x, mut y) = TransverseMercator::utm()
            .from_latlon(central_meridian(zone), value.latitude, value.longitude);

        x += FALSE_EASTING;
        if !hemisphere.is_north() {
            y += FALSE_NORTHING;
        }

        Utm {
            zone,
            hemisphere,
            easting: x,
            northing: y,
        }
    }

    /// Converts from [`Utm`] to [`LatLon`]
    ///
    /// # Usage
    ///
    /// ```
    /// use mgrs_grid::{Hemisphere, LatLon, Utm};
    ///
    /// let coord_utm = Utm::create(18, Hemisphere::North, 585664.121, 4511315.422).unwrap();
    ///
    /// let converted = coord_utm.to_latlon();
    ///
    /// // Check if the converted coordinate is accurate to 6 decimals (same as reference)
    /// assert!((converted.latitude() - 40.748333).abs() < 1e-6);
    /// assert!((converted.longitude() - -73.985278).abs() < 1e-6);
    /// ```
    pub fn to_latlon(&self) -> LatLon {
        let x = self.easting - FALSE_EASTING;
        let y = self.northing - self.is_north().ternary(0., FALSE_NORTHING);

        TransverseMercator::utm().to_latlon(central_meridian(self.zone), x, y)
    }

    /// Converts from [`Mgrs`] to [`Utm`], taking the southwest corner of the
    /// identified square.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the square is not inside its zone/band.
    pub fn from_mgrs(value: &Mgrs) -> Result<Utm, Error> {
        value.to_utm()
    }

    /// Converts from [`Utm`] to [`Mgrs`] at `precision` digits
    ///
    /// # Errors
    ///
    /// See [`Mgrs::from_utm`].
    ///
    /// # Usage
    ///
    /// ```
    /// use mgrs_grid::{Hemisphere, Utm};
    ///
    /// let coord_utm = Utm::create(18, Hemisphere::North, 585664.15, 4511315.45).unwrap();
    ///
    /// let converted = coord_utm.to_mgrs(5).unwrap();
    ///
    /// assert_eq!(converted.to_string(), "18TWL8566411315");
    /// ```
    pub fn to_mgrs(&self, precision: u8) -> Result<Mgrs, Error> {
        Mgrs::from_utm(self, precision)
    }
}

pub(crate) fn central_meridian(zone: i32) -> f64 {
    6.0 * f64::from(zone) - 183.
}

pub(crate) fn check_coords(hemisphere: Hemisphere, x: f64, y: f64) -> Result<(), Error> {
    let slop = f64::from(mgrs::TILE);

    let ind = hemisphere.index();
    // Northings never leave the hemisphere, eastings may reach one square
    // outside the MGRS columns
    let min_northing = f64::from(MIN_NORTHING[ind]) - hemisphere.is_north().ternary(0., slop);
    let max_northing = f64::from(MAX_NORTHING[ind]) + hemisphere.is_north().ternary(slop, 0.);

    if x < f64::from(MIN_EASTING[ind]) - slop || x > f64::from(MAX_EASTING[ind]) + slop {
        return Err(Error::InvalidCoordinate(
            format!(
                "Easting {:.2}km not in UTM range for {hemisphere} hemisphere [{:.2}km, {:.2}km]",
                x / 1000.0,
                (f64::from(MIN_EASTING[ind]) - slop) / 1000.0,
                (f64::from(MAX_EASTING[ind]) + slop) / 1000.0,
            )
        ));
    }

    if y < min_northing || y > max_northing {
        return Err(Error::InvalidCoordinate(
            format!(
                "Northing {:.2}km not in UTM range for {hemisphere} hemisphere [{:.2}km, {:.2}km]",
                y / 1000.0,
                min_northing / 1000.0,
                max_northing / 1000.0,
            )
        ));
    }

    Ok(())
}

impl Display for Utm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {} {}",
            self.zone,
            self.hemisphere,
            self.easting,
            self.northing
        )
    }
}
