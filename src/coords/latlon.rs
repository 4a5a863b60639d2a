use std::fmt::Display;

use crate::{
    constants::{MAX_LAT, MAX_LON, MIN_LAT, MIN_LON},
    mgrs::Mgrs,
    utm::Utm,
    Error,
};

/// Mean radius of Earth in meters
///
/// <https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius>
const EARTH_MEAN_RADIUS_M: f64 = 6371.0088 * 1000.0;

/// Representation of a WGS84 Latitude/Longitude point inside the area
/// covered by MGRS. Can be converted to/from [`Utm`] and [`Mgrs`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub(crate) latitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "lon"))]
    pub(crate) longitude: f64,
}

impl LatLon {
    /// Internal-only constructor that doesn't check the bounds of lat/lon
    pub(crate) fn new(lat: f64, lon: f64) -> LatLon {
        Self {
            latitude: lat,
            longitude: lon,
        }
    }

    /// Tries to create a latitude/longitude point from a lat/lon pair. First checks if the
    /// values are valid for MGRS:
    /// * Latitude must be in range [-80,84]
    /// * Longitude must be in range [-180,180]
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinate`] if either latitude or longitude are invalid.
    ///
    /// # Usage
    ///
    /// ```
    /// use mgrs_grid::LatLon;
    ///
    /// let coord = LatLon::create(40.748333, -73.985278);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.latitude(), 40.748333);
    /// assert_eq!(coord.longitude(), -73.985278);
    ///
    /// let polar = LatLon::create(85.0, 0.0);
    /// assert!(polar.is_err());
    ///
    /// let invalid_coord_lon = LatLon::create(0.0, -200.0);
    /// assert!(invalid_coord_lon.is_err());
    /// ```
    pub fn create(lat: f64, lon: f64) -> Result<LatLon, Error> {
        check_range(lat, lon)?;
        Ok(LatLon::new(lat, lon))
    }

    /// Returns the latitude value.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude value.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns whether the current point is in the northern hemisphere.
    /// The equator counts as north.
    ///
    /// # Example
    ///
    /// ```
    /// use mgrs_grid::LatLon;
    ///
    /// let coord = LatLon::create(40.748333, -73.985278).unwrap();
    /// assert!(coord.is_north());
    ///
    /// let coord = LatLon::create(-40.748333, -73.985278).unwrap();
    /// assert!(!coord.is_north());
    /// ```
    pub fn is_north(&self) -> bool {
        self.latitude >= 0.0
    }

    /// Returns the distance in meters between two [`LatLon`] points
    /// using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
    /// Uses the [mean radius of the Earth](https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius)
    /// in the calculation: `6371.0088`
    pub fn haversine(&self, other: &LatLon) -> f64 {
        let lat1_r = self.latitude.to_radians();
        let lat2_r = other.latitude.to_radians();

        2.0 * EARTH_MEAN_RADIUS_M * (
            ((other.latitude - self.latitude).to_radians() / 2.0).sin().powi(2) +
            lat1_r.cos() * lat2_r.cos() *
            ((other.longitude - self.longitude).to_radians() / 2.0).sin().powi(2)
        ).sqrt().asin()
    }

    /// Converts from [`Utm`] to [`LatLon`]
    ///
    /// # Usage
    ///
    /// ```
    /// use mgrs_grid::{LatLon, Utm, Hemisphere};
    ///
    /// let coord = LatLon::create(40.748333, -73.985278).unwrap();
    /// let coord_utm = Utm::create(18, Hemisphere::North, 585664.121, 4511315.422).unwrap();
    ///
    /// let converted = LatLon::from_utm(&coord_utm);
    ///
    /// // Check if the converted coordinate is accurate to 6 decimals (same as reference)
    /// assert!((converted.latitude() - coord.latitude()).abs() < 1e-6);
    /// assert!((converted.longitude() - coord.longitude()).abs() < 1e-6);
    /// ```
    pub fn from_utm(value: &Utm) -> LatLon {
        value.to_latlon()
    }

    /// Converts from [`LatLon`] to [`Utm`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinate`] if the point is outside the MGRS range.
    ///
    /// # Usage
    ///
    /// ```
    /// use mgrs_grid::LatLon;
    ///
    /// let coord = LatLon::create(40.748333, -73.985278).unwrap();
    /// let converted = coord.to_utm().unwrap();
    ///
    /// assert_eq!(converted.zone(), 18);
    /// assert!(converted.is_north());
    /// // Check if the converted coordinate is accurate to 3 decimals (same as reference)
    /// assert!((converted.easting() - 585664.121).abs() < 1e-3);
    /// assert!((converted.northing() - 4511315.422).abs() < 1e-3);
    /// ```
    pub fn to_utm(&self) -> Result<Utm, Error> {
        Utm::from_latlon(self)
    }

    /// Converts from [`Mgrs`] to [`LatLon`], taking the southwest corner
    /// of the identified square.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the square is not inside its zone/band.
    pub fn from_mgrs(value: &Mgrs) -> Result<LatLon, Error> {
        value.to_latlon()
    }

    /// Converts from [`LatLon`] to [`Mgrs`] at `precision` digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinate`] if the point is outside the MGRS
    /// range, or [`Error::InvalidIdentifier`] if the precision is not in `[0, 5]`.
    ///
    /// # Usage
    ///
    /// ```
    /// use mgrs_grid::LatLon;
    ///
    /// let coord = LatLon::create(40.748333, -73.985278).unwrap();
    ///
    /// let converted = coord.to_mgrs(5).unwrap();
    ///
    /// assert_eq!(converted.to_string(), "18TWL8566411315");
    /// ```
    pub fn to_mgrs(&self, precision: u8) -> Result<Mgrs, Error> {
        Mgrs::from_latlon(self, precision)
    }
}

pub(crate) fn check_range(lat: f64, lon: f64) -> Result<(), Error> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        Err(Error::InvalidCoordinate(format!("Latitude {lat} outside of MGRS range [{MIN_LAT}, {MAX_LAT}].")))
    } else if !(MIN_LON..=MAX_LON).contains(&lon) {
        Err(Error::InvalidCoordinate(format!("Longitude {lon} outside of valid range [{MIN_LON}, {MAX_LON}].")))
    } else {
        Ok(())
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let lat = buf.format(self.latitude);
        let mut buf = ryu::Buffer::new();
        let lon = buf.format(self.longitude);
        write!(
            f,
            "{lat} {lon}",
        )
    }
}
