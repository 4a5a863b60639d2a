use std::{fmt::Display, str::FromStr};

use num::Integer;

use crate::{
    bounds::Bounds,
    grid::GridType,
    latlon::LatLon,
    utility::{dms, GeoMath},
    utm::{self, Hemisphere, Utm},
    zones::{self, GridZone, BAND_LETTERS},
    Error, ThisOrThat,
};

const UTMCOLS: &[&str] = &["ABCDEFGH", "JKLMNPQR", "STUVWXYZ"];
const UTMROW: &str = "ABCDEFGHJKLMNPQRSTUV";

pub const TILE: i32 = 100_000;
pub const MINUTMCOL: i32 = 1;
pub const MAXUTMCOL: i32 = 9;
pub const MINUTM_S_ROW: i32 = 10;
pub const MAXUTM_S_ROW: i32 = 100;
pub const MINUTM_N_ROW: i32 = 0;
pub const MAXUTM_N_ROW: i32 = 95;

pub const BASE: i32 = 10;
pub const UTM_ROW_PERIOD: i32 = 20;
pub const UTM_EVEN_ROW_SHIFT: i32 = 5;
/// Most easting/northing digits an identifier carries (1m resolution)
pub const MAX_PRECISION: u8 = 5;

/// A Military Grid Reference System identifier: grid zone, 100km square and
/// easting/northing digits of equal length.
///
/// `Display` prints the compact form (`18SUJ2348706483`), the alternate
/// form `{:#}` separates the parts (`18S UJ 23487 06483`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mgrs {
    zone: i32,
    band: char,
    column: char,
    row: char,
    easting: u32,
    northing: u32,
    precision: u8,
}

impl Mgrs {
    /// Grid zone number
    pub fn zone(&self) -> i32 {
        self.zone
    }

    /// Latitude band letter
    pub fn band(&self) -> char {
        self.band
    }

    pub fn hemisphere(&self) -> Hemisphere {
        Hemisphere::from_band_letter(self.band)
    }

    /// Number of easting (and northing) digits, `0` meaning the 100km square only
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Grid zone designator, e.g. `18S`
    pub fn grid_zone(&self) -> String {
        format!("{}{}", self.zone, self.band)
    }

    /// Two letter 100km square identifier, e.g. `UJ`
    pub fn square_id(&self) -> String {
        format!("{}{}", self.column, self.row)
    }

    /// Easting digits, zero padded to the precision
    pub fn easting_digits(&self) -> String {
        digits(self.easting, self.precision)
    }

    /// Northing digits, zero padded to the precision
    pub fn northing_digits(&self) -> String {
        digits(self.northing, self.precision)
    }

    /// Easting digits followed by northing digits truncated to the grid
    /// type's digit count (never more than the identifier carries).
    ///
    /// ```
    /// use mgrs_grid::{GridType, Mgrs};
    ///
    /// let mgrs = Mgrs::parse_str("18SUJ2348706483").unwrap();
    /// assert_eq!(mgrs.easting_and_northing(GridType::Kilometer), "2306");
    /// assert_eq!(mgrs.easting_and_northing(GridType::HundredKilometer), "");
    /// ```
    pub fn easting_and_northing(&self, grid_type: GridType) -> String {
        let precision = grid_type.digits().min(self.precision);
        let scale = pow10(self.precision - precision);

        format!(
            "{}{}",
            digits(self.easting / scale, precision),
            digits(self.northing / scale, precision),
        )
    }

    /// Parses an MGRS string. See the [`FromStr`] implementation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the string is malformed.
    pub fn parse_str(mgrs_str: &str) -> Result<Mgrs, Error> {
        Self::from_str(mgrs_str)
    }

    /// Encodes a UTM coordinate known to lie in latitude band `band` at
    /// `precision` digits. Digits are truncated, never rounded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the precision is greater than 5 or
    /// the band letter is unknown, [`Error::InvalidCoordinate`] if the
    /// coordinate is outside the MGRS limits or does not lie in the band.
    ///
    /// ```
    /// use mgrs_grid::{Hemisphere, Mgrs, Utm};
    ///
    /// let utm = Utm::create(18, Hemisphere::North, 323487.6, 4306483.03).unwrap();
    ///
    /// let mgrs = Mgrs::encode(&utm, 'S', 5).unwrap();
    /// assert_eq!(format!("{mgrs:#}"), "18S UJ 23487 06483");
    ///
    /// let mgrs = Mgrs::encode(&utm, 'S', 2).unwrap();
    /// assert_eq!(mgrs.to_string(), "18SUJ2306");
    ///
    /// // Northing is not in band T
    /// assert!(Mgrs::encode(&utm, 'T', 5).is_err());
    /// ```
    pub fn encode(utm: &Utm, band: char, precision: u8) -> Result<Mgrs, Error> {
        if precision > MAX_PRECISION {
            return Err(Error::InvalidIdentifier(format!("Precision {precision} not in [0, {MAX_PRECISION}]")));
        }

        let band = band.to_ascii_uppercase();
        let band_idx = zones::band_index(band)?;
        if Hemisphere::from_band_letter(band) != utm.hemisphere {
            return Err(Error::InvalidCoordinate(format!("Band {band} is not in the {} hemisphere", utm.hemisphere)));
        }

        let (xh, yh) = check_coords(utm.hemisphere, utm.easting, utm.northing)?;

        let col_idx = xh - MINUTMCOL;
        let row_idx = utm_row(band_idx, col_idx, yh % UTM_ROW_PERIOD);
        if row_idx != yh - utm.is_north().ternary(MINUTM_N_ROW, MAXUTM_S_ROW) {
            return Err(Error::InvalidCoordinate(format!("{utm} is not inside latitude band {band}")));
        }

        let (column, row) = square_letters(utm.zone, xh, yh)?;

        // Truncate to whole meters inside the square, then to the precision
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let within = |value: f64, hundreds: i32| {
            (value.floor() as i64 - i64::from(hundreds) * i64::from(TILE)).max(0) as u32
        };
        let scale = pow10(MAX_PRECISION - precision);

        Ok(Mgrs {
            zone: utm.zone,
            band,
            column,
            row,
            easting: within(utm.easting, xh) / scale,
            northing: within(utm.northing, yh) / scale,
            precision,
        })
    }

    /// Encodes a UTM coordinate, resolving its latitude band from the
    /// coordinate itself.
    ///
    /// # Errors
    ///
    /// See [`Mgrs::encode`].
    pub fn from_utm(value: &Utm, precision: u8) -> Result<Mgrs, Error> {
        let band = zones::band_letter(value.to_latlon().latitude)?;
        Mgrs::encode(value, band, precision)
    }

    /// Encodes a point at `precision` digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinate`] if the point is outside the MGRS
    /// range, [`Error::InvalidIdentifier`] if the precision is greater than 5.
    ///
    /// ```
    /// use mgrs_grid::{LatLon, Mgrs};
    ///
    /// let coord = LatLon::create(38.88950422, -77.03519133).unwrap();
    /// let mgrs = Mgrs::from_latlon(&coord, 5).unwrap();
    ///
    /// assert_eq!(mgrs.to_string(), "18SUJ2348706483");
    /// ```
    pub fn from_latlon(value: &LatLon, precision: u8) -> Result<Mgrs, Error> {
        let utm = Utm::from_latlon(value)?;
        let band = zones::band_letter(value.latitude)?;
        Mgrs::encode(&utm, band, precision)
    }

    /// Decodes the identifier to the UTM coordinate of the southwest corner
    /// of the cell it names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the square letters are not valid
    /// for the zone or the square is not inside the zone/band.
    ///
    /// ```
    /// use mgrs_grid::Mgrs;
    ///
    /// let utm = Mgrs::parse_str("18S UJ 23487 06483").unwrap().to_utm().unwrap();
    /// assert_eq!(utm.zone(), 18);
    /// assert_eq!(utm.easting(), 323487.0);
    /// assert_eq!(utm.northing(), 4306483.0);
    /// ```
    pub fn to_utm(&self) -> Result<Utm, Error> {
        let zonem = self.zone - 1;
        let band_idx = zones::band_index(self.band)?;
        let hemisphere = self.hemisphere();

        let cols = UTMCOLS[usize::try_from(zonem.rem_euclid(3)).unwrap_or_default()];
        let col_idx = letter_index(cols, self.column)
            .ok_or_else(|| {
                Error::InvalidIdentifier(format!("Column letter {} not in zone {} set {cols}", self.column, self.zone))
            })?;

        let mut row_idx = letter_index(UTMROW, self.row)
            .ok_or_else(|| Error::InvalidIdentifier(format!("Row letter {} not in UTM set {UTMROW}", self.row)))?;

        if zonem.is_odd() {
            row_idx = (row_idx + UTM_ROW_PERIOD - UTM_EVEN_ROW_SHIFT) % UTM_ROW_PERIOD;
        }

        let row_idx = utm_row(band_idx, col_idx, row_idx);
        if row_idx == MAXUTM_S_ROW {
            return Err(Error::InvalidIdentifier(format!(
                "Block {}{} not in zone/band {}{}",
                self.column, self.row, self.zone, self.band
            )));
        }

        let row_idx = hemisphere.is_north().ternary(row_idx, row_idx + MAXUTM_S_ROW);
        let col_idx = col_idx + MINUTMCOL;

        let unit = f64::from(pow10(MAX_PRECISION - self.precision));
        let easting = f64::from(col_idx * TILE) + f64::from(self.easting) * unit;
        let northing = f64::from(row_idx * TILE) + f64::from(self.northing) * unit;

        let zone = GridZone::new(self.zone, self.band)?;
        if !cell_bounds(&zone, hemisphere, easting, northing, unit).intersects(zone.bounds()) {
            return Err(Error::InvalidIdentifier(format!("{self} lies outside grid zone {}", zone.name())));
        }

        Ok(Utm::new(self.zone, hemisphere, easting, northing))
    }

    /// Decodes the identifier to the southwest corner of the cell it names.
    ///
    /// # Errors
    ///
    /// See [`Mgrs::to_utm`].
    pub fn to_latlon(&self) -> Result<LatLon, Error> {
        self.to_utm().map(|utm| utm.to_latlon())
    }
}

/// Geographic bounds around the corners of a cell, with longitudes taken
/// continuously from the zone's central meridian
fn cell_bounds(zone: &GridZone, hemisphere: Hemisphere, easting: f64, northing: f64, unit: f64) -> Bounds {
    let lon0 = utm::central_meridian(zone.number());

    let corners = [(0.0, 0.0), (unit, 0.0), (unit, unit), (0.0, unit)].map(|(de, dn)| {
        let corner = Utm::new(zone.number(), hemisphere, easting + de, northing + dn).to_latlon();
        (lon0 + lon0.ang_diff(corner.longitude), corner.latitude)
    });

    let (lon, lat) = corners[0];
    corners[1..].iter().fold(Bounds::new(lon, lat, lon, lat), |bounds, &(lon, lat)| {
        Bounds::new(bounds.west.min(lon), bounds.south.min(lat), bounds.east.max(lon), bounds.north.max(lat))
    })
}

fn pow10(exp: u8) -> u32 {
    10_u32.pow(u32::from(exp))
}

fn digits(value: u32, precision: u8) -> String {
    if precision == 0 {
        return String::new();
    }

    format!("{value:0width$}", width = usize::from(precision))
}

fn letter_index(set: &str, letter: char) -> Option<i32> {
    set.find(letter.to_ascii_uppercase()).and_then(|i| i32::try_from(i).ok())
}

/// Column and row letters of the 100km square `xh`, `yh` (in units of
/// 100km) of a zone.
fn square_letters(zone: i32, xh: i32, yh: i32) -> Result<(char, char), Error> {
    let zonem = zone - 1;
    let col_idx = xh - MINUTMCOL;
    let row_idx = (yh + zonem.is_odd().ternary(UTM_EVEN_ROW_SHIFT, 0)).rem_euclid(UTM_ROW_PERIOD);

    let column = usize::try_from(zonem.rem_euclid(3))
        .ok()
        .zip(usize::try_from(col_idx).ok())
        .and_then(|(set, i)| UTMCOLS[set].chars().nth(i))
        .ok_or_else(|| Error::InvalidCoordinate(format!("Easting column {xh} has no letter in zone {zone}")))?;
    let row = usize::try_from(row_idx)
        .ok()
        .and_then(|i| UTMROW.chars().nth(i))
        .ok_or_else(|| Error::InvalidCoordinate(format!("Northing row {yh} has no letter")))?;

    Ok((column, row))
}

/// Two letter 100km square identifier of a UTM easting/northing in a zone.
///
/// # Errors
///
/// Returns [`Error::InvalidCoordinate`] if the easting is outside the MGRS columns.
///
/// ```
/// use mgrs_grid::mgrs::square_id;
///
/// assert_eq!(square_id(18, 323_487.0, 4_306_483.0).unwrap(), "UJ");
/// assert!(square_id(18, 50_000.0, 4_306_483.0).is_err());
/// ```
pub fn square_id(zone: i32, easting: f64, northing: f64) -> Result<String, Error> {
    #[allow(clippy::cast_possible_truncation)]
    let (xh, yh) = (
        (easting / f64::from(TILE)).floor() as i32,
        (northing / f64::from(TILE)).floor() as i32,
    );
    if !(MINUTMCOL..MAXUTMCOL).contains(&xh) {
        return Err(Error::InvalidCoordinate(format!("Easting {easting} outside of the MGRS columns")));
    }

    let (column, row) = square_letters(zone, xh, yh)?;
    Ok(format!("{column}{row}"))
}

/// Easting and northing digits of a position at a digit count, used as
/// grid labels (e.g. `2306` for 1km).
pub(crate) fn grid_digits(easting: f64, northing: f64, precision: u8) -> String {
    let scale = f64::from(pow10(MAX_PRECISION - precision));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let within = |value: f64| ((value.rem_euclid(f64::from(TILE))) / scale).floor() as u32;

    format!("{}{}", digits(within(easting), precision), digits(within(northing), precision))
}

fn utm_row(band_idx: i32, col_idx: i32, row_idx: i32) -> i32 {
    let c = 100.0 * (8.0 * f64::from(band_idx) + 4.0) / f64::from(dms::QD);
    let northp = band_idx >= 0;
    // These are safe bounds on the rows
    //  band_idx  minrow maxrow
    //   -10      -90    -81
    //    -9      -80    -72
    //    -8      -71    -63
    //    -7      -63    -54
    //    -6      -54    -45
    //    -5      -45    -36
    //    -4      -36    -27
    //    -3      -27    -18
    //    -2      -18     -9
    //    -1       -9     -1
    //     0        0      8
    //     1        8     17
    //     2       17     26
    //     3       26     35
    //     4       35     44
    //     5       44     53
    //     6       53     62
    //     7       62     70
    //     8       71     79
    //     9       80     94

    #[allow(clippy::cast_possible_truncation)]
    let min_row = if band_idx > -10 {
        (c - 4.3 - 0.1 * f64::from(u8::from(northp))).floor() as i32
    } else {
        -90
    };

    #[allow(clippy::cast_possible_truncation)]
    let max_row = if band_idx < 9 {
        (c + 4.4 - 0.1 * f64::from(u8::from(northp))).floor() as i32
    } else {
        94
    };

    let base_row = (min_row + max_row) / 2 - UTM_ROW_PERIOD / 2;
    // Offset row_idx by the multiple of UTM_ROW_PERIOD which brings it as close as
    // possible to the center of the latitude band, (min_row + max_row) / 2.
    // (Add MAXUTM_S_ROW = 5 * UTM_ROW_PERIOD to ensure operand is positive.)
    let mut row_idx = (row_idx - base_row + MAXUTM_S_ROW) % UTM_ROW_PERIOD + base_row;

    if !(min_row..=max_row).contains(&row_idx) {
        // Outside the safe bounds, so need to check...
        // Northing = 71e5 and 80e5 intersect band boundaries
        //   y = 71e5 in scol = 2 (x = [3e5,4e5] and x = [6e5,7e5])
        //   y = 80e5 in scol = 1 (x = [2e5,3e5] and x = [7e5,8e5])
        // The following deals with these special cases.

        // Fold [-10,-1] -> [9,0]
        let safe_band = (band_idx >= 0).ternary(band_idx, -band_idx - 1);
        // Fold [-90,-1] -> [89,0]
        let safe_row = (row_idx >= 0).ternary(row_idx, -row_idx - 1);
        // Fold [4,7] -> [3,0]
        let safe_col = (col_idx < 4).ternary(col_idx, -col_idx + 7);

        if !(
            (safe_row == 70 && safe_band == 8 && safe_col >= 2) ||
            (safe_row == 71 && safe_band == 7 && safe_col <= 2) ||
            (safe_row == 79 && safe_band == 9 && safe_col >= 1) ||
            (safe_row == 80 && safe_band == 8 && safe_col <= 1)
        ) {
            row_idx = MAXUTM_S_ROW;
        }
    }

    row_idx
}

/// Checks the coordinate is inside the MGRS columns and rows of its
/// hemisphere, returning the 100km column and row indices.
fn check_coords(hemisphere: Hemisphere, x: f64, y: f64) -> Result<(i32, i32), Error> {
    #[allow(clippy::cast_possible_truncation)]
    let x_int = (x / f64::from(TILE)).floor() as i32;
    #[allow(clippy::cast_possible_truncation)]
    let y_int = (y / f64::from(TILE)).floor() as i32;

    let (min_row, max_row) = hemisphere.is_north().ternary((MINUTM_N_ROW, MAXUTM_N_ROW), (MINUTM_S_ROW, MAXUTM_S_ROW));

    if !(MINUTMCOL..MAXUTMCOL).contains(&x_int) {
        return Err(Error::InvalidCoordinate(
            format!(
                "Easting {:.2}km not in MGRS/UTM range for {hemisphere} hemisphere [{:.2}km, {:.2}km]",
                x / 1000.0,
                MINUTMCOL * (TILE / 1000),
                MAXUTMCOL * (TILE / 1000),
            )
        ));
    }

    if !(min_row..max_row).contains(&y_int) {
        return Err(Error::InvalidCoordinate(
            format!(
                "Northing {:.2}km not in MGRS/UTM range for {hemisphere} hemisphere [{:.2}km, {:.2}km]",
                y / 1000.0,
                min_row * (TILE / 1000),
                max_row * (TILE / 1000),
            )
        ));
    }

    Ok((x_int, y_int))
}

impl FromStr for Mgrs {
    type Err = Error;

    /// Parses `ZZB SQ EEEEE NNNNN`, ignoring whitespace and case. The zone has
    /// one or two digits and the easting/northing digits are split evenly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let chars: Vec<char> = value.chars().collect();
        let len = chars.len();
        let mut p = 0;

        let mut zone = 0_i32;
        while p < len {
            if let Some(i) = chars[p].to_digit(10) {
                zone = BASE * zone + i32::try_from(i).unwrap_or_default();
                p += 1;
            } else {
                break;
            }
        }

        if p == 0 {
            return Err(Error::InvalidIdentifier(format!("Missing zone number in {value}")));
        }

        if p > 2 {
            return Err(Error::InvalidIdentifier(format!("More than 2 digits at start of MGRS {value}")));
        }

        if len - p < 1 {
            return Err(Error::InvalidIdentifier(format!("Too short: {value}")));
        }

        let band = chars[p];
        if !BAND_LETTERS.contains(band) {
            return Err(Error::InvalidIdentifier(format!("Band letter {band} not in set {BAND_LETTERS}")));
        }
        // Rejects zones outside [1, 60] and the missing Svalbard zones
        GridZone::new(zone, band)?;
        p += 1;

        if len - p < 2 {
            return Err(Error::InvalidIdentifier(format!("Missing 100km square letters in {value}")));
        }

        let column = chars[p];
        let row = chars[p + 1];
        p += 2;

        let rest = &chars[p..];
        let rest_str: String = rest.iter().collect();
        if let Some(c) = rest.iter().find(|c| !c.is_ascii_digit()) {
            return Err(Error::InvalidIdentifier(format!("Encountered a non-digit {c} in {rest_str}")));
        }

        if rest.len() % 2 == 1 {
            return Err(Error::InvalidIdentifier(format!("Not an even number of digits in {rest_str}")));
        }

        let precision = rest.len() / 2;
        if precision > usize::from(MAX_PRECISION) {
            return Err(Error::InvalidIdentifier(format!("More than {} digits in {rest_str}", 2 * MAX_PRECISION)));
        }

        let parse_digits = |digits: &[char]| {
            digits
                .iter()
                .filter_map(|c| c.to_digit(10))
                .fold(0_u32, |acc, d| acc * 10 + d)
        };

        let mgrs = Mgrs {
            zone,
            band,
            column,
            row,
            easting: parse_digits(&rest[..precision]),
            northing: parse_digits(&rest[precision..]),
            precision: u8::try_from(precision).unwrap_or(MAX_PRECISION),
        };

        // Validates the square letters against the zone and band
        mgrs.to_utm()?;

        Ok(mgrs)
    }
}

impl Display for Mgrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let separator = f.alternate().ternary(" ", "");

        write!(f, "{:02}{}{separator}{}{}", self.zone, self.band, self.column, self.row)?;

        if self.precision > 0 {
            write!(f, "{separator}{}{separator}{}", self.easting_digits(), self.northing_digits())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_letters_shift_for_even_zones() {
        // Same easting/northing, adjacent zones
        assert_eq!(square_id(17, 500_000.0, 4_300_000.0).unwrap(), "ND");
        assert_eq!(square_id(18, 500_000.0, 4_300_000.0).unwrap(), "WJ");
    }

    #[test]
    fn grid_digits_truncate() {
        assert_eq!(grid_digits(323_487.6, 4_306_483.0, 1), "20");
        assert_eq!(grid_digits(323_487.6, 4_306_483.0, 3), "234064");
        assert_eq!(grid_digits(323_487.6, 4_306_483.0, 0), "");
    }

    #[test]
    fn utm_row_rejects_squares_outside_band() {
        // Band S (index 4) covers rows 35 to 44
        assert_eq!(utm_row(4, 2, 43 % UTM_ROW_PERIOD), 43);
        assert_eq!(utm_row(4, 2, 50 % UTM_ROW_PERIOD), MAXUTM_S_ROW);
    }
}
