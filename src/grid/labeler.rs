//! Grid labels: zone designators, 100km square identifiers and
//! easting/northing digits, kept inside the grid zone they belong to.

use log::trace;

use crate::{bounds::Bounds, constants::MAX_MAP_ZOOM, latlon::LatLon, mgrs, zones::GridZone, Error};

use super::{GridType, LabelStyle, cell, check_zoom_range};

/// Default label inset, as a fraction of the label bounds, at zone edges
pub const DEFAULT_BUFFER: f64 = 0.05;
const MAX_BUFFER: f64 = 0.5;

/// How a grid's labels are placed and what they read
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelerKind {
    /// One label per grid zone, e.g. `18S`
    Gzd,
    /// One label per 100km square, e.g. `UJ`
    ColumnRow,
    /// One label per grid cell with its easting and northing digits
    Grid,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelerConfig {
    pub kind: LabelerKind,
    pub enabled: bool,
    pub min_zoom: u8,
    pub max_zoom: Option<u8>,
    pub style: LabelStyle,
    /// Inset of label bounds clipped at a zone edge, in `[0.0, 0.5)`
    pub buffer: f64,
}

impl LabelerConfig {
    /// Enabled labeler from `min_zoom` on with the default style and buffer
    pub fn new(kind: LabelerKind, min_zoom: u8) -> LabelerConfig {
        Self {
            kind,
            enabled: true,
            min_zoom,
            max_zoom: None,
            style: LabelStyle::default(),
            buffer: DEFAULT_BUFFER,
        }
    }
}

fn check_buffer(buffer: f64) -> Result<(), Error> {
    if (0.0..MAX_BUFFER).contains(&buffer) {
        Ok(())
    } else {
        Err(Error::InvalidBuffer(buffer))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Labeler {
    pub(crate) kind: LabelerKind,
    pub(crate) enabled: bool,
    pub(crate) min_zoom: u8,
    pub(crate) max_zoom: Option<u8>,
    pub(crate) style: LabelStyle,
    pub(crate) buffer: f64,
}

impl Labeler {
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoomRange`] for a reversed zoom range or one
    /// beyond the max map zoom, [`Error::InvalidBuffer`] for a buffer outside
    /// `[0.0, 0.5)`.
    pub fn new(config: LabelerConfig) -> Result<Labeler, Error> {
        check_zoom_range(config.min_zoom, config.max_zoom)?;
        check_buffer(config.buffer)?;

        Ok(Self::from_valid(config))
    }

    pub(crate) fn from_valid(config: LabelerConfig) -> Labeler {
        Self {
            kind: config.kind,
            enabled: config.enabled,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            style: config.style,
            buffer: config.buffer,
        }
    }

    pub fn kind(&self) -> LabelerKind {
        self.kind
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn min_zoom(&self) -> u8 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> Option<u8> {
        self.max_zoom
    }

    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    pub fn buffer(&self) -> f64 {
        self.buffer
    }

    pub fn is_within(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom && zoom <= self.max_zoom.unwrap_or(MAX_MAP_ZOOM)
    }

    pub(crate) fn set_zoom_range(&mut self, min_zoom: u8, max_zoom: Option<u8>) -> Result<(), Error> {
        check_zoom_range(min_zoom, max_zoom)?;
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        Ok(())
    }

    pub(crate) fn set_buffer(&mut self, buffer: f64) -> Result<(), Error> {
        check_buffer(buffer)?;
        self.buffer = buffer;
        Ok(())
    }

    /// Labels of a grid inside a tile and one of the grid zones it overlaps
    ///
    /// ```
    /// use mgrs_grid::{Bounds, GridType, GridZone, Labeler, LabelerKind};
    /// use mgrs_grid::grid::labeler::LabelerConfig;
    ///
    /// let labeler = Labeler::new(LabelerConfig::new(LabelerKind::Gzd, 4)).unwrap();
    /// let zone = GridZone::new(18, 'S').unwrap();
    ///
    /// let labels = labeler.labels(&Bounds::new(-80.0, 30.0, -70.0, 45.0), GridType::Gzd, &zone);
    /// assert_eq!(labels.len(), 1);
    /// assert_eq!(labels[0].text(), "18S");
    /// ```
    pub fn labels(&self, tile_bounds: &Bounds, grid_type: GridType, zone: &GridZone) -> Vec<Label> {
        match (self.kind, grid_type.precision()) {
            (LabelerKind::Gzd, _) => zone_labels(tile_bounds, zone),
            (LabelerKind::ColumnRow, Some(precision)) => column_row_labels(tile_bounds, precision, zone, self.buffer),
            (LabelerKind::Grid, Some(_)) => grid_labels(tile_bounds, grid_type, zone, self.buffer),
            (kind, None) => {
                trace!("{kind:?} labeler has no cells on the {grid_type} grid");
                Vec::new()
            }
        }
    }
}

/// Text and placement of one grid label
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    text: String,
    center: LatLon,
    bounds: Bounds,
    zone_number: i32,
    band_letter: char,
}

impl Label {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Anchor point of the text
    pub fn center(&self) -> &LatLon {
        &self.center
    }

    /// Area the text may occupy, inside the label's grid zone
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn zone_number(&self) -> i32 {
        self.zone_number
    }

    pub fn band_letter(&self) -> char {
        self.band_letter
    }
}

/// Grid zone designator label centered on the zone
pub fn zone_labels(tile_bounds: &Bounds, zone: &GridZone) -> Vec<Label> {
    if !zone.bounds().intersects(tile_bounds) {
        return Vec::new();
    }

    vec![Label {
        text: zone.name(),
        center: zone.bounds().center(),
        bounds: *zone.bounds(),
        zone_number: zone.number(),
        band_letter: zone.letter(),
    }]
}

/// 100km square identifiers of the squares of a zone visible in a tile.
/// `precision` is the square size in meters.
///
/// ```
/// use mgrs_grid::{Bounds, GridZone};
/// use mgrs_grid::grid::labeler::column_row_labels;
///
/// let zone = GridZone::new(18, 'S').unwrap();
/// let labels = column_row_labels(&Bounds::new(-77.2, 38.8, -76.9, 39.0), 100_000, &zone, 0.05);
///
/// assert!(labels.iter().any(|label| label.text() == "UJ"));
/// assert!(labels.iter().all(|label| zone.bounds().contains_bounds(label.bounds(), 1e-9)));
/// ```
pub fn column_row_labels(tile_bounds: &Bounds, precision: u32, zone: &GridZone, buffer: f64) -> Vec<Label> {
    cell::clipped_cells(tile_bounds, precision, zone, buffer)
        .into_iter()
        .filter_map(|(cell, clipped)| {
            let (easting, northing) = cell.center();
            match mgrs::square_id(zone.number(), easting, northing) {
                Ok(text) => Some(Label {
                    text,
                    center: clipped.center,
                    bounds: clipped.bounds,
                    zone_number: zone.number(),
                    band_letter: zone.letter(),
                }),
                Err(e) => {
                    trace!("Skipping square at {easting} {northing} in {zone}: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Easting/northing digit labels of the cells of a zone visible in a tile.
/// The 100km grid reads its square identifiers instead.
pub fn grid_labels(tile_bounds: &Bounds, grid_type: GridType, zone: &GridZone, buffer: f64) -> Vec<Label> {
    let Some(precision) = grid_type.precision() else {
        return Vec::new();
    };

    if grid_type == GridType::HundredKilometer {
        return column_row_labels(tile_bounds, precision, zone, buffer);
    }

    cell::clipped_cells(tile_bounds, precision, zone, buffer)
        .into_iter()
        .map(|(cell, clipped)| {
            let (easting, northing) = cell.center();
            Label {
                text: mgrs::grid_digits(easting, northing, grid_type.digits()),
                center: clipped.center,
                bounds: clipped.bounds,
                zone_number: zone.number(),
                band_letter: zone.letter(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_must_be_below_half() {
        assert!(check_buffer(0.0).is_ok());
        assert!(check_buffer(0.49).is_ok());
        assert_eq!(check_buffer(0.5), Err(Error::InvalidBuffer(0.5)));
        assert_eq!(check_buffer(-0.1), Err(Error::InvalidBuffer(-0.1)));
    }

    #[test]
    fn zone_label_skips_zones_outside_tile() {
        let zone = GridZone::new(18, 'S').unwrap();
        assert!(zone_labels(&Bounds::new(-70.0, 30.0, -66.0, 35.0), &zone).is_empty());
    }

    #[test]
    fn kilometer_labels_read_two_digit_pairs() {
        let zone = GridZone::new(18, 'S').unwrap();
        // About 1.5km around 18SUJ2348706483
        let tile = Bounds::new(-77.044, 38.883, -77.026, 38.896);
        let labels = grid_labels(&tile, GridType::Kilometer, &zone, DEFAULT_BUFFER);

        assert!(labels.iter().any(|label| label.text() == "2306"));
        assert!(labels.iter().all(|label| label.text().len() == 4));
    }
}
