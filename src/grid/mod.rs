//! Zoom dependent registry of the MGRS grids to draw.
//!
//! [`Grids`] owns one [`Grid`] per [`GridType`] and an index of the grid
//! types active at every map zoom level. Changing a grid's enabled flag or
//! zoom range patches that index through [`zoom_delta`].

use std::{collections::BTreeSet, fmt::Display, ops::RangeInclusive};

use log::debug;

use crate::{
    bounds::Bounds,
    constants::MAX_MAP_ZOOM,
    tile::GridTile,
    zones::{self, GridZone},
    Error,
};

pub(crate) mod cell;
pub mod labeler;
pub mod lines;

use labeler::{Label, Labeler, LabelerConfig, LabelerKind};
use lines::GridLine;

/// The MGRS grids, coarsest first
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridType {
    /// Grid zone designator (zone by latitude band)
    Gzd,
    HundredKilometer,
    TenKilometer,
    Kilometer,
    HundredMeter,
    TenMeter,
}

impl GridType {
    pub const ALL: [GridType; 6] = [
        GridType::Gzd,
        GridType::HundredKilometer,
        GridType::TenKilometer,
        GridType::Kilometer,
        GridType::HundredMeter,
        GridType::TenMeter,
    ];

    /// Cell size in meters, `None` for the irregular grid zones
    ///
    /// ```
    /// use mgrs_grid::GridType;
    ///
    /// assert_eq!(GridType::Gzd.precision(), None);
    /// assert_eq!(GridType::Kilometer.precision(), Some(1_000));
    /// ```
    pub fn precision(self) -> Option<u32> {
        match self {
            GridType::Gzd => None,
            GridType::HundredKilometer => Some(100_000),
            GridType::TenKilometer => Some(10_000),
            GridType::Kilometer => Some(1_000),
            GridType::HundredMeter => Some(100),
            GridType::TenMeter => Some(10),
        }
    }

    /// Number of easting (and northing) digits an identifier carries at
    /// this grid's precision
    pub fn digits(self) -> u8 {
        match self {
            GridType::Gzd | GridType::HundredKilometer => 0,
            GridType::TenKilometer => 1,
            GridType::Kilometer => 2,
            GridType::HundredMeter => 3,
            GridType::TenMeter => 4,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl Display for GridType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GridType::Gzd => "GZD",
            GridType::HundredKilometer => "100km",
            GridType::TenKilometer => "10km",
            GridType::Kilometer => "1km",
            GridType::HundredMeter => "100m",
            GridType::TenMeter => "10m",
        };
        write!(f, "{name}")
    }
}

/// RGBA color, passed through to the renderer untouched
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::rgb(136, 136, 136);
    /// Default grid zone designator color
    pub const RED: Color = Color::rgb(239, 83, 80);
    /// Default 100km square color
    pub const GREEN: Color = Color::rgb(76, 175, 80);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Color {
        Color { red, green, blue, alpha: u8::MAX }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelStyle {
    pub color: Color,
    pub text_size: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            text_size: 32.0,
        }
    }
}

/// Configuration of one grid. [`GridConfig::for_type`] gives the defaults:
///
/// | Type  | Zooms  | Labeler          | Color (lines and labels) |
/// |-------|--------|------------------|--------------------------|
/// | GZD   | 0+     | Gzd from 4       | `RED` (239, 83, 80)      |
/// | 100km | 5+     | ColumnRow from 6 | `GREEN` (76, 175, 80)    |
/// | 10km  | 9–11   | Grid             | `GRAY` (136, 136, 136)   |
/// | 1km   | 12–14  | Grid             | `GRAY`                   |
/// | 100m  | 15–17  | Grid             | `GRAY`                   |
/// | 10m   | 18+    | Grid             | `GRAY`                   |
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub grid_type: GridType,
    pub enabled: bool,
    pub min_zoom: u8,
    /// `None` draws through the highest map zoom
    pub max_zoom: Option<u8>,
    pub style: LineStyle,
    pub labeler: Option<LabelerConfig>,
}

impl GridConfig {
    pub fn for_type(grid_type: GridType) -> GridConfig {
        let (min_zoom, max_zoom, labeler) = match grid_type {
            GridType::Gzd => (0, None, LabelerConfig::new(LabelerKind::Gzd, 4)),
            GridType::HundredKilometer => (5, None, LabelerConfig::new(LabelerKind::ColumnRow, 6)),
            GridType::TenKilometer => (9, Some(11), LabelerConfig::new(LabelerKind::Grid, 9)),
            GridType::Kilometer => (12, Some(14), LabelerConfig::new(LabelerKind::Grid, 12)),
            GridType::HundredMeter => (15, Some(17), LabelerConfig::new(LabelerKind::Grid, 15)),
            GridType::TenMeter => (18, None, LabelerConfig::new(LabelerKind::Grid, 18)),
        };

        let color = match grid_type {
            GridType::Gzd => Color::RED,
            GridType::HundredKilometer => Color::GREEN,
            _ => Color::GRAY,
        };

        Self {
            grid_type,
            enabled: true,
            min_zoom,
            max_zoom,
            style: LineStyle { color, ..LineStyle::default() },
            labeler: Some(LabelerConfig {
                style: LabelStyle { color, ..LabelStyle::default() },
                ..labeler
            }),
        }
    }
}

pub(crate) fn check_zoom_range(min_zoom: u8, max_zoom: Option<u8>) -> Result<(), Error> {
    if min_zoom > MAX_MAP_ZOOM {
        return Err(Error::InvalidZoomRange(format!("Min zoom {min_zoom} above max map zoom {MAX_MAP_ZOOM}")));
    }

    match max_zoom {
        Some(max_zoom) if max_zoom > MAX_MAP_ZOOM => {
            Err(Error::InvalidZoomRange(format!("Max zoom {max_zoom} above max map zoom {MAX_MAP_ZOOM}")))
        }
        Some(max_zoom) if max_zoom < min_zoom => {
            Err(Error::InvalidZoomRange(format!("Min zoom {min_zoom} is larger than max zoom {max_zoom}")))
        }
        _ => Ok(()),
    }
}

/// One grid type's drawing state
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    grid_type: GridType,
    enabled: bool,
    min_zoom: u8,
    max_zoom: Option<u8>,
    style: LineStyle,
    labeler: Option<Labeler>,
}

impl Grid {
    /// Creates a grid from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoomRange`] for a zoom range (of the grid or its
    /// labeler) that is reversed or beyond the max map zoom, and
    /// [`Error::InvalidBuffer`] for a labeler buffer outside `[0.0, 0.5)`.
    pub fn new(config: GridConfig) -> Result<Grid, Error> {
        check_zoom_range(config.min_zoom, config.max_zoom)?;
        let labeler = config.labeler.map(Labeler::new).transpose()?;

        Ok(Self {
            grid_type: config.grid_type,
            enabled: config.enabled,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            style: config.style,
            labeler,
        })
    }

    pub fn grid_type(&self) -> GridType {
        self.grid_type
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

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    pub fn labeler(&self) -> Option<&Labeler> {
        self.labeler.as_ref()
    }

    pub fn has_labeler(&self) -> bool {
        self.labeler.is_some()
    }

    /// Whether the zoom is inside the grid's zoom range, enabled or not
    pub fn is_within(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom && self.max_zoom.map_or(true, |max_zoom| zoom <= max_zoom)
    }

    /// Whether the grid is labeled at the zoom
    pub fn is_labeled(&self, zoom: u8) -> bool {
        self.labeler
            .as_ref()
            .is_some_and(|labeler| labeler.is_enabled() && labeler.is_within(zoom))
    }

    /// Zooms the grid is drawn at, `None` when disabled
    fn span(&self) -> Option<RangeInclusive<u8>> {
        self.enabled
            .then(|| self.min_zoom..=self.max_zoom.unwrap_or(MAX_MAP_ZOOM).min(MAX_MAP_ZOOM))
    }

    /// Lines of this grid inside a tile and zone
    pub fn lines(&self, tile_bounds: &Bounds, zone: &GridZone) -> Vec<GridLine> {
        lines::lines(tile_bounds, self.grid_type, zone)
    }

    /// Labels of this grid inside a tile and zone, empty without a labeler
    pub fn labels(&self, tile_bounds: &Bounds, zone: &GridZone) -> Vec<Label> {
        self.labeler
            .as_ref()
            .map(|labeler| labeler.labels(tile_bounds, self.grid_type, zone))
            .unwrap_or_default()
    }

    fn labeler_mut(&mut self) -> Result<&mut Labeler, Error> {
        let grid_type = self.grid_type;
        self.labeler.as_mut().ok_or(Error::MissingLabeler(grid_type))
    }
}

/// Grid types drawn at one zoom level, coarsest first
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZoomGrids {
    zoom: u8,
    grids: BTreeSet<GridType>,
}

impl ZoomGrids {
    fn new(zoom: u8) -> ZoomGrids {
        Self { zoom, grids: BTreeSet::new() }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn contains(&self, grid_type: GridType) -> bool {
        self.grids.contains(&grid_type)
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = GridType> + '_ {
        self.grids.iter().copied()
    }
}

impl<'a> IntoIterator for &'a ZoomGrids {
    type Item = &'a GridType;
    type IntoIter = std::collections::btree_set::Iter<'a, GridType>;

    fn into_iter(self) -> Self::IntoIter {
        self.grids.iter()
    }
}

/// Zoom levels to add a grid to and remove it from
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZoomDelta {
    pub add: Vec<u8>,
    pub remove: Vec<u8>,
}

/// Difference between the zooms a grid was drawn at and the zooms it is
/// drawn at after a change. `None` means not drawn at all.
///
/// ```
/// use mgrs_grid::grid::zoom_delta;
///
/// let delta = zoom_delta(Some(5..=8), Some(7..=10));
/// assert_eq!(delta.add, [9, 10]);
/// assert_eq!(delta.remove, [5, 6]);
/// ```
pub fn zoom_delta(old: Option<RangeInclusive<u8>>, new: Option<RangeInclusive<u8>>) -> ZoomDelta {
    let in_span = |span: &Option<RangeInclusive<u8>>, zoom: u8| span.as_ref().is_some_and(|span| span.contains(&zoom));

    let (add, remove): (Vec<u8>, Vec<u8>) = (0..=MAX_MAP_ZOOM)
        .filter(|zoom| in_span(&old, *zoom) != in_span(&new, *zoom))
        .partition(|zoom| in_span(&new, *zoom));

    ZoomDelta { add, remove }
}

/// Lines and labels of one grid type for a tile
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    pub grid_type: GridType,
    pub style: LineStyle,
    pub label_style: Option<LabelStyle>,
    pub lines: Vec<GridLine>,
    pub labels: Vec<Label>,
}

/// Registry of the grids and the zoom levels they are drawn at
#[derive(Clone, Debug, PartialEq)]
pub struct Grids {
    // Indexed by GridType::index
    grids: Vec<Grid>,
    // Indexed by zoom
    zoom_grids: Vec<ZoomGrids>,
}

impl Default for Grids {
    fn default() -> Self {
        Self::new()
    }
}

impl Grids {
    /// All grids with their default configuration, enabled
    ///
    /// ```
    /// use mgrs_grid::{Grids, GridType};
    ///
    /// let grids = Grids::new();
    /// let zoom_grids = grids.grids(12).unwrap();
    ///
    /// assert!(zoom_grids.contains(GridType::Gzd));
    /// assert!(zoom_grids.contains(GridType::HundredKilometer));
    /// assert!(zoom_grids.contains(GridType::Kilometer));
    /// assert!(!zoom_grids.contains(GridType::TenKilometer));
    /// ```
    pub fn new() -> Grids {
        Self::build(GridType::ALL.iter().map(|grid_type| Self::default_grid(*grid_type)).collect())
    }

    /// All grids with their default configuration, only `types` enabled
    pub fn with_types(types: &[GridType]) -> Grids {
        Self::build(
            GridType::ALL
                .iter()
                .map(|grid_type| Grid {
                    enabled: types.contains(grid_type),
                    ..Self::default_grid(*grid_type)
                })
                .collect(),
        )
    }

    /// Grids from configurations, defaults for the types not configured. A
    /// later configuration of the same type replaces an earlier one.
    ///
    /// # Errors
    ///
    /// See [`Grid::new`].
    pub fn with_configs(configs: &[GridConfig]) -> Result<Grids, Error> {
        let mut grids: Vec<Grid> = GridType::ALL.iter().map(|grid_type| Self::default_grid(*grid_type)).collect();

        for config in configs {
            grids[config.grid_type.index()] = Grid::new(*config)?;
        }

        Ok(Self::build(grids))
    }

    fn default_grid(grid_type: GridType) -> Grid {
        let config = GridConfig::for_type(grid_type);

        Grid {
            grid_type,
            enabled: config.enabled,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            style: config.style,
            labeler: config.labeler.map(Labeler::from_valid),
        }
    }

    fn build(grids: Vec<Grid>) -> Grids {
        let mut zoom_grids: Vec<ZoomGrids> = (0..=MAX_MAP_ZOOM).map(ZoomGrids::new).collect();

        for grid in &grids {
            if let Some(span) = grid.span() {
                for zoom in span {
                    zoom_grids[usize::from(zoom)].grids.insert(grid.grid_type);
                }
            }
        }

        Self { grids, zoom_grids }
    }

    pub fn grid(&self, grid_type: GridType) -> &Grid {
        &self.grids[grid_type.index()]
    }

    /// Grid types drawn at a zoom level
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoomRange`] if the zoom is above the max map zoom.
    pub fn grids(&self, zoom: u8) -> Result<&ZoomGrids, Error> {
        self.zoom_grids
            .get(usize::from(zoom))
            .ok_or_else(|| Error::InvalidZoomRange(format!("Zoom {zoom} above max map zoom {MAX_MAP_ZOOM}")))
    }

    pub fn is_enabled(&self, grid_type: GridType) -> bool {
        self.grid(grid_type).enabled
    }

    pub fn enable(&mut self, grid_type: GridType) {
        self.update(grid_type, |grid| grid.enabled = true);
    }

    pub fn disable(&mut self, grid_type: GridType) {
        self.update(grid_type, |grid| grid.enabled = false);
    }

    pub fn enable_types(&mut self, types: &[GridType]) {
        for grid_type in types {
            self.enable(*grid_type);
        }
    }

    pub fn disable_types(&mut self, types: &[GridType]) {
        for grid_type in types {
            self.disable(*grid_type);
        }
    }

    /// Enables exactly the listed types
    pub fn set_types(&mut self, types: &[GridType]) {
        for grid_type in GridType::ALL {
            if types.contains(&grid_type) {
                self.enable(grid_type);
            } else {
                self.disable(grid_type);
            }
        }
    }

    /// Sets the min zoom, raising a lower max zoom to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoomRange`] if the zoom is above the max map zoom.
    pub fn set_min_zoom(&mut self, grid_type: GridType, min_zoom: u8) -> Result<(), Error> {
        let max_zoom = self.grid(grid_type).max_zoom.map(|max_zoom| max_zoom.max(min_zoom));
        self.set_zoom_range(grid_type, min_zoom, max_zoom)
    }

    /// Sets the max zoom, lowering a higher min zoom to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoomRange`] if the zoom is above the max map zoom.
    pub fn set_max_zoom(&mut self, grid_type: GridType, max_zoom: Option<u8>) -> Result<(), Error> {
        let min_zoom = self.grid(grid_type).min_zoom;
        let min_zoom = max_zoom.map_or(min_zoom, |max_zoom| min_zoom.min(max_zoom));
        self.set_zoom_range(grid_type, min_zoom, max_zoom)
    }

    /// Sets the zoom range of a grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoomRange`] if the max zoom is below the min zoom
    /// or either is above the max map zoom.
    ///
    /// ```
    /// use mgrs_grid::{Grids, GridType};
    ///
    /// let mut grids = Grids::new();
    /// grids.set_zoom_range(GridType::Kilometer, 10, Some(11)).unwrap();
    /// assert!(grids.grids(10).unwrap().contains(GridType::Kilometer));
    /// assert!(!grids.grids(12).unwrap().contains(GridType::Kilometer));
    ///
    /// assert!(grids.set_zoom_range(GridType::Kilometer, 12, Some(11)).is_err());
    /// ```
    pub fn set_zoom_range(&mut self, grid_type: GridType, min_zoom: u8, max_zoom: Option<u8>) -> Result<(), Error> {
        check_zoom_range(min_zoom, max_zoom)?;

        self.update(grid_type, |grid| {
            grid.min_zoom = min_zoom;
            grid.max_zoom = max_zoom;
        });

        Ok(())
    }

    /// Applies a change to a grid and patches the zoom index with the
    /// difference in the zooms it is drawn at
    fn update<F: FnOnce(&mut Grid)>(&mut self, grid_type: GridType, change: F) {
        let grid = &mut self.grids[grid_type.index()];

        let old = grid.span();
        change(grid);
        let new = grid.span();

        let delta = zoom_delta(old, new);
        if delta == ZoomDelta::default() {
            return;
        }

        debug!("Grid {grid_type} zooms added {:?} removed {:?}", delta.add, delta.remove);

        for zoom in delta.add {
            self.zoom_grids[usize::from(zoom)].grids.insert(grid_type);
        }
        for zoom in delta.remove {
            self.zoom_grids[usize::from(zoom)].grids.remove(&grid_type);
        }
    }

    pub fn labeler(&self, grid_type: GridType) -> Option<&Labeler> {
        self.grid(grid_type).labeler()
    }

    pub fn has_labeler(&self, grid_type: GridType) -> bool {
        self.grid(grid_type).has_labeler()
    }

    /// Replaces (or with `None` removes) the labeler of a grid.
    ///
    /// # Errors
    ///
    /// See [`Labeler::new`].
    pub fn set_labeler(&mut self, grid_type: GridType, config: Option<LabelerConfig>) -> Result<(), Error> {
        let labeler = config.map(Labeler::new).transpose()?;
        debug!("Grid {grid_type} labeler set to {:?}", labeler.as_ref().map(Labeler::kind));
        self.grids[grid_type.index()].labeler = labeler;
        Ok(())
    }

    pub fn is_labeler_enabled(&self, grid_type: GridType) -> bool {
        self.labeler(grid_type).is_some_and(Labeler::is_enabled)
    }

    /// # Errors
    ///
    /// Returns [`Error::MissingLabeler`] if the grid has no labeler.
    pub fn enable_labeler(&mut self, grid_type: GridType) -> Result<(), Error> {
        self.update_labeler(grid_type, |labeler| {
            labeler.enabled = true;
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Returns [`Error::MissingLabeler`] if the grid has no labeler.
    pub fn disable_labeler(&mut self, grid_type: GridType) -> Result<(), Error> {
        self.update_labeler(grid_type, |labeler| {
            labeler.enabled = false;
            Ok(())
        })
    }

    /// Sets the label min zoom, raising a lower label max zoom to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLabeler`] if the grid has no labeler,
    /// [`Error::InvalidZoomRange`] if the zoom is above the max map zoom.
    pub fn set_label_min_zoom(&mut self, grid_type: GridType, min_zoom: u8) -> Result<(), Error> {
        self.update_labeler(grid_type, |labeler| {
            let max_zoom = labeler.max_zoom.map(|max_zoom| max_zoom.max(min_zoom));
            labeler.set_zoom_range(min_zoom, max_zoom)
        })
    }

    /// Sets the label max zoom, lowering a higher label min zoom to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLabeler`] if the grid has no labeler,
    /// [`Error::InvalidZoomRange`] if the zoom is above the max map zoom.
    pub fn set_label_max_zoom(&mut self, grid_type: GridType, max_zoom: Option<u8>) -> Result<(), Error> {
        self.update_labeler(grid_type, |labeler| {
            let min_zoom = max_zoom.map_or(labeler.min_zoom, |max_zoom| labeler.min_zoom.min(max_zoom));
            labeler.set_zoom_range(min_zoom, max_zoom)
        })
    }

    /// # Errors
    ///
    /// Returns [`Error::MissingLabeler`] if the grid has no labeler,
    /// [`Error::InvalidZoomRange`] if the max zoom is below the min zoom.
    pub fn set_label_zoom_range(
        &mut self,
        grid_type: GridType,
        min_zoom: u8,
        max_zoom: Option<u8>,
    ) -> Result<(), Error> {
        self.update_labeler(grid_type, |labeler| labeler.set_zoom_range(min_zoom, max_zoom))
    }

    /// # Errors
    ///
    /// Returns [`Error::MissingLabeler`] if the grid has no labeler,
    /// [`Error::InvalidBuffer`] if the buffer is outside `[0.0, 0.5)`.
    ///
    /// ```
    /// use mgrs_grid::{Error, Grids, GridType};
    ///
    /// let mut grids = Grids::new();
    /// assert!(grids.set_label_buffer(GridType::Kilometer, 0.1).is_ok());
    /// assert_eq!(grids.set_label_buffer(GridType::Kilometer, 0.5), Err(Error::InvalidBuffer(0.5)));
    /// ```
    pub fn set_label_buffer(&mut self, grid_type: GridType, buffer: f64) -> Result<(), Error> {
        self.update_labeler(grid_type, |labeler| labeler.set_buffer(buffer))
    }

    fn update_labeler<F>(&mut self, grid_type: GridType, change: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Labeler) -> Result<(), Error>,
    {
        let labeler = self.grids[grid_type.index()].labeler_mut()?;
        change(labeler)?;
        debug!("Grid {grid_type} labeler updated: {labeler:?}");
        Ok(())
    }

    /// Lines and labels of every grid drawn at the tile's zoom, for every
    /// grid zone the tile overlaps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoomRange`] if the tile zoom is above the max map zoom.
    pub fn draw(&self, tile: &GridTile) -> Result<Vec<TileGrid>, Error> {
        let zoom = tile.zoom();
        let zone_list = zones::zones(tile.bounds());

        let tile_grids = self
            .grids(zoom)?
            .iter()
            .map(|grid_type| {
                let grid = self.grid(grid_type);
                let labeled = grid.is_labeled(zoom);

                let mut lines = Vec::new();
                let mut labels = Vec::new();
                for zone in &zone_list {
                    lines.extend(grid.lines(tile.bounds(), zone));
                    if labeled {
                        labels.extend(grid.labels(tile.bounds(), zone));
                    }
                }

                TileGrid {
                    grid_type,
                    style: grid.style,
                    label_style: grid.labeler.as_ref().map(|labeler| labeler.style),
                    lines,
                    labels,
                }
            })
            .collect();

        Ok(tile_grids)
    }
}
