#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::module_name_repetitions
)]

use thiserror::Error;

pub mod bounds;
pub mod grid;
pub mod tile;
pub(crate) mod utility;
pub mod zones;

pub mod coords {
    pub mod latlon;
    pub mod mgrs;
    pub mod utm;
}

pub use coords::{latlon, mgrs, utm};

pub use bounds::Bounds;
pub use constants::MAX_MAP_ZOOM;
pub use grid::{
    labeler::{Label, Labeler, LabelerConfig, LabelerKind},
    lines::GridLine,
    Color, Grid, GridConfig, GridType, Grids, LabelStyle, LineStyle, TileGrid, ZoomGrids,
};
pub use latlon::LatLon;
pub use mgrs::Mgrs;
pub use tile::{GridTile, Pixel};
pub use utm::{Hemisphere, Utm};
pub use zones::GridZone;

pub(crate) mod projections {
    pub mod transverse_mercator;
}

pub(crate) mod constants;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("Coordinate is not valid: {0}")]
    InvalidCoordinate(String),
    #[error("MGRS identifier is invalid: {0}")]
    InvalidIdentifier(String),
    #[error("Zoom range is invalid: {0}")]
    InvalidZoomRange(String),
    #[error("Unable to resolve a grid zone: {0}")]
    UnresolvableZone(String),
    #[error("Grid type {0} does not have a labeler")]
    MissingLabeler(GridType),
    #[error("Label buffer {0} not in range [0.0, 0.5)")]
    InvalidBuffer(f64),
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
    fn ternary_lazy<F, E, T>(&self, r#true: F, r#false: E) -> T
    where
        F: Fn() -> T,
        E: Fn() -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }

    fn ternary_lazy<F, E, T>(&self, r#true: F, r#false: E) -> T
    where
        F: Fn() -> T,
        E: Fn() -> T,
    {
        if *self { r#true() } else { r#false() }
    }
}
