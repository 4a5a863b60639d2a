use crate::{Error, bounds::Bounds, constants::MAX_MAP_ZOOM, latlon::LatLon};

/// Map tile to draw grids on: pixel size, zoom level and geographic bounds
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridTile {
    width: u32,
    height: u32,
    zoom: u8,
    bounds: Bounds,
}

/// Position inside a tile, from the top left corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pixel {
    pub x: f64,
    pub y: f64,
}

impl GridTile {
    /// # Errors
    ///
    /// Returns [`Error::InvalidZoomRange`] if the zoom is above the max map
    /// zoom, [`Error::InvalidCoordinate`] if the bounds have no area.
    pub fn new(width: u32, height: u32, zoom: u8, bounds: Bounds) -> Result<GridTile, Error> {
        if zoom > MAX_MAP_ZOOM {
            return Err(Error::InvalidZoomRange(format!("Zoom {zoom} above max map zoom {MAX_MAP_ZOOM}")));
        }

        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(Error::InvalidCoordinate(format!("Tile bounds {bounds} have no area")));
        }

        Ok(Self { width, height, zoom, bounds })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Pixel of a point, interpolated linearly inside the tile bounds
    ///
    /// ```
    /// use mgrs_grid::{Bounds, GridTile, LatLon};
    ///
    /// let tile = GridTile::new(256, 256, 6, Bounds::new(-78.0, 38.0, -76.0, 40.0)).unwrap();
    /// let pixel = tile.pixel(&LatLon::create(39.5, -77.5).unwrap());
    ///
    /// assert_eq!(pixel.x, 64.0);
    /// assert_eq!(pixel.y, 64.0);
    /// ```
    pub fn pixel(&self, point: &LatLon) -> Pixel {
        let x = (point.longitude - self.bounds.west) / self.bounds.width() * f64::from(self.width);
        let y = (self.bounds.north - point.latitude) / self.bounds.height() * f64::from(self.height);

        Pixel { x, y }
    }
}
