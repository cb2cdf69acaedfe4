use crate::core::constants::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use crate::core::geo::{Coordinate, Point, TileCoord};
use serde::{Deserialize, Serialize};

/// Initial camera pose handed to the map surface once at mount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl ViewState {
    pub const fn new(latitude: f64, longitude: f64, zoom: f64) -> Self {
        Self {
            latitude,
            longitude,
            zoom,
        }
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A tile that intersects the viewport, with its placement in screen pixels
/// relative to the viewport's top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleTile {
    pub coord: TileCoord,
    pub min: Point,
    pub max: Point,
}

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: Coordinate,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Viewport {
    pub fn new(center: Coordinate, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    pub fn from_view_state(view: &ViewState, size: Point) -> Self {
        Self::new(view.center(), view.zoom, size)
    }

    /// Narrows the zoom range and re-clamps the current zoom
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom.max(MIN_ZOOM);
        self.max_zoom = max_zoom.min(MAX_ZOOM).max(self.min_zoom);
        self.zoom = self.zoom.clamp(self.min_zoom, self.max_zoom);
        self
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    pub fn set_center(&mut self, center: Coordinate) {
        self.center = Coordinate::new(
            Coordinate::clamp_latitude(center.latitude),
            Coordinate::wrap_longitude(center.longitude),
        );
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.set_zoom(self.zoom + delta);
    }

    /// Moves the view by `delta` screen pixels; positive x pans east, positive y south
    pub fn pan_by(&mut self, delta: Point) {
        let center_px = self.center.to_world_pixel(self.zoom).add(&delta);
        self.set_center(Coordinate::from_world_pixel(center_px, self.zoom));
    }

    /// World pixel at the viewport's top-left corner
    pub fn pixel_origin(&self) -> Point {
        self.center
            .to_world_pixel(self.zoom)
            .subtract(&self.size.multiply(0.5))
    }

    pub fn coordinate_to_screen(&self, coordinate: &Coordinate) -> Point {
        coordinate
            .to_world_pixel(self.zoom)
            .subtract(&self.pixel_origin())
    }

    pub fn screen_to_coordinate(&self, point: Point) -> Coordinate {
        Coordinate::from_world_pixel(point.add(&self.pixel_origin()), self.zoom)
    }

    pub fn contains_screen(&self, point: Point) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x <= self.size.x && point.y <= self.size.y
    }

    /// Integer zoom used to pick tiles
    pub fn tile_zoom(&self) -> u8 {
        self.zoom.round().clamp(MIN_ZOOM, MAX_ZOOM) as u8
    }

    /// Tiles covering the viewport. Columns wrap around the antimeridian,
    /// rows outside the world are skipped.
    pub fn visible_tiles(&self) -> Vec<VisibleTile> {
        let z = self.tile_zoom();
        let tile_px = TILE_SIZE as f64 * 2_f64.powf(self.zoom - z as f64);
        if tile_px <= 0.0 || self.size.x <= 0.0 || self.size.y <= 0.0 {
            return Vec::new();
        }

        let origin = self.pixel_origin();
        let per_axis = TileCoord::tiles_per_axis(z) as i64;

        let min_x = (origin.x / tile_px).floor() as i64;
        let max_x = ((origin.x + self.size.x) / tile_px).floor() as i64;
        let min_y = ((origin.y / tile_px).floor() as i64).max(0);
        let max_y = (((origin.y + self.size.y) / tile_px).floor() as i64).min(per_axis - 1);

        let mut tiles = Vec::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let min = Point::new(
                    x as f64 * tile_px - origin.x,
                    y as f64 * tile_px - origin.y,
                );
                tiles.push(VisibleTile {
                    coord: TileCoord::new(x.rem_euclid(per_axis) as u32, y as u32, z),
                    min,
                    max: Point::new(min.x + tile_px, min.y + tile_px),
                });
            }
        }
        tiles
    }
}
