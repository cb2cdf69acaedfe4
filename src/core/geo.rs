use crate::core::constants::{MAX_LATITUDE, TILE_SIZE};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A geographical coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Clamps latitude to the Web Mercator range
    pub fn clamp_latitude(latitude: f64) -> f64 {
        latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Wraps longitude to [-180, 180]
    pub fn wrap_longitude(longitude: f64) -> f64 {
        let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
        if wrapped == -180.0 && longitude > 0.0 {
            180.0
        } else {
            wrapped
        }
    }

    /// Projects to Web Mercator world pixels at `zoom`. Fractional zooms are allowed.
    pub fn to_world_pixel(&self, zoom: f64) -> Point {
        let scale = world_size(zoom);
        let lat_rad = Self::clamp_latitude(self.latitude).to_radians();

        let x = (self.longitude + 180.0) / 360.0 * scale;
        let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * scale;
        Point::new(x, y)
    }

    /// Inverse of [`Coordinate::to_world_pixel`]
    pub fn from_world_pixel(point: Point, zoom: f64) -> Self {
        let scale = world_size(zoom);
        let longitude = point.x / scale * 360.0 - 180.0;
        let latitude = (PI * (1.0 - 2.0 * point.y / scale)).sinh().atan().to_degrees();
        Self::new(latitude, longitude)
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Width of the whole world in pixels at `zoom`
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE as f64 * 2_f64.powf(zoom)
}

/// A point in screen or world pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// The tile containing `coordinate` at integer zoom `z`
    pub fn from_coordinate(coordinate: &Coordinate, z: u8) -> Self {
        let world = coordinate.to_world_pixel(z as f64);
        let max = Self::tiles_per_axis(z) - 1;
        let x = ((world.x / TILE_SIZE as f64).floor().max(0.0) as u32).min(max);
        let y = ((world.y / TILE_SIZE as f64).floor().max(0.0) as u32).min(max);
        Self::new(x, y, z)
    }

    /// Northwest corner of the tile
    pub fn to_coordinate(&self) -> Coordinate {
        let world = Point::new(
            self.x as f64 * TILE_SIZE as f64,
            self.y as f64 * TILE_SIZE as f64,
        );
        Coordinate::from_world_pixel(world, self.z as f64)
    }

    /// Number of tiles along one axis at zoom `z`
    pub fn tiles_per_axis(z: u8) -> u32 {
        1_u32 << z.min(31)
    }

    pub fn is_valid(&self) -> bool {
        let max = Self::tiles_per_axis(self.z);
        self.x < max && self.y < max
    }
}
