use crate::{core::geo::Coordinate, MapError, Result};

/// Source of the user's current position for the geolocate control
pub trait Geolocator: Send {
    fn current_position(&mut self) -> Result<Coordinate>;
}

/// No positioning hardware; every request fails
#[derive(Debug, Default, Clone, Copy)]
pub struct Unavailable;

impl Geolocator for Unavailable {
    fn current_position(&mut self) -> Result<Coordinate> {
        Err(MapError::Geolocation(
            "no position provider configured".to_string(),
        ))
    }
}

/// Always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinate);

impl Geolocator for FixedGeolocator {
    fn current_position(&mut self) -> Result<Coordinate> {
        Ok(self.0)
    }
}
