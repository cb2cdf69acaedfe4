//! # estate-map
//!
//! A property location widget for egui.
//!
//! The widget shows a raster base map of one of four Mapbox styles, a fixed
//! marker on the property, an info popup toggled by clicking the marker, map
//! controls and a style switcher. The pure view state lives in [`location`]
//! and can be used without the `egui` feature.

pub mod core;
pub mod geolocation;
pub mod location;
pub mod prelude;
pub mod tiles;

#[cfg(feature = "egui")]
pub mod surface;
#[cfg(feature = "egui")]
pub mod ui;

pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::{AccessToken, ControlPosition, TileLoadingConfig, TileLoadingProfile, WidgetConfig},
    geo::{Coordinate, Point, TileCoord},
    viewport::{ViewState, Viewport},
};

pub use location::{LocationState, MapStyleOption, MarkerInfo, INITIAL_VIEW, MAP_STYLES};

pub use geolocation::{FixedGeolocator, Geolocator, Unavailable};

#[cfg(feature = "egui")]
pub use surface::{MapSurface, TileSurface};

#[cfg(feature = "egui")]
pub use ui::widget::LocationWidget;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Http(u16),

    #[error("Tile decode error: {0}")]
    Decode(String),

    #[error("Invalid style url: {0}")]
    InvalidStyle(String),

    #[error("Geolocation unavailable: {0}")]
    Geolocation(String),
}

/// Error type alias for convenience
pub type Error = MapError;
