//! Engine-wide constants for projection, zoom limits and the Mapbox endpoints.

/// Square raster tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Web Mercator latitude limit.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Lowest zoom the surface accepts.
pub const MIN_ZOOM: f64 = 0.0;

/// Highest zoom the Mapbox raster tile endpoint serves.
pub const MAX_ZOOM: f64 = 22.0;

/// Programmatic +/- zoom step for the navigation control.
pub const DEFAULT_ZOOM_DELTA: f64 = 1.0;

/// Scroll wheel points to zoom levels.
pub const SCROLL_ZOOM_FACTOR: f64 = 0.002;

/// Default height of the map surface in points.
pub const DEFAULT_MAP_HEIGHT: f32 = 400.0;

/// Scheme prefix of a Mapbox style url, e.g. `mapbox://styles/mapbox/streets-v11`.
pub const MAPBOX_STYLE_SCHEME: &str = "mapbox://styles/";

/// Base of the Mapbox Static Tiles API.
pub const MAPBOX_STYLES_ENDPOINT: &str = "https://api.mapbox.com/styles/v1";

/// Environment variables searched for the access token, in order.
pub const ACCESS_TOKEN_VARS: [&str; 2] = [
    "MAPBOX_ACCESS_TOKEN",
    "VITE_REACT_APP_MAPBOX_ACCESS_TOKEN",
];
