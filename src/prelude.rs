//! Prelude module for common estate-map types and traits
//!
//! `use estate_map::prelude::*;`

pub use crate::core::{
    config::{AccessToken, ControlPosition, TileLoadingConfig, TileLoadingProfile, WidgetConfig},
    geo::{Coordinate, Point, TileCoord},
    viewport::{ViewState, Viewport, VisibleTile},
};

pub use crate::location::{
    LocationState, MapStyleOption, MarkerInfo, INITIAL_VIEW, MAP_STYLES, PROPERTY_LOCATION,
};

pub use crate::geolocation::{FixedGeolocator, Geolocator, Unavailable};

pub use crate::tiles::{StyleTileSource, TileCache, TileKey, TileLoader, TileSource};

#[cfg(feature = "egui")]
pub use crate::surface::{MapSurface, TileSurface};

#[cfg(feature = "egui")]
pub use crate::ui::{
    controls::{ControlAction, MapControls},
    popup::{InfoPopup, PopupAnchor},
    style::{MapThemes, WidgetStyle},
    widget::{LocationWidget, LocationWidgetExt},
};

pub use crate::{Error as MapError, Result};
