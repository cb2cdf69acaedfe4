//! The property, its marker record, the selectable base styles and the
//! widget's local view state.

use crate::core::{geo::Coordinate, viewport::ViewState};
use serde::{Deserialize, Serialize};

/// Where the property sits
pub const PROPERTY_LOCATION: Coordinate = Coordinate::new(33.83140, -116.54887);

/// Camera pose at mount. Slightly north of the property so the popup,
/// which opens above the marker, fits in view.
pub const INITIAL_VIEW: ViewState = ViewState::new(33.8380, -116.54887, 13.0);

pub const PROPERTY_NAME: &str = "Clark Gable Estate";
pub const PROPERTY_ADDRESS: &str = "222 W Chino Dr. Palm Springs, CA 92262";

/// A selectable base map theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapStyleOption {
    pub name: &'static str,
    pub url: &'static str,
}

impl MapStyleOption {
    pub const fn new(name: &'static str, url: &'static str) -> Self {
        Self { name, url }
    }
}

/// Fixed, ordered style list; the first entry is active at mount
pub const MAP_STYLES: [MapStyleOption; 4] = [
    MapStyleOption::new("Streets", "mapbox://styles/mapbox/streets-v11"),
    MapStyleOption::new("Satellite", "mapbox://styles/mapbox/satellite-v9"),
    MapStyleOption::new("Light", "mapbox://styles/mapbox/light-v10"),
    MapStyleOption::new("Dark", "mapbox://styles/mapbox/dark-v10"),
];

/// Descriptive record for the single point of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerInfo {
    pub longitude: f64,
    pub latitude: f64,
    pub name: String,
    pub address: String,
}

impl MarkerInfo {
    pub fn new(position: Coordinate, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            longitude: position.longitude,
            latitude: position.latitude,
            name: name.into(),
            address: address.into(),
        }
    }

    pub fn property() -> Self {
        Self::new(PROPERTY_LOCATION, PROPERTY_NAME, PROPERTY_ADDRESS)
    }

    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl Default for MarkerInfo {
    fn default() -> Self {
        Self::property()
    }
}

/// Local state of the location widget: the popup record (absent when hidden)
/// and the active style url.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationState {
    marker: MarkerInfo,
    popup: Option<MarkerInfo>,
    current_style: String,
    styles: &'static [MapStyleOption],
}

impl LocationState {
    /// Popup open on `marker`, first entry of [`MAP_STYLES`] active
    pub fn new(marker: MarkerInfo) -> Self {
        Self {
            popup: Some(marker.clone()),
            marker,
            current_style: MAP_STYLES[0].url.to_string(),
            styles: &MAP_STYLES,
        }
    }

    /// Hides the popup if shown, otherwise restores it to the marker record
    pub fn toggle_marker(&mut self) {
        self.popup = match self.popup.take() {
            Some(_) => None,
            None => Some(self.marker.clone()),
        };
        log::debug!("marker clicked, popup visible: {}", self.popup.is_some());
    }

    /// Makes `url` the active style. Not validated against the style list.
    pub fn select_style(&mut self, url: impl Into<String>) {
        let url = url.into();
        if url != self.current_style {
            log::debug!("map style {} -> {}", self.current_style, url);
        }
        self.current_style = url;
    }

    pub fn hide_popup(&mut self) {
        self.popup = None;
    }

    pub fn popup(&self) -> Option<&MarkerInfo> {
        self.popup.as_ref()
    }

    pub fn popup_visible(&self) -> bool {
        self.popup.is_some()
    }

    pub fn marker(&self) -> &MarkerInfo {
        &self.marker
    }

    pub fn current_style(&self) -> &str {
        &self.current_style
    }

    pub fn styles(&self) -> &'static [MapStyleOption] {
        self.styles
    }

    pub fn is_active(&self, option: &MapStyleOption) -> bool {
        option.url == self.current_style
    }

    /// The list entry matching the active url, if any
    pub fn active_style_option(&self) -> Option<&'static MapStyleOption> {
        self.styles.iter().find(|option| self.is_active(option))
    }
}

impl Default for LocationState {
    fn default() -> Self {
        Self::new(MarkerInfo::property())
    }
}
