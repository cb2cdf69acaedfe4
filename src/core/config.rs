//! Configuration for the location widget and its tile loading
//!
//! Tile loading follows a preset/custom profile scheme; the widget config
//! bundles layout, zoom limits and the Mapbox access token.

use crate::core::constants::{ACCESS_TOKEN_VARS, DEFAULT_MAP_HEIGHT, MAX_ZOOM, MIN_ZOOM};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum TileLoadingProfile {
    Balanced,
    LowBandwidth,
    Custom(TileLoadingConfig),
}

impl TileLoadingProfile {
    pub fn resolve(&self) -> TileLoadingConfig {
        match self {
            Self::Balanced => TileLoadingConfig::default(),
            Self::LowBandwidth => TileLoadingConfig {
                cache_size: 64,
                max_retries: 1,
                retry_delay_ms: 250,
                exponential_backoff: false,
                max_pending: 8,
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for TileLoadingProfile {
    fn default() -> Self {
        Self::Balanced
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLoadingConfig {
    /// Decoded tiles kept across all styles
    pub cache_size: usize,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub exponential_backoff: bool,
    /// Downloads allowed in flight at once
    pub max_pending: usize,
}

impl TileLoadingConfig {
    /// Delay before retrying after failed attempt number `attempt` (1-based)
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = if self.exponential_backoff {
            2_u64.saturating_pow(attempt.saturating_sub(1))
        } else {
            1
        };
        Duration::from_millis(self.retry_delay_ms.saturating_mul(factor))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

impl Default for TileLoadingConfig {
    fn default() -> Self {
        Self {
            cache_size: 256,
            max_retries: 2,
            retry_delay_ms: 100,
            exponential_backoff: true,
            max_pending: 24,
        }
    }
}

/// Mapbox access token. Never printed in full.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// Reads the first non-empty variable of [`ACCESS_TOKEN_VARS`]. A missing
    /// token yields an empty one; the map surface then renders without tiles.
    pub fn from_env() -> Self {
        for var in ACCESS_TOKEN_VARS {
            if let Ok(value) = std::env::var(var) {
                let token = Self::new(value);
                if !token.is_empty() {
                    log::debug!("using map access token from {}", var);
                    return token;
                }
            }
        }
        log::warn!("no map access token found in {:?}", ACCESS_TOKEN_VARS);
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("AccessToken(<empty>)")
        } else {
            let prefix: String = self.0.chars().take(4).collect();
            write!(f, "AccessToken({}…)", prefix)
        }
    }
}

/// Screen corner a control group is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Default for ControlPosition {
    fn default() -> Self {
        Self::TopRight
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub map_height: f32,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub controls_position: ControlPosition,
    /// Hide the popup when the map itself is clicked
    pub popup_close_on_click: bool,
    pub tiles: TileLoadingConfig,
    pub access_token: AccessToken,
}

impl WidgetConfig {
    /// Defaults with the access token read from the environment
    pub fn from_env() -> Self {
        Self {
            access_token: AccessToken::from_env(),
            ..Self::default()
        }
    }

    pub fn with_access_token(mut self, token: AccessToken) -> Self {
        self.access_token = token;
        self
    }

    pub fn with_tile_profile(mut self, profile: TileLoadingProfile) -> Self {
        self.tiles = profile.resolve();
        self
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            map_height: DEFAULT_MAP_HEIGHT,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            controls_position: ControlPosition::TopRight,
            popup_close_on_click: false,
            tiles: TileLoadingConfig::default(),
            access_token: AccessToken::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_loading_profiles() {
        let balanced = TileLoadingProfile::Balanced.resolve();
        let low = TileLoadingProfile::LowBandwidth.resolve();

        assert_eq!(balanced, TileLoadingConfig::default());
        assert!(low.cache_size < balanced.cache_size);
        assert!(low.max_pending < balanced.max_pending);

        let custom = TileLoadingConfig {
            cache_size: 10,
            ..TileLoadingConfig::default()
        };
        assert_eq!(TileLoadingProfile::Custom(custom.clone()).resolve(), custom);
    }

    #[test]
    fn test_retry_delay() {
        let config = TileLoadingConfig::default();
        assert_eq!(config.retry_delay(1), Duration::from_millis(100));
        assert_eq!(config.retry_delay(3), Duration::from_millis(400));
        assert_eq!(config.max_attempts(), 3);

        let flat = TileLoadingConfig {
            exponential_backoff: false,
            ..config
        };
        assert_eq!(flat.retry_delay(3), Duration::from_millis(100));
    }

    #[test]
    fn test_access_token_is_trimmed_and_redacted() {
        let token = AccessToken::new("  pk.abcdef123  ");
        assert_eq!(token.as_str(), "pk.abcdef123");
        assert!(!format!("{:?}", token).contains("abcdef123"));
        assert!(AccessToken::new("   ").is_empty());
    }

    #[test]
    fn test_widget_config_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.map_height, 400.0);
        assert_eq!(config.controls_position, ControlPosition::TopRight);
        assert!(!config.popup_close_on_click);
        assert!(config.access_token.is_empty());
    }
}
