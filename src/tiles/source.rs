use crate::core::config::AccessToken;
use crate::core::constants::{MAPBOX_STYLES_ENDPOINT, MAPBOX_STYLE_SCHEME, TILE_SIZE};
use crate::core::geo::TileCoord;
use crate::{MapError, Result};

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// Raster tiles rendered from a Mapbox style through the Static Tiles API
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTileSource {
    owner: String,
    style_id: String,
    token: AccessToken,
}

impl StyleTileSource {
    /// Resolves a `mapbox://styles/{owner}/{id}` url
    pub fn from_style_url(style_url: &str, token: &AccessToken) -> Result<Self> {
        let path = style_url
            .strip_prefix(MAPBOX_STYLE_SCHEME)
            .ok_or_else(|| MapError::InvalidStyle(style_url.to_string()))?;

        let mut parts = path.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(style_id), None) if !owner.is_empty() && !style_id.is_empty() => {
                Ok(Self {
                    owner: owner.to_string(),
                    style_id: style_id.to_string(),
                    token: token.clone(),
                })
            }
            _ => Err(MapError::InvalidStyle(style_url.to_string())),
        }
    }

    pub fn style_url(&self) -> String {
        format!("{}{}/{}", MAPBOX_STYLE_SCHEME, self.owner, self.style_id)
    }
}

impl TileSource for StyleTileSource {
    fn url(&self, coord: TileCoord) -> String {
        format!(
            "{}/{}/{}/tiles/{}/{}/{}/{}?access_token={}",
            MAPBOX_STYLES_ENDPOINT,
            self.owner,
            self.style_id,
            TILE_SIZE,
            coord.z,
            coord.x,
            coord.y,
            self.token.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_url_resolves_to_tile_endpoint() {
        let token = AccessToken::new("pk.test");
        let source =
            StyleTileSource::from_style_url("mapbox://styles/mapbox/streets-v11", &token).unwrap();
        assert_eq!(
            source.url(TileCoord::new(1443, 3286, 13)),
            "https://api.mapbox.com/styles/v1/mapbox/streets-v11/tiles/256/13/1443/3286?access_token=pk.test"
        );
        assert_eq!(source.style_url(), "mapbox://styles/mapbox/streets-v11");
    }

    #[test]
    fn test_invalid_style_urls() {
        let token = AccessToken::new("pk.test");
        for url in [
            "",
            "https://example.com/style.json",
            "mapbox://styles/mapbox",
            "mapbox://styles//dark-v10",
            "mapbox://styles/mapbox/dark-v10/extra",
        ] {
            let err = StyleTileSource::from_style_url(url, &token).unwrap_err();
            assert!(matches!(err, MapError::InvalidStyle(_)), "{}", url);
        }
    }
}
