//! The map surface: a raster tile viewport the location widget draws onto.
//!
//! The widget only talks to [`MapSurface`]. [`TileSurface`] is the bundled
//! implementation; it resolves Mapbox style urls to raster tiles, downloads
//! them in the background and handles panning and zooming.

use crate::{
    core::{
        config::{AccessToken, WidgetConfig},
        geo::{Coordinate, Point},
        viewport::{ViewState, Viewport},
    },
    constants::SCROLL_ZOOM_FACTOR,
    tiles::{StyleTileSource, TileCache, TileKey, TileLoader, TileResult},
    MapError, Result,
};
use crossbeam_channel::Receiver;
use egui::{Color32, ColorImage, Rect, Response, Sense, TextureHandle, Ui};
use fxhash::FxHashSet as HashSet;
use std::time::Duration;

/// Interactive viewport the widget's marker, popup and controls sit on
pub trait MapSurface: Send {
    /// Draws the map for `style_url` into `rect` and handles pan/zoom input
    fn show(&mut self, ui: &mut Ui, rect: Rect, style_url: &str, token: &AccessToken) -> Response;

    fn viewport(&self) -> &Viewport;

    fn zoom_by(&mut self, delta: f64);

    fn fly_to(&mut self, center: Coordinate);

    /// Color drawn where no tile is available
    fn set_background(&mut self, color: Color32);

    /// Screen position of `coordinate` inside a surface drawn at `rect`
    fn project(&self, rect: Rect, coordinate: &Coordinate) -> egui::Pos2 {
        let p = self.viewport().coordinate_to_screen(coordinate);
        rect.min + egui::vec2(p.x as f32, p.y as f32)
    }
}

/// The style the surface is currently drawing. `source` is `None` when the
/// url could not be resolved.
struct ResolvedStyle {
    url: String,
    source: Option<StyleTileSource>,
}

pub struct TileSurface {
    id: egui::Id,
    viewport: Viewport,
    loader: TileLoader,
    results: Receiver<TileResult>,
    textures: TileCache<TextureHandle>,
    pending: HashSet<TileKey>,
    failed: HashSet<TileKey>,
    /// Downloads started and not yet reported back, stale ones included
    in_flight: usize,
    style: Option<ResolvedStyle>,
    background: Color32,
    warned_missing_token: bool,
}

impl TileSurface {
    pub fn new(initial_view: &ViewState, config: &WidgetConfig) -> Self {
        let (loader, results) = TileLoader::channel(config.tiles.clone());
        let viewport = Viewport::from_view_state(initial_view, Point::new(1.0, 1.0))
            .with_zoom_limits(config.min_zoom, config.max_zoom);

        Self {
            id: egui::Id::new("estate_map_surface"),
            viewport,
            textures: TileCache::new(config.tiles.cache_size),
            loader,
            results,
            pending: HashSet::default(),
            failed: HashSet::default(),
            in_flight: 0,
            style: None,
            background: Color32::from_rgb(230, 228, 224),
            warned_missing_token: false,
        }
    }

    /// Use a distinct id when several surfaces share one `Ui`
    pub fn with_id(mut self, id: impl Into<egui::Id>) -> Self {
        self.id = id.into();
        self
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Downloads still running, including those of a previous style
    pub fn in_flight_count(&self) -> usize {
        self.in_flight
    }

    pub fn cached_count(&self) -> usize {
        self.textures.len()
    }

    /// Re-resolves the tile source when the style url changes. In-flight
    /// downloads of the previous style are forgotten; their results are
    /// dropped on arrival but keep counting against `max_pending` until then.
    fn update_style(&mut self, style_url: &str, token: &AccessToken) {
        if self.style.as_ref().is_some_and(|s| s.url == style_url) {
            return;
        }

        self.pending.clear();
        self.failed.clear();

        let source = match StyleTileSource::from_style_url(style_url, token) {
            Ok(source) => {
                log::info!("map style set to {}", style_url);
                Some(source)
            }
            Err(e) => {
                log::error!("cannot render style: {}", e);
                None
            }
        };
        self.style = Some(ResolvedStyle {
            url: style_url.to_string(),
            source,
        });
    }

    fn drain_results(&mut self, ctx: &egui::Context) {
        while let Ok(TileResult { key, outcome }) = self.results.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            if !self.pending.remove(&key) {
                log::debug!("dropping stale tile {:?}", key.coord);
                continue;
            }

            match outcome.and_then(|bytes| decode_tile(&bytes)) {
                Ok(image) => {
                    let name = format!(
                        "tile_{}_{}_{}_{}",
                        key.style_url, key.coord.z, key.coord.x, key.coord.y
                    );
                    let texture = ctx.load_texture(name, image, egui::TextureOptions::LINEAR);
                    self.textures.put(key, texture);
                }
                Err(e) => {
                    log::warn!("tile {:?} unavailable: {}", key.coord, e);
                    self.failed.insert(key);
                }
            }
        }
    }

    fn handle_input(&mut self, ui: &Ui, response: &Response) {
        if response.dragged() {
            let delta = response.drag_delta();
            if delta.length_sq() > 0.0 {
                self.viewport
                    .pan_by(Point::new(-delta.x as f64, -delta.y as f64));
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.viewport.zoom_by(scroll as f64 * SCROLL_ZOOM_FACTOR);
            }
        }
    }

    fn paint_tiles(&mut self, ui: &Ui, rect: Rect, token: &AccessToken) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.background);

        if token.is_empty() {
            if !self.warned_missing_token {
                log::warn!("map access token missing; drawing without tiles");
                self.warned_missing_token = true;
            }
            return;
        }

        let Some(ResolvedStyle {
            url,
            source: Some(source),
        }) = self.style.as_ref()
        else {
            return;
        };

        let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        for tile in self.viewport.visible_tiles() {
            let key = TileKey::new(url.as_str(), tile.coord);
            let tile_rect = Rect::from_min_max(
                rect.min + egui::vec2(tile.min.x as f32, tile.min.y as f32),
                rect.min + egui::vec2(tile.max.x as f32, tile.max.y as f32),
            );

            if let Some(texture) = self.textures.get(&key) {
                painter.image(texture.id(), tile_rect, uv, Color32::WHITE);
            } else if !self.pending.contains(&key)
                && !self.failed.contains(&key)
                && self.in_flight < self.loader.config().max_pending
            {
                self.loader.start_download(source, key.clone());
                self.pending.insert(key);
                self.in_flight += 1;
            }
        }
    }
}

impl MapSurface for TileSurface {
    fn show(&mut self, ui: &mut Ui, rect: Rect, style_url: &str, token: &AccessToken) -> Response {
        // Drag only: clicks belong to the overlays drawn on top
        let response = ui.interact(rect, self.id, Sense::drag());

        self.viewport
            .set_size(Point::new(rect.width() as f64, rect.height() as f64));
        self.update_style(style_url, token);
        self.drain_results(ui.ctx());
        self.handle_input(ui, &response);
        self.paint_tiles(ui, rect, token);

        if self.in_flight > 0 {
            ui.ctx().request_repaint_after(Duration::from_millis(50));
        }

        response
    }

    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn zoom_by(&mut self, delta: f64) {
        self.viewport.zoom_by(delta);
    }

    fn fly_to(&mut self, center: Coordinate) {
        self.viewport.set_center(center);
    }

    fn set_background(&mut self, color: Color32) {
        self.background = color;
    }
}

fn decode_tile(bytes: &[u8]) -> Result<ColorImage> {
    let img = image::load_from_memory(bytes).map_err(|e| MapError::Decode(e.to_string()))?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
