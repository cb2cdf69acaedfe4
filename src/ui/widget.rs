use crate::{
    core::{config::WidgetConfig, viewport::ViewState},
    geolocation::{Geolocator, Unavailable},
    location::{LocationState, MarkerInfo, INITIAL_VIEW},
    surface::{MapSurface, TileSurface},
    ui::{
        controls::{ControlAction, MapControls},
        popup::{InfoPopup, PopupAnchor},
        style::{MapThemes, MarkerStyle, WidgetStyle},
    },
};
use egui::{Pos2, Rect, Response, Sense, Shape, Ui, Vec2};

/// Property location widget
///
/// Shows the map surface with one marker on the property, an info popup that
/// the marker toggles, map controls in the top-right corner and a row of
/// base style buttons under the map.
///
/// # Examples
///
/// ```no_run
/// let mut widget = estate_map::LocationWidget::new();
/// # let ctx = egui::Context::default();
/// # let _ = ctx.run(Default::default(), |ctx| {
/// egui::CentralPanel::default().show(ctx, |ui| {
///     ui.heading("Location");
///     widget.show(ui);
/// });
/// # });
/// ```
pub struct LocationWidget {
    id: egui::Id,
    state: LocationState,
    config: WidgetConfig,
    initial_view: ViewState,
    surface: Box<dyn MapSurface>,
    geolocator: Box<dyn Geolocator>,
    controls: MapControls,
    style: WidgetStyle,
    fullscreen: bool,
    last_map_rect: Option<Rect>,
    last_popup_rect: Option<Rect>,
    last_style_buttons: Vec<(&'static str, Rect)>,
}

impl LocationWidget {
    /// The Clark Gable Estate with the access token taken from the environment
    pub fn new() -> Self {
        Self::with_config(WidgetConfig::from_env())
    }

    pub fn with_config(config: WidgetConfig) -> Self {
        Self::for_marker(MarkerInfo::property(), INITIAL_VIEW, config)
    }

    pub fn for_marker(marker: MarkerInfo, initial_view: ViewState, config: WidgetConfig) -> Self {
        let surface = TileSurface::new(&initial_view, &config);
        Self {
            id: egui::Id::new("estate_map_location"),
            state: LocationState::new(marker),
            controls: MapControls::new(config.controls_position),
            initial_view,
            surface: Box::new(surface),
            geolocator: Box::new(Unavailable),
            style: WidgetStyle::default(),
            fullscreen: false,
            last_map_rect: None,
            last_popup_rect: None,
            last_style_buttons: Vec::new(),
            config,
        }
    }

    /// Replace the map surface; it should start at [`Self::initial_view`]
    pub fn with_surface(mut self, surface: Box<dyn MapSurface>) -> Self {
        self.surface = surface;
        self
    }

    pub fn with_geolocator(mut self, geolocator: Box<dyn Geolocator>) -> Self {
        self.geolocator = geolocator;
        self
    }

    pub fn with_style(mut self, style: WidgetStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(mut self, id: impl Into<egui::Id>) -> Self {
        self.id = id.into();
        self
    }

    pub fn state(&self) -> &LocationState {
        &self.state
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn initial_view(&self) -> &ViewState {
        &self.initial_view
    }

    pub fn surface(&self) -> &dyn MapSurface {
        self.surface.as_ref()
    }

    /// Window fullscreen state as last reported by the viewport, or as last
    /// requested when the backend does not report it
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Marker click handler
    pub fn toggle_marker(&mut self) {
        self.state.toggle_marker();
    }

    /// Style button click handler
    pub fn select_style(&mut self, url: impl Into<String>) {
        self.state.select_style(url);
    }

    /// Where the marker was drawn in the last frame
    pub fn marker_screen_pos(&self) -> Option<Pos2> {
        self.last_map_rect
            .map(|rect| self.surface.project(rect, &self.state.marker().position()))
    }

    /// Map rect of the last frame
    pub fn map_rect(&self) -> Option<Rect> {
        self.last_map_rect
    }

    /// Popup card rect of the last frame, `None` while hidden
    pub fn popup_rect(&self) -> Option<Rect> {
        self.last_popup_rect
    }

    /// Style switcher button rect of the last frame
    pub fn style_button_rect(&self, name: &str) -> Option<Rect> {
        self.last_style_buttons
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, rect)| *rect)
    }

    pub fn show(&mut self, ui: &mut Ui) -> Response {
        ui.vertical(|ui| {
            let map_response = self.show_map(ui);
            ui.add_space(6.0);
            self.show_style_switcher(ui);
            map_response
        })
        .inner
    }

    fn show_map(&mut self, ui: &mut Ui) -> Response {
        if let Some(fullscreen) = ui.input(reported_fullscreen) {
            self.fullscreen = fullscreen;
        }

        if self.fullscreen {
            // The map covers the whole window, above the rest of the page
            let ctx = ui.ctx().clone();
            let screen = ctx.screen_rect();
            egui::Area::new(self.id.with("fullscreen"))
                .order(egui::Order::Foreground)
                .fixed_pos(screen.min)
                .show(&ctx, |ui| {
                    let (rect, _) = ui.allocate_exact_size(screen.size(), Sense::hover());
                    self.paint_map(ui, rect)
                })
                .inner
        } else {
            let size = Vec2::new(ui.available_width(), self.config.map_height);
            let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
            self.paint_map(ui, rect)
        }
    }

    fn paint_map(&mut self, ui: &mut Ui, rect: Rect) -> Response {
        self.last_map_rect = Some(rect);

        self.surface
            .set_background(MapThemes::background_for(self.state.active_style_option()));
        let response = self.surface.show(
            ui,
            rect,
            self.state.current_style(),
            &self.config.access_token,
        );

        let marker_pos = self.surface.project(rect, &self.state.marker().position());
        let marker_clicked = self.show_marker(ui, rect, marker_pos);
        if marker_clicked {
            self.state.toggle_marker();
        }

        self.last_popup_rect = self.state.popup().map(|info| {
            // Anchor at the pin's tip so the card opens above it
            InfoPopup::new(info, &self.style.popup)
                .anchor(PopupAnchor::Bottom)
                .show(ui, rect, marker_pos - Vec2::new(0.0, self.pin_height()))
                .rect
        });

        self.controls.set_fullscreen(self.fullscreen);
        let actions = self.controls.show(ui, rect, &self.style.controls);

        if !marker_clicked && self.config.popup_close_on_click && self.state.popup_visible() {
            let overlays: Vec<Rect> = self
                .controls
                .layout(rect, &self.style.controls)
                .into_iter()
                .map(|(_, _, button)| button)
                .chain(self.last_popup_rect)
                .collect();
            if Self::canvas_clicked(ui, rect, &overlays) {
                self.state.hide_popup();
                ui.ctx().request_repaint();
            }
        }

        for action in actions {
            self.apply(ui.ctx(), action);
        }

        response
    }

    /// A primary click on the bare map, not on one of the `overlays`
    fn canvas_clicked(ui: &Ui, rect: Rect, overlays: &[Rect]) -> bool {
        ui.input(|i| {
            i.pointer.primary_clicked()
                && i.pointer.interact_pos().is_some_and(|p| {
                    rect.contains(p) && !overlays.iter().any(|overlay| overlay.contains(p))
                })
        })
    }

    fn pin_height(&self) -> f32 {
        self.style.marker.radius * 2.6
    }

    /// Draws the pin with its tip on `tip` and returns whether it was clicked
    fn show_marker(&self, ui: &mut Ui, clip: Rect, tip: Pos2) -> bool {
        if !clip.contains(tip) {
            return false;
        }

        let MarkerStyle {
            radius,
            fill,
            stroke,
            hover_fill,
        } = self.style.marker;
        let head = tip - Vec2::new(0.0, self.pin_height() - radius);
        let hit = Rect::from_min_max(head - Vec2::splat(radius), tip + Vec2::new(radius, 0.0));
        let response = ui.interact(hit, self.id.with("marker"), Sense::click());

        let fill = if response.hovered() { hover_fill } else { fill };
        let painter = ui.painter_at(clip);
        painter.add(Shape::convex_polygon(
            vec![
                head + Vec2::new(-radius * 0.8, radius * 0.5),
                head + Vec2::new(radius * 0.8, radius * 0.5),
                tip,
            ],
            fill,
            stroke,
        ));
        painter.circle(head, radius, fill, stroke);
        painter.circle_filled(head, radius * 0.35, stroke.color);

        response.clicked()
    }

    fn show_style_switcher(&mut self, ui: &mut Ui) {
        let mut selected = None;
        let mut buttons = Vec::with_capacity(self.state.styles().len());
        ui.horizontal(|ui| {
            for option in self.state.styles() {
                let response = ui.selectable_label(self.state.is_active(option), option.name);
                buttons.push((option.name, response.rect));
                if response.clicked() {
                    selected = Some(option.url);
                }
            }
        });
        self.last_style_buttons = buttons;

        if let Some(url) = selected {
            self.state.select_style(url);
        }
    }

    fn apply(&mut self, ctx: &egui::Context, action: ControlAction) {
        match action {
            ControlAction::ZoomIn => self.surface.zoom_by(crate::constants::DEFAULT_ZOOM_DELTA),
            ControlAction::ZoomOut => self.surface.zoom_by(-crate::constants::DEFAULT_ZOOM_DELTA),
            ControlAction::ToggleFullscreen => {
                // The window manager may have changed it behind our back
                let current = ctx.input(reported_fullscreen).unwrap_or(self.fullscreen);
                self.fullscreen = !current;
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.fullscreen));
            }
            ControlAction::Geolocate => match self.geolocator.current_position() {
                Ok(position) => {
                    log::info!(
                        "centering on current position {:.5}, {:.5}",
                        position.latitude,
                        position.longitude
                    );
                    self.surface.fly_to(position);
                }
                Err(e) => log::warn!("geolocate failed: {}", e),
            },
        }
    }
}

/// Fullscreen state of the current viewport, if the backend reports one
fn reported_fullscreen(input: &egui::InputState) -> Option<bool> {
    input
        .raw
        .viewports
        .get(&input.raw.viewport_id)
        .and_then(|info| info.fullscreen)
}

impl Default for LocationWidget {
    fn default() -> Self {
        Self::new()
    }
}

/// Extension for showing the widget with `ui.location_widget(&mut widget)`
pub trait LocationWidgetExt {
    fn location_widget(&mut self, widget: &mut LocationWidget) -> Response;
}

impl LocationWidgetExt for Ui {
    fn location_widget(&mut self, widget: &mut LocationWidget) -> Response {
        widget.show(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::config::AccessToken, geolocation::FixedGeolocator, Coordinate};

    fn offline_widget() -> LocationWidget {
        LocationWidget::with_config(WidgetConfig::default().with_access_token(AccessToken::default()))
    }

    #[test]
    fn test_apply_zoom_actions() {
        let ctx = egui::Context::default();
        let mut widget = offline_widget();
        widget.apply(&ctx, ControlAction::ZoomIn);
        assert_eq!(widget.surface().viewport().zoom, 14.0);
        widget.apply(&ctx, ControlAction::ZoomOut);
        widget.apply(&ctx, ControlAction::ZoomOut);
        assert_eq!(widget.surface().viewport().zoom, 12.0);
    }

    #[test]
    fn test_fullscreen_toggles() {
        let ctx = egui::Context::default();
        let mut widget = offline_widget();
        widget.apply(&ctx, ControlAction::ToggleFullscreen);
        assert!(widget.is_fullscreen());
        widget.apply(&ctx, ControlAction::ToggleFullscreen);
        assert!(!widget.is_fullscreen());
    }

    /// One frame of a 1024x768 window whose backend reports `fullscreen`
    fn frame_in_window(ctx: &egui::Context, widget: &mut LocationWidget, fullscreen: Option<bool>) {
        let mut input = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(1024.0, 768.0))),
            ..Default::default()
        };
        input
            .viewports
            .entry(egui::ViewportId::ROOT)
            .or_default()
            .fullscreen = fullscreen;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                widget.show(ui);
            });
        });
    }

    #[test]
    fn test_fullscreen_follows_window_state() {
        let ctx = egui::Context::default();
        let mut widget = offline_widget();

        frame_in_window(&ctx, &mut widget, Some(true));
        assert!(widget.is_fullscreen());
        assert_eq!(widget.map_rect().unwrap().size(), Vec2::new(1024.0, 768.0));

        // Left fullscreen with Esc or the window manager
        frame_in_window(&ctx, &mut widget, Some(false));
        assert!(!widget.is_fullscreen());
        assert_eq!(widget.map_rect().unwrap().height(), widget.config().map_height);

        // The next press enters fullscreen again instead of requesting exit
        widget.apply(&ctx, ControlAction::ToggleFullscreen);
        assert!(widget.is_fullscreen());
    }

    #[test]
    fn test_toggle_uses_reported_state() {
        let ctx = egui::Context::default();
        let mut widget = offline_widget();
        widget.apply(&ctx, ControlAction::ToggleFullscreen);
        assert!(widget.is_fullscreen());

        // The window never went fullscreen
        frame_in_window(&ctx, &mut widget, Some(false));
        assert!(!widget.is_fullscreen());
        widget.apply(&ctx, ControlAction::ToggleFullscreen);
        assert!(widget.is_fullscreen());
    }

    #[test]
    fn test_geolocate_moves_view_only_with_position() {
        let ctx = egui::Context::default();
        let mut widget = offline_widget();
        widget.apply(&ctx, ControlAction::Geolocate);
        assert_eq!(widget.surface().viewport().center, INITIAL_VIEW.center());

        let here = Coordinate::new(34.05, -118.25);
        let mut widget = offline_widget().with_geolocator(Box::new(FixedGeolocator(here)));
        widget.apply(&ctx, ControlAction::Geolocate);
        assert_eq!(widget.surface().viewport().center, here);
        // Local state is untouched by controls
        assert!(widget.state().popup_visible());
    }
}
