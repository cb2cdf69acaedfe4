use estate_map::{
    prelude::*,
    ui::{widget::LocationWidgetExt, ControlStyle},
};

/// Integration tests driving the widget through headless egui frames
#[cfg(test)]
mod location_widget_tests {
    use super::*;
    use egui::{Context, Event, Modifiers, PointerButton, Pos2, RawInput, Rect, Vec2};

    fn offline_widget() -> LocationWidget {
        LocationWidget::with_config(WidgetConfig::default().with_access_token(AccessToken::default()))
    }

    /// Runs one frame and returns the rect the widget occupied
    fn frame(ctx: &Context, widget: &mut LocationWidget) -> Rect {
        let mut rect = Rect::NOTHING;
        let _ = ctx.run(RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading("Location");
                rect = ui.location_widget(widget).rect;
            });
        });
        rect
    }

    /// Runs one frame with `events`, advancing the clock by a frame
    fn frame_with(ctx: &Context, widget: &mut LocationWidget, events: Vec<Event>, time: &mut f64) {
        *time += 1.0 / 60.0;
        let input = RawInput {
            events,
            time: Some(*time),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading("Location");
                ui.location_widget(widget);
            });
        });
    }

    /// Hover, press and release the primary button at `pos` over three frames
    fn click_at(ctx: &Context, widget: &mut LocationWidget, pos: Pos2, time: &mut f64) {
        let button = |pressed| Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        };
        frame_with(ctx, widget, vec![Event::PointerMoved(pos)], time);
        frame_with(ctx, widget, vec![button(true)], time);
        frame_with(ctx, widget, vec![button(false)], time);
    }

    /// A point on the pin head, just above its tip
    fn marker_head(widget: &LocationWidget) -> Pos2 {
        widget.marker_screen_pos().expect("marker placed") - Vec2::new(0.0, 8.0)
    }

    fn style(name: &str) -> &'static MapStyleOption {
        MAP_STYLES.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn test_mount_shows_popup_and_streets() {
        let ctx = Context::default();
        let mut widget = offline_widget();

        let rect = frame(&ctx, &mut widget);
        assert!(rect.width() > 0.0);
        assert!(rect.height() >= widget.config().map_height);

        let popup = widget.state().popup().expect("popup visible at mount");
        assert_eq!(popup.name, "Clark Gable Estate");
        assert_eq!(popup.address, "222 W Chino Dr. Palm Springs, CA 92262");
        assert_eq!(widget.state().active_style_option(), Some(style("Streets")));
    }

    #[test]
    fn test_mount_centers_initial_view() {
        let ctx = Context::default();
        let mut widget = offline_widget();
        frame(&ctx, &mut widget);

        let viewport = widget.surface().viewport();
        assert_eq!(viewport.center, INITIAL_VIEW.center());
        assert_eq!(viewport.zoom, INITIAL_VIEW.zoom);
        assert_eq!(viewport.size.y, widget.config().map_height as f64);
    }

    #[test]
    fn test_marker_sits_below_center() {
        let ctx = Context::default();
        let mut widget = offline_widget();
        let rect = frame(&ctx, &mut widget);

        // The property is a little south of the initial camera center
        let marker = widget.marker_screen_pos().expect("marker placed");
        assert!(rect.contains(marker));
        let map_center_y = rect.top() + widget.config().map_height / 2.0;
        assert!(marker.y > map_center_y);
    }

    #[test]
    fn test_marker_toggle_across_frames() {
        let ctx = Context::default();
        let mut widget = offline_widget();
        frame(&ctx, &mut widget);

        widget.toggle_marker();
        frame(&ctx, &mut widget);
        assert!(!widget.state().popup_visible());

        widget.toggle_marker();
        frame(&ctx, &mut widget);
        assert_eq!(widget.state().popup(), Some(&MarkerInfo::property()));
    }

    #[test]
    fn test_dark_replaces_streets() {
        let ctx = Context::default();
        let mut widget = offline_widget();
        frame(&ctx, &mut widget);

        widget.select_style(style("Dark").url);
        frame(&ctx, &mut widget);

        assert!(widget.state().is_active(style("Dark")));
        assert!(!widget.state().is_active(style("Streets")));
        let active = MAP_STYLES
            .iter()
            .filter(|s| widget.state().is_active(s))
            .count();
        assert_eq!(active, 1);
    }

    #[test]
    fn test_satellite_twice_stays_active() {
        let ctx = Context::default();
        let mut widget = offline_widget();

        widget.select_style(style("Satellite").url);
        frame(&ctx, &mut widget);
        widget.select_style(style("Satellite").url);
        frame(&ctx, &mut widget);

        assert_eq!(widget.state().current_style(), "mapbox://styles/mapbox/satellite-v9");
    }

    #[test]
    fn test_unknown_style_still_renders() {
        let ctx = Context::default();
        let mut widget = offline_widget();

        widget.select_style("mapbox://styles/nobody/missing");
        let rect = frame(&ctx, &mut widget);

        assert!(rect.height() > 0.0);
        assert_eq!(widget.state().active_style_option(), None);
    }

    #[test]
    fn test_custom_marker_and_view() {
        let ctx = Context::default();
        let marker = MarkerInfo::new(Coordinate::new(40.7128, -74.0060), "Office", "1 Main St");
        let view = ViewState::new(40.7128, -74.0060, 15.0);
        let mut widget = LocationWidget::for_marker(marker.clone(), view, WidgetConfig::default());

        let rect = frame(&ctx, &mut widget);

        assert_eq!(widget.state().popup(), Some(&marker));
        let pos = widget.marker_screen_pos().unwrap();
        assert!((pos.x - rect.center().x).abs() < 1.0);
    }

    #[test]
    fn test_clicking_marker_toggles_popup() {
        let ctx = Context::default();
        let mut widget = offline_widget();
        let mut time = 0.0;
        frame_with(&ctx, &mut widget, vec![], &mut time);

        let head = marker_head(&widget);
        click_at(&ctx, &mut widget, head, &mut time);
        assert!(!widget.state().popup_visible());

        let head = marker_head(&widget);
        click_at(&ctx, &mut widget, head, &mut time);
        assert_eq!(widget.state().popup(), Some(&MarkerInfo::property()));
    }

    #[test]
    fn test_clicking_style_buttons_selects_style() {
        let ctx = Context::default();
        let mut widget = offline_widget();
        let mut time = 0.0;
        frame_with(&ctx, &mut widget, vec![], &mut time);

        let dark = widget.style_button_rect("Dark").expect("dark button drawn");
        click_at(&ctx, &mut widget, dark.center(), &mut time);
        assert!(widget.state().is_active(style("Dark")));
        assert!(!widget.state().is_active(style("Streets")));

        let satellite = widget.style_button_rect("Satellite").unwrap();
        click_at(&ctx, &mut widget, satellite.center(), &mut time);
        click_at(&ctx, &mut widget, satellite.center(), &mut time);
        assert_eq!(widget.state().active_style_option(), Some(style("Satellite")));
    }

    #[test]
    fn test_close_on_click_ignores_controls_and_card() {
        let ctx = Context::default();
        let config = WidgetConfig {
            popup_close_on_click: true,
            ..WidgetConfig::default()
        };
        let mut widget = LocationWidget::with_config(config);
        let mut time = 0.0;
        frame_with(&ctx, &mut widget, vec![], &mut time);

        let map = widget.map_rect().expect("map drawn");
        let zoom_in = MapControls::new(ControlPosition::TopRight).layout(map, &ControlStyle::default())[0].2;
        click_at(&ctx, &mut widget, zoom_in.center(), &mut time);
        assert_eq!(widget.surface().viewport().zoom, 14.0);
        assert!(widget.state().popup_visible());

        let card = widget.popup_rect().expect("popup drawn");
        click_at(&ctx, &mut widget, card.center(), &mut time);
        assert!(widget.state().popup_visible());

        click_at(&ctx, &mut widget, map.left_bottom() + Vec2::new(30.0, -30.0), &mut time);
        assert!(!widget.state().popup_visible());
    }

    #[test]
    fn test_map_click_keeps_popup_by_default() {
        let ctx = Context::default();
        let mut widget = offline_widget();
        let mut time = 0.0;
        frame_with(&ctx, &mut widget, vec![], &mut time);

        let map = widget.map_rect().unwrap();
        click_at(&ctx, &mut widget, map.left_bottom() + Vec2::new(30.0, -30.0), &mut time);
        assert!(widget.state().popup_visible());
    }
}
