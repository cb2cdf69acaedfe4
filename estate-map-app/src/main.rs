use estate_map::{ui::widget::LocationWidgetExt, LocationWidget, MapSurface, WidgetConfig};

/// Standalone viewer for the property location widget
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = WidgetConfig::from_env();
    if config.access_token.is_empty() {
        log::warn!("set MAPBOX_ACCESS_TOKEN to load map tiles");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 600.0])
            .with_title("Location"),
        ..Default::default()
    };

    eframe::run_native(
        "estate-map-app",
        options,
        Box::new(move |_cc| Box::new(LocationApp::new(config))),
    )?;

    Ok(())
}

struct LocationApp {
    widget: LocationWidget,
}

impl LocationApp {
    fn new(config: WidgetConfig) -> Self {
        Self {
            widget: LocationWidget::with_config(config),
        }
    }
}

impl eframe::App for LocationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let viewport = self.widget.surface().viewport();
            let style = self
                .widget
                .state()
                .active_style_option()
                .map_or("custom", |s| s.name);
            ui.label(format!(
                "Center: {:.4}, {:.4} | Zoom: {:.2} | Style: {}",
                viewport.center.latitude, viewport.center.longitude, viewport.zoom, style
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Location");
            ui.separator();
            ui.location_widget(&mut self.widget);
        });
    }
}
