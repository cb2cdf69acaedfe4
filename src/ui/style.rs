use crate::location::MapStyleOption;
use egui::{Color32, FontId, Stroke};

/// Style configuration for the widget's overlays
#[derive(Debug, Clone)]
pub struct WidgetStyle {
    pub marker: MarkerStyle,
    pub popup: PopupStyle,
    pub controls: ControlStyle,
}

#[derive(Debug, Clone)]
pub struct MarkerStyle {
    /// Pin head radius
    pub radius: f32,
    pub fill: Color32,
    pub stroke: Stroke,
    pub hover_fill: Color32,
}

#[derive(Debug, Clone)]
pub struct PopupStyle {
    pub width: f32,
    pub image_height: f32,
    pub image_color: Color32,
    pub image_text_color: Color32,
    pub background_color: Color32,
    pub border_stroke: Stroke,
    pub rounding: f32,
    pub padding: f32,
    /// Height of the tip pointing at the marker
    pub tip_size: f32,
    pub title_font: FontId,
    pub body_font: FontId,
    pub text_color: Color32,
}

/// Style for control buttons
#[derive(Debug, Clone)]
pub struct ControlStyle {
    pub background_color: Color32,
    pub hover_color: Color32,
    pub active_color: Color32,
    pub text_color: Color32,
    pub border_stroke: Stroke,
    pub button_size: f32,
    pub margin: f32,
    /// Space between control groups
    pub group_spacing: f32,
    pub rounding: f32,
}

impl Default for WidgetStyle {
    fn default() -> Self {
        Self {
            marker: MarkerStyle::default(),
            popup: PopupStyle::default(),
            controls: ControlStyle::default(),
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 9.0,
            fill: Color32::from_rgba_unmultiplied(255, 0, 0, 128),
            stroke: Stroke::new(2.0, Color32::RED),
            hover_fill: Color32::from_rgba_unmultiplied(255, 0, 0, 200),
        }
    }
}

impl Default for PopupStyle {
    fn default() -> Self {
        Self {
            width: 280.0,
            image_height: 140.0,
            image_color: Color32::from_rgb(204, 204, 204),
            image_text_color: Color32::from_rgb(110, 110, 110),
            background_color: Color32::WHITE,
            border_stroke: Stroke::new(1.0, Color32::from_gray(180)),
            rounding: 6.0,
            padding: 10.0,
            tip_size: 10.0,
            title_font: FontId::proportional(16.0),
            body_font: FontId::proportional(12.0),
            text_color: Color32::from_rgb(33, 33, 33),
        }
    }
}

impl Default for ControlStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::WHITE,
            hover_color: Color32::from_gray(235),
            active_color: Color32::from_rgb(51, 181, 229),
            text_color: Color32::from_rgb(51, 51, 51),
            border_stroke: Stroke::new(1.0, Color32::from_gray(190)),
            button_size: 29.0,
            margin: 10.0,
            group_spacing: 10.0,
            rounding: 4.0,
        }
    }
}

/// Background colors shown under (or instead of) the tiles of each style
pub struct MapThemes;

impl MapThemes {
    pub fn background_for(style: Option<&MapStyleOption>) -> Color32 {
        match style.map(|s| s.name) {
            Some("Satellite") => Color32::from_rgb(38, 52, 40),
            Some("Light") => Color32::from_rgb(245, 245, 243),
            Some("Dark") => Color32::from_rgb(52, 52, 52),
            _ => Color32::from_rgb(230, 228, 224),
        }
    }
}
