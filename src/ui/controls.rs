use crate::{core::config::ControlPosition, ui::style::ControlStyle};
use egui::{Align2, FontId, Pos2, Rect, Sense, Ui, Vec2};

/// What a control click asks the widget to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    ZoomIn,
    ZoomOut,
    ToggleFullscreen,
    Geolocate,
}

/// Places a box of `size` in the `position` corner of `container`
pub fn anchor_rect(container: Rect, size: Vec2, position: ControlPosition, margin: f32) -> Rect {
    let min = match position {
        ControlPosition::TopLeft => container.left_top() + Vec2::splat(margin),
        ControlPosition::TopRight => {
            Pos2::new(container.right() - margin - size.x, container.top() + margin)
        }
        ControlPosition::BottomLeft => {
            Pos2::new(container.left() + margin, container.bottom() - margin - size.y)
        }
        ControlPosition::BottomRight => container.right_bottom() - Vec2::splat(margin) - size,
    };
    Rect::from_min_size(min, size)
}

/// Navigation (zoom in/out), fullscreen and geolocate buttons stacked in
/// one corner of the map
pub struct MapControls {
    position: ControlPosition,
    fullscreen: bool,
}

impl MapControls {
    /// Button groups top to bottom
    const GROUPS: [&'static [(ControlAction, &'static str)]; 3] = [
        &[(ControlAction::ZoomIn, "+"), (ControlAction::ZoomOut, "−")],
        &[(ControlAction::ToggleFullscreen, "⛶")],
        &[(ControlAction::Geolocate, "◎")],
    ];

    pub fn new(position: ControlPosition) -> Self {
        Self {
            position,
            fullscreen: false,
        }
    }

    pub fn position(&self) -> ControlPosition {
        self.position
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    /// Button rects inside `map_rect`, in the order of [`Self::GROUPS`]
    pub fn layout(&self, map_rect: Rect, style: &ControlStyle) -> Vec<(ControlAction, &'static str, Rect)> {
        let buttons: usize = Self::GROUPS.iter().map(|g| g.len()).sum();
        let gaps = (Self::GROUPS.len() - 1) as f32 * style.group_spacing;
        let column = Vec2::new(
            style.button_size,
            buttons as f32 * style.button_size + gaps,
        );
        let column_rect = anchor_rect(map_rect, column, self.position, style.margin);

        let mut y = column_rect.top();
        let mut placed = Vec::with_capacity(buttons);
        for group in Self::GROUPS {
            for &(action, label) in group {
                let rect = Rect::from_min_size(
                    Pos2::new(column_rect.left(), y),
                    Vec2::splat(style.button_size),
                );
                placed.push((action, label, rect));
                y += style.button_size;
            }
            y += style.group_spacing;
        }
        placed
    }

    /// Draws the buttons and returns the actions clicked this frame
    pub fn show(&mut self, ui: &mut Ui, map_rect: Rect, style: &ControlStyle) -> Vec<ControlAction> {
        let painter = ui.painter_at(map_rect);
        let id = ui.id().with("estate_map_controls");
        let mut clicked = Vec::new();

        for (action, label, rect) in self.layout(map_rect, style) {
            let response = ui.interact(rect, id.with(action as u8), Sense::click());

            let fill = if action == ControlAction::ToggleFullscreen && self.fullscreen {
                style.active_color
            } else if response.hovered() {
                style.hover_color
            } else {
                style.background_color
            };
            painter.rect_filled(rect, style.rounding, fill);
            painter.rect_stroke(rect, style.rounding, style.border_stroke);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(style.button_size * 0.6),
                style.text_color,
            );

            if response.clicked() {
                log::debug!("map control {:?} clicked", action);
                clicked.push(action);
            }
        }

        clicked
    }
}

impl Default for MapControls {
    fn default() -> Self {
        Self::new(ControlPosition::default())
    }
}
