use crate::{location::MarkerInfo, ui::style::PopupStyle};
use egui::{Align2, Pos2, Rect, Response, Sense, Shape, Ui, Vec2};

/// Which side of the popup touches its anchor point. `Bottom` puts the card
/// above the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAnchor {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

/// Card rect for a popup of `size` anchored at `point`, leaving `tip` pixels
/// between the card edge and the point
pub fn popup_rect(point: Pos2, size: Vec2, anchor: PopupAnchor, tip: f32) -> Rect {
    let min = match anchor {
        PopupAnchor::Bottom => Pos2::new(point.x - size.x / 2.0, point.y - tip - size.y),
        PopupAnchor::Top => Pos2::new(point.x - size.x / 2.0, point.y + tip),
        PopupAnchor::Left => Pos2::new(point.x + tip, point.y - size.y / 2.0),
        PopupAnchor::Right => Pos2::new(point.x - tip - size.x, point.y - size.y / 2.0),
        PopupAnchor::Center => point - size / 2.0,
    };
    Rect::from_min_size(min, size)
}

/// Info card for the marker: image placeholder, property name and address
pub struct InfoPopup<'a> {
    info: &'a MarkerInfo,
    anchor: PopupAnchor,
    style: &'a PopupStyle,
}

impl<'a> InfoPopup<'a> {
    pub fn new(info: &'a MarkerInfo, style: &'a PopupStyle) -> Self {
        Self {
            info,
            anchor: PopupAnchor::Bottom,
            style,
        }
    }

    pub fn anchor(mut self, anchor: PopupAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    fn text_height(&self, ui: &Ui) -> f32 {
        let style = self.style;
        ui.fonts(|f| {
            let title = f.layout_no_wrap(
                self.info.name.clone(),
                style.title_font.clone(),
                style.text_color,
            );
            let body = f.layout_no_wrap(
                self.info.address.clone(),
                style.body_font.clone(),
                style.text_color,
            );
            title.size().y + body.size().y
        })
    }

    pub fn size(&self, ui: &Ui) -> Vec2 {
        let style = self.style;
        Vec2::new(
            style.width,
            style.image_height + self.text_height(ui) + style.padding * 3.0,
        )
    }

    /// Paints the card anchored at `point`, clipped to `clip`
    pub fn show(self, ui: &mut Ui, clip: Rect, point: Pos2) -> Response {
        let style = self.style;
        let rect = popup_rect(point, self.size(ui), self.anchor, style.tip_size);
        let painter = ui.painter_at(clip);

        painter.rect_filled(rect, style.rounding, style.background_color);
        painter.rect_stroke(rect, style.rounding, style.border_stroke);

        if self.anchor == PopupAnchor::Bottom {
            let half = style.tip_size;
            painter.add(Shape::convex_polygon(
                vec![
                    Pos2::new(point.x - half, rect.bottom()),
                    Pos2::new(point.x + half, rect.bottom()),
                    point,
                ],
                style.background_color,
                style.border_stroke,
            ));
        }

        let image_rect = Rect::from_min_size(
            rect.min + Vec2::splat(style.padding),
            Vec2::new(rect.width() - style.padding * 2.0, style.image_height),
        );
        painter.rect_filled(image_rect, style.rounding / 2.0, style.image_color);
        painter.text(
            image_rect.center(),
            Align2::CENTER_CENTER,
            "Property Image",
            style.body_font.clone(),
            style.image_text_color,
        );

        let title_pos = Pos2::new(image_rect.left(), image_rect.bottom() + style.padding);
        let title_rect = painter.text(
            title_pos,
            Align2::LEFT_TOP,
            &self.info.name,
            style.title_font.clone(),
            style.text_color,
        );
        painter.text(
            Pos2::new(image_rect.left(), title_rect.bottom()),
            Align2::LEFT_TOP,
            &self.info.address,
            style.body_font.clone(),
            style.text_color,
        );

        // Hover only: clicks on the card neither close it nor reach the map
        ui.interact(rect, ui.id().with("estate_map_popup"), Sense::hover())
    }
}
