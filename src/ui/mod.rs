pub mod controls;
pub mod popup;
pub mod style;
pub mod widget;

pub use controls::{anchor_rect, ControlAction, MapControls};

pub use popup::{popup_rect, InfoPopup, PopupAnchor};

pub use style::{ControlStyle, MapThemes, MarkerStyle, PopupStyle, WidgetStyle};

pub use widget::{LocationWidget, LocationWidgetExt};
