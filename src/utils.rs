use crate::surface::{DisplayRect, PointerSample};
use crate::types::{Dimensions, Point};
use web_sys::{Element, MouseEvent, TouchEvent};

pub fn mouse_sample(event: &MouseEvent) -> PointerSample {
    PointerSample::mouse(event.client_x() as f64, event.client_y() as f64)
}

pub fn touch_sample(event: &TouchEvent) -> PointerSample {
    let touches = event.touches();
    let points = (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|touch| Point::new(touch.client_x() as f64, touch.client_y() as f64))
        .collect();

    PointerSample::Touch { touches: points }
}

/// Current on-screen box of `element` in CSS pixels.
pub fn display_rect(element: &Element) -> DisplayRect {
    let rect = element.get_bounding_client_rect();
    DisplayRect::new(
        Point::new(rect.left(), rect.top()),
        Dimensions::new(rect.width(), rect.height()),
    )
}

pub fn device_pixel_ratio() -> f64 {
    gloo_utils::window().device_pixel_ratio()
}

/// CSS for the stroke-width preview dot in the studio toolbar.
pub fn width_preview_style(width: f64, color: &str, opacity: f64) -> String {
    let size = width.min(40.0);
    format!(
        "width: {size}px; height: {size}px; background-color: {color}; opacity: {opacity};"
    )
}
