use crate::constants::{CANVAS_STYLE, DARK_SCHEME_QUERY};
use globe_core::constants::MAX_PIXEL_RATIO;
use globe_core::{query_value, ThemeSignals};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Device pixel ratio clamped to `[1, MAX_PIXEL_RATIO]`.
pub fn pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|r| r.is_finite())
        .unwrap_or(1.0)
        .clamp(1.0, MAX_PIXEL_RATIO)
}

/// Raw `location.search`, empty when unavailable.
pub fn location_search() -> String {
    web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Create the drawing canvas and append it to `container`.
pub fn create_globe_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas
        .set_attribute("style", CANVAS_STYLE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Match the canvas backing store to its CSS size times the capped pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    let dpr = pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr).round() as u32;
    let h_px = (rect.height() * dpr).round() as u32;
    if canvas.width() != w_px.max(1) {
        canvas.set_width(w_px.max(1));
    }
    if canvas.height() != h_px.max(1) {
        canvas.set_height(h_px.max(1));
    }
}

pub fn prefers_dark() -> Option<bool> {
    web::window()
        .and_then(|w| w.match_media(DARK_SCHEME_QUERY).ok().flatten())
        .map(|m| m.matches())
}

// `dark`/`light` class on an element, if any.
fn class_marker(el: &web::Element) -> Option<&'static str> {
    let classes = el.class_list();
    if classes.contains("dark") {
        Some("dark")
    } else if classes.contains("light") {
        Some("light")
    } else {
        None
    }
}

/// Snapshot of every input the theme resolver looks at.
pub fn read_theme_signals(document: &web::Document) -> ThemeSignals {
    let mut signals = ThemeSignals {
        query: query_value(&location_search(), "theme"),
        prefers_dark: prefers_dark(),
        ..Default::default()
    };
    if let Some(root) = document.document_element() {
        if let Some(v) = root.get_attribute("data-theme") {
            signals.push_marker(v);
        }
        if let Some(m) = class_marker(&root) {
            signals.push_marker(m);
        }
    }
    if let Some(body) = document.body() {
        if let Some(m) = class_marker(&body) {
            signals.push_marker(m);
        }
    }
    signals
}
