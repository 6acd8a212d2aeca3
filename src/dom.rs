use showcase_core::trigger::{ScrollLayout, TriggerRegion};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// CSS-pixel size of the canvas.
pub fn canvas_css_size(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (rect.width() as f32, rect.height() as f32)
}

pub fn viewport_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width as f32, height as f32)
}

pub fn scroll_y() -> f32 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0) as f32
}

pub fn query_html(document: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn set_progress(bar: &web::HtmlElement, ratio: f32) {
    let _ = bar
        .style()
        .set_property("transform", &format!("scaleX({})", ratio.clamp(0.0, 1.0)));
}

pub fn set_loader_offset(loader: &web::HtmlElement, offset: f32) {
    let _ = loader
        .style()
        .set_property("transform", &format!("translateX({}%)", offset * 100.0));
}

pub fn set_body_overflow_y(document: &web::Document, value: &str) {
    if let Some(body) = document.body() {
        let _ = body.style().set_property("overflow-y", value);
    }
}

pub fn mark_loader_error(loader: &web::HtmlElement) {
    let _ = loader
        .class_list()
        .add_1(crate::constants::LOADER_ERROR_CLASS);
}

/// Measures the viewport, the document's scroll limit and the document-space
/// rectangles of the given trigger selectors.
pub fn measure_layout(document: &web::Document, triggers: &[&str]) -> ScrollLayout {
    let (_, vh) = viewport_size();
    let scroll_height = document
        .document_element()
        .map(|el| el.scroll_height() as f32)
        .unwrap_or(vh);
    let scroll = scroll_y();
    let mut layout = ScrollLayout::new(vh, (scroll_height - vh).max(0.0));
    for &selector in triggers {
        match document.query_selector(selector).ok().flatten() {
            Some(el) => {
                let rect = el.get_bounding_client_rect();
                layout.insert(
                    selector,
                    TriggerRegion {
                        top: rect.top() as f32 + scroll,
                        height: rect.height() as f32,
                    },
                );
            }
            None => log::warn!("[dom] trigger {} not in document", selector),
        }
    }
    layout
}
