//! Page scroll wiring: wheel and touch input into the smooth-scroll adapter,
//! native scroll re-sync, and layout re-measurement on resize.

use crate::dom;
use showcase_core::{DeltaMode, InputOutcome, InputSource, ScrollInput, Showcase};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct ScrollWiring {
    pub showcase: Rc<RefCell<Showcase>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
}

pub fn wire_scroll_handlers(w: ScrollWiring) {
    wire_wheel(&w);
    wire_touch(&w);
    wire_native_scroll(&w);
    wire_resize(&w);
}

#[inline]
fn delta_mode(mode: u32) -> DeltaMode {
    match mode {
        web::WheelEvent::DOM_DELTA_LINE => DeltaMode::Line,
        web::WheelEvent::DOM_DELTA_PAGE => DeltaMode::Page,
        _ => DeltaMode::Pixel,
    }
}

fn non_passive() -> web::AddEventListenerOptions {
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    opts
}

fn apply_outcome(ev: &web::Event, outcome: InputOutcome) {
    match outcome {
        InputOutcome::Native => {}
        InputOutcome::Blocked | InputOutcome::Smoothed => ev.prevent_default(),
    }
}

fn wire_wheel(w: &ScrollWiring) {
    let showcase = w.showcase.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let (_, vh) = dom::viewport_size();
        let input = ScrollInput {
            delta_x: ev.delta_x() as f32,
            delta_y: ev.delta_y() as f32,
            mode: delta_mode(ev.delta_mode()),
            ctrl_key: ev.ctrl_key(),
            viewport: vh,
        };
        let outcome = showcase
            .borrow_mut()
            .on_scroll_input(InputSource::Wheel, input);
        apply_outcome(&ev, outcome);
    }) as Box<dyn FnMut(web::WheelEvent)>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            closure.as_ref().unchecked_ref(),
            &non_passive(),
        );
    }
    closure.forget();
}

fn first_touch_y(ev: &web::TouchEvent) -> Option<f32> {
    ev.touches().get(0).map(|t| t.client_y() as f32)
}

fn wire_touch(w: &ScrollWiring) {
    let last_y = Rc::new(Cell::new(None::<f32>));

    let last_start = last_y.clone();
    let start = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        last_start.set(first_touch_y(&ev));
    }) as Box<dyn FnMut(web::TouchEvent)>);

    let showcase = w.showcase.clone();
    let last_move = last_y;
    let moved = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        let Some(y) = first_touch_y(&ev) else {
            return;
        };
        let delta = last_move.get().map(|prev| prev - y).unwrap_or(0.0);
        last_move.set(Some(y));
        let (_, vh) = dom::viewport_size();
        let input = ScrollInput {
            delta_y: delta,
            viewport: vh,
            ..ScrollInput::default()
        };
        let outcome = showcase
            .borrow_mut()
            .on_scroll_input(InputSource::Touch, input);
        apply_outcome(&ev, outcome);
    }) as Box<dyn FnMut(web::TouchEvent)>);

    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            start.as_ref().unchecked_ref(),
            &non_passive(),
        );
        let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            moved.as_ref().unchecked_ref(),
            &non_passive(),
        );
    }
    start.forget();
    moved.forget();
}

fn wire_native_scroll(w: &ScrollWiring) {
    let showcase = w.showcase.clone();
    let closure = Closure::wrap(Box::new(move || {
        showcase.borrow_mut().on_native_scroll(dom::scroll_y());
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Applies the current page geometry: canvas backing size, camera aspect and
/// scroll trigger ranges.
pub fn refresh_layout(w: &ScrollWiring) {
    dom::sync_canvas_backing_size(&w.canvas);
    let (cw, ch) = dom::canvas_css_size(&w.canvas);
    let mut showcase = w.showcase.borrow_mut();
    let layout = dom::measure_layout(&w.document, &showcase.config().triggers());
    showcase.set_viewport(cw, ch);
    showcase.set_layout(layout);
}

fn wire_resize(w: &ScrollWiring) {
    let wiring = w.clone();
    let closure = Closure::wrap(Box::new(move || {
        refresh_layout(&wiring);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
