use crate::dom;
use showcase_core::Showcase;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub showcase: Rc<RefCell<Showcase>>,
    pub document: web::Document,
}

/// Pointer parallax input. Only installed once the asset is in the scene.
pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_mousemove(&w);
    wire_mouseleave(&w);
}

fn wire_mousemove(w: &PointerWiring) {
    let showcase = w.showcase.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let (vw, vh) = dom::viewport_size();
        showcase
            .borrow_mut()
            .on_pointer_move(ev.client_x() as f32, ev.client_y() as f32, vw, vh);
    }) as Box<dyn FnMut(web::MouseEvent)>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_mouseleave(w: &PointerWiring) {
    let showcase = w.showcase.clone();
    let closure = Closure::wrap(Box::new(move || {
        showcase.borrow_mut().on_pointer_leave();
    }) as Box<dyn FnMut()>);
    if let Some(root) = w.document.document_element() {
        let _ = root.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
