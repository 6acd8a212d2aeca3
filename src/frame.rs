use crate::dom;
use crate::render;
use crate::scroll::{self, ScrollWiring};
use showcase_core::Showcase;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub showcase: Rc<RefCell<Showcase>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub loader: Option<web::HtmlElement>,
    pub gpu: Option<render::GpuState<'a>>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self, time_ms: f64) {
        let out = self.showcase.borrow_mut().frame(time_ms, dom::scroll_y());

        // page side effects run with the showcase released; they may dispatch events
        if let Some(y) = out.scroll_to {
            if let Some(w) = web::window() {
                w.scroll_to_with_x_and_y(0.0, y as f64);
            }
        }
        if let (Some(offset), Some(loader)) = (out.loader_offset, &self.loader) {
            dom::set_loader_offset(loader, offset);
        }
        if out.unlock_scroll {
            dom::set_body_overflow_y(&self.document, "auto");
            // overflow changes can move every trigger
            scroll::refresh_layout(&ScrollWiring {
                showcase: self.showcase.clone(),
                canvas: self.canvas.clone(),
                document: self.document.clone(),
            });
        }

        if let Some(g) = self.gpu.as_mut() {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let mut showcase = self.showcase.borrow_mut();
            let viewer = showcase.viewer_mut();
            if let Some(mesh) = viewer.asset().cloned() {
                g.sync_mesh(&mesh, viewer.asset_revision());
            }
            let graph = viewer.pass_graph().clone();
            if let Err(e) = g.render(&out.snapshot, &graph) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |time_ms: f64| {
        frame_ctx.borrow_mut().frame(time_ms);
        request_frame(&tick_clone);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&tick);
}
