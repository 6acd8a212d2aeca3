#![cfg(target_arch = "wasm32")]
use instant::Instant;
use showcase_core::{decode_glb, device, DeviceMode, Showcase, ShowcaseConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod loader;
mod render;
mod scroll;

fn detect_device_mode(window: &web::Window) -> DeviceMode {
    let navigator = window.navigator();
    let ua = navigator.user_agent().unwrap_or_default();
    let mode = device::detect(&ua, navigator.max_touch_points());
    log::info!("[init] device mode {:?}", mode);
    mode
}

fn read_config(canvas: &web::HtmlCanvasElement) -> ShowcaseConfig {
    let config = ShowcaseConfig::default();
    match canvas.get_attribute("data-asset") {
        Some(path) if !path.trim().is_empty() => config.with_asset_path(path.trim()),
        _ => config,
    }
}

struct Page {
    window: web::Window,
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    progress: Option<web::HtmlElement>,
    loader: Option<web::HtmlElement>,
}

fn find_page(canvas_id: &str) -> anyhow::Result<Page> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", canvas_id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let defaults = ShowcaseConfig::default();
    Ok(Page {
        progress: dom::query_html(&document, &defaults.progress_selector),
        loader: dom::query_html(&document, &defaults.loader_selector),
        window,
        document,
        canvas,
    })
}

async fn import_asset(showcase: Rc<RefCell<Showcase>>, page: &Page, pointer: events::PointerWiring) {
    let path = showcase.borrow().config().asset_path.clone();
    let started = Instant::now();
    log::info!("[asset] importing {}", path);

    let progress_bar = page.progress.clone();
    let progress_showcase = showcase.clone();
    let fetched = loader::fetch_bytes(&path, move |loaded, total| {
        let ratio = progress_showcase.borrow_mut().on_load_progress(loaded, total);
        if let (Some(r), Some(bar)) = (ratio, &progress_bar) {
            dom::set_progress(bar, r);
        }
    })
    .await;

    let result = fetched.and_then(|bytes| decode_glb(&bytes));
    let mesh = match result {
        Ok(mesh) => mesh,
        Err(e) => {
            showcase.borrow_mut().on_asset_failed(&e);
            if let Some(loader) = &page.loader {
                dom::mark_loader_error(loader);
            }
            return;
        }
    };

    let loaded = showcase.borrow_mut().on_asset_loaded(mesh);
    match loaded {
        Ok(ratio) => {
            if let Some(bar) = &page.progress {
                dom::set_progress(bar, ratio);
            }
            log::info!("[asset] ready in {:?}", started.elapsed());
            events::wire_pointer_handlers(pointer);
        }
        Err(e) => {
            log::error!("[asset] {}", e);
            if let Some(loader) = &page.loader {
                dom::mark_loader_error(loader);
            }
        }
    }
}

async fn init() -> anyhow::Result<()> {
    let page = find_page(&ShowcaseConfig::default().canvas_id)?;
    let config = read_config(&page.canvas);
    let mode = detect_device_mode(&page.window);
    let showcase = Rc::new(RefCell::new(Showcase::initialize(config, mode)?));

    // page scrolling stays locked until the loader leaves
    dom::set_body_overflow_y(&page.document, "hidden");

    let scroll_wiring = scroll::ScrollWiring {
        showcase: showcase.clone(),
        canvas: page.canvas.clone(),
        document: page.document.clone(),
    };
    scroll::refresh_layout(&scroll_wiring);
    scroll::wire_scroll_handlers(scroll_wiring);

    let gpu = frame::init_gpu(&page.canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        showcase: showcase.clone(),
        canvas: page.canvas.clone(),
        document: page.document.clone(),
        loader: page.loader.clone(),
        gpu,
    }));
    frame::start_loop(frame_ctx);

    let pointer = events::PointerWiring {
        showcase: showcase.clone(),
        document: page.document.clone(),
    };
    import_asset(showcase, &page, pointer).await;
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    spawn_local(async {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}
