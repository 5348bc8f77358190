#![cfg(target_arch = "wasm32")]
use globe_core::{resolve_mode, GlobeConfig, GlobeScene, DEFAULT_CATALOG};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod badges;
mod constants;
mod dom;
mod events;
mod frame;
mod icons;
mod render;
mod texture;

use constants::CONTAINER_ID;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("globe-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let container = document
        .get_element_by_id(CONTAINER_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CONTAINER_ID))?;
    let canvas = dom::create_globe_canvas(&document, &container)?;

    // Maintain canvas internal pixel size to match CSS size * capped devicePixelRatio
    wire_canvas_resize(&canvas);

    let config = GlobeConfig::from_query(&dom::location_search());
    let mode = resolve_mode(&dom::read_theme_signals(&document));
    let seed: u64 = rand::random();
    log::info!("[theme] initial mode {}", mode);

    let mut scene = GlobeScene::new(config, DEFAULT_CATALOG, seed, mode);
    scene.resize(canvas.width(), canvas.height());
    let scene = Rc::new(RefCell::new(scene));

    let gpu = frame::init_gpu(&canvas)
        .await
        .ok_or_else(|| anyhow::anyhow!("rendering context unavailable"))?;
    let painter = texture::CanvasPainter::new(&document)?;

    let jobs = badges::BadgeJobs {
        scene: scene.clone(),
        painter: Rc::new(RefCell::new(painter)),
        uploader: gpu.uploader(),
    };
    let pixel_ratio = dom::pixel_ratio();
    jobs.spawn_build(pixel_ratio);

    events::wire_pointer_handlers(&canvas, &scene);
    if let Err(e) = events::wire_theme_observers(&document, &jobs) {
        // The globe still works; it just will not follow later theme changes.
        log::warn!("[theme] observers unavailable: {:?}", e);
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        jobs,
        canvas,
        gpu,
        last_instant: Instant::now(),
        pixel_ratio,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
