use crate::badges::{BadgeJobs, SharedScene};
use crate::constants::{MAX_FRAME_DT_SEC, PIXEL_RATIO_EPSILON};
use crate::dom;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: SharedScene,
    pub jobs: BadgeJobs,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: render::GpuState<'a>,
    pub last_instant: Instant,
    /// Capped device pixel ratio the live textures were built for.
    pub pixel_ratio: f64,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32().min(MAX_FRAME_DT_SEC);

        self.sync_surface();

        let state = self.scene.borrow_mut().update(dt_sec);
        let scene = self.scene.borrow();
        match self.gpu.render(&state, scene.registry().badges()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("[gpu] surface lost; reconfiguring");
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {}
            Err(e) => log::error!("[gpu] render error: {:?}", e),
        }
    }

    // Propagate canvas size to the surface and camera; rebuild textures when
    // the pixel ratio changed.
    fn sync_surface(&mut self) {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        if (w, h) != self.gpu.size() {
            self.gpu.resize_if_needed(w, h);
        }
        if (w.max(1), h.max(1)) != self.scene.borrow().viewport().size() {
            self.scene.borrow_mut().resize(w, h);
        }
        let dpr = dom::pixel_ratio();
        if (dpr - self.pixel_ratio).abs() > PIXEL_RATIO_EPSILON {
            log::info!("[resize] pixel ratio {:.2} -> {:.2}; rebuilding badges", self.pixel_ratio, dpr);
            self.pixel_ratio = dpr;
            self.jobs.spawn_build(dpr);
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

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
