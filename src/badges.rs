//! Concurrent badge texture jobs.
//!
//! Each slot of a build or refresh is its own `spawn_local` task: fetch the
//! icon, paint, read back, upload. Results go through the registry's
//! generation checks, so a task that finishes after a newer build or refresh
//! started is dropped without touching the visible globe.

use crate::icons;
use crate::render::{BadgeTexture, BadgeUploader};
use crate::texture::{BadgeBitmap, CanvasPainter};
use globe_core::constants::BASE_CANVAS_W;
use globe_core::{generate, icon_url, BadgeSpec, GeneratedTexture, GlobeScene, IconError, ThemeMode};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

pub type SharedScene = Rc<RefCell<GlobeScene<BadgeTexture>>>;

#[derive(Clone)]
pub struct BadgeJobs {
    pub scene: SharedScene,
    pub painter: Rc<RefCell<CanvasPainter>>,
    pub uploader: BadgeUploader,
}

impl BadgeJobs {
    /// Rebuild every badge at `pixel_ratio`. Supersedes any build in flight.
    pub fn spawn_build(&self, pixel_ratio: f64) {
        let pending = self.scene.borrow_mut().begin_build();
        let generation = pending.generation();
        let mode = pending.mode();
        let slots = pending.slots().to_vec();
        if slots.is_empty() {
            _ = self.scene.borrow_mut().commit(pending);
            return;
        }
        let pending = Rc::new(RefCell::new(Some(pending)));
        for slot in slots {
            let jobs = self.clone();
            let pending = pending.clone();
            spawn_local(async move {
                let url = icon_url(slot.spec.id, mode);
                let icon = icons::load_icon(&url).await;
                if jobs.scene.borrow().registry().latest_build() != generation {
                    return;
                }
                let generated = jobs.render(&slot.spec, mode, pixel_ratio, &url, icon);

                let mut guard = pending.borrow_mut();
                let Some(build) = guard.as_mut() else {
                    return;
                };
                build.fill(slot.index, generated);
                if !build.is_complete() {
                    return;
                }
                let Some(done) = guard.take() else {
                    return;
                };
                drop(guard);
                let committed = jobs.scene.borrow_mut().commit(done);
                match committed {
                    Ok(n) => {
                        log::info!("[build] generation {} live with {} badges", generation, n);
                        // The mode changed while this build was painting.
                        if jobs.scene.borrow().mode() != mode {
                            jobs.spawn_refresh(pixel_ratio);
                        }
                    }
                    Err(e) => log::debug!("[build] {}", e),
                }
            });
        }
    }

    /// Regenerate every live badge for the scene's current mode.
    pub fn spawn_refresh(&self, pixel_ratio: f64) {
        let ticket = Rc::new(self.scene.borrow_mut().begin_refresh());
        log::info!(
            "[theme] refreshing {} badges for {}",
            ticket.targets.len(),
            ticket.mode
        );
        for &(index, spec) in &ticket.targets {
            let jobs = self.clone();
            let ticket = ticket.clone();
            spawn_local(async move {
                let url = icon_url(spec.id, ticket.mode);
                let icon = icons::load_icon(&url).await;
                let generated = jobs.render(&spec, ticket.mode, pixel_ratio, &url, icon);
                _ = jobs.scene.borrow_mut().apply_refresh(&ticket, index, generated);
            });
        }
    }

    fn render(
        &self,
        spec: &BadgeSpec,
        mode: ThemeMode,
        pixel_ratio: f64,
        url: &str,
        icon: Result<web_sys::HtmlImageElement, IconError>,
    ) -> GeneratedTexture<BadgeTexture> {
        let mut painter = self.painter.borrow_mut();
        let first = generate(&mut *painter, spec, mode, BASE_CANVAS_W, pixel_ratio, icon);
        let aspect = first.aspect;
        let bitmap = match first.texture {
            Ok(bitmap) => bitmap,
            // A drawn icon can still taint the canvas; retry with the placeholder.
            Err(e) => {
                let retry = IconError::Draw {
                    url: url.to_string(),
                    reason: e.to_string(),
                };
                let second = generate(&mut *painter, spec, mode, BASE_CANVAS_W, pixel_ratio, Err(retry));
                second.texture.unwrap_or_else(|e| {
                    log::warn!("[icon] {}: placeholder readback failed: {}", spec.id, e);
                    BadgeBitmap::blank(1, 1)
                })
            }
        };
        GeneratedTexture {
            texture: self.uploader.upload(&bitmap, spec.id),
            aspect,
        }
    }
}
