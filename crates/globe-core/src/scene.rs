//! Per-frame step tying the registry, scheduler, depth cueing and camera
//! together.

use crate::catalog::{BadgeSpec, CatalogCycle};
use crate::config::GlobeConfig;
use crate::depth::{shade_badges, DepthParams};
use crate::layout::angular_footprint;
use crate::registry::{BadgeRegistry, BuildParams, PendingBuild, RefreshTicket, StaleBuild};
use crate::rotation::{RotationController, RotationMode};
use crate::texture::GeneratedTexture;
use crate::theme::{ModeTracker, ThemeMode};
use crate::viewport::Viewport;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

/// One billboard to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BillboardInstance {
    pub position: Vec3,
    pub size: Vec2,
    pub opacity: f32,
    /// Index into [`BadgeRegistry::badges`].
    pub badge: usize,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct RenderState {
    pub view: Mat4,
    pub proj: Mat4,
    pub eye: Vec3,
    /// Sorted far to near.
    pub instances: Vec<BillboardInstance>,
}

pub struct GlobeScene<T> {
    config: GlobeConfig,
    cycle: CatalogCycle<'static>,
    registry: BadgeRegistry<T>,
    rotation: RotationController,
    viewport: Viewport,
    theme: ModeTracker,
}

impl<T> GlobeScene<T> {
    /// `seed` picks the catalog starting offset for the session.
    pub fn new(config: GlobeConfig, catalog: &'static [BadgeSpec], seed: u64, mode: ThemeMode) -> Self {
        let mode = config.theme_override.unwrap_or(mode);
        let viewport = Viewport::new(config.radius + config.width_front * 0.5);
        Self {
            rotation: RotationController::new(config.speed),
            cycle: CatalogCycle::new(catalog, seed),
            registry: BadgeRegistry::new(),
            viewport,
            theme: ModeTracker::new(mode),
            config,
        }
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn registry(&self) -> &BadgeRegistry<T> {
        &self.registry
    }

    pub fn rotation(&self) -> &RotationController {
        &self.rotation
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn mode(&self) -> ThemeMode {
        self.theme.current()
    }

    /// Apply a newly resolved mode. Returns `true` when it differs from the
    /// current one, in which case textures should be refreshed. A query
    /// override pins the mode for the session.
    pub fn set_mode(&mut self, mode: ThemeMode) -> bool {
        let mode = self.config.theme_override.unwrap_or(mode);
        self.theme.observe(mode).is_some()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
        log::debug!(
            "[resize] {}x{} camera distance {:.2}",
            width,
            height,
            self.viewport.distance()
        );
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.rotation.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.rotation.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.rotation.pointer_up();
    }

    pub fn rotation_mode(&self) -> RotationMode {
        self.rotation.mode()
    }

    pub fn build_params(&self) -> BuildParams {
        BuildParams {
            density: self.config.density,
            radius: self.config.radius,
            min_angle: angular_footprint(self.config.mid_width(), self.config.radius),
            relax_iterations: self.config.relax_iterations,
            mode: self.theme.current(),
        }
    }

    pub fn begin_build(&mut self) -> PendingBuild<T> {
        let params = self.build_params();
        self.registry.begin_build(&self.cycle, &params)
    }

    pub fn commit(&mut self, pending: PendingBuild<T>) -> Result<usize, StaleBuild> {
        self.registry.commit(pending)
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.registry.begin_refresh(self.theme.current())
    }

    pub fn apply_refresh(&mut self, ticket: &RefreshTicket, index: usize, generated: GeneratedTexture<T>) -> bool {
        self.registry.apply_refresh(ticket, index, generated)
    }

    pub fn build_with(&mut self, make: impl FnMut(&BadgeSpec, ThemeMode) -> GeneratedTexture<T>) -> usize {
        let params = self.build_params();
        self.registry.build_with(&self.cycle, &params, make)
    }

    pub fn refresh_with(&mut self, make: impl FnMut(&BadgeSpec, ThemeMode) -> GeneratedTexture<T>) {
        let mode = self.theme.current();
        self.registry.refresh_with(mode, make);
    }

    /// Group rotation: pitch about X, then yaw about Y.
    pub fn group_rotation(&self) -> Quat {
        let s = self.rotation.state();
        Quat::from_euler(EulerRot::XYZ, s.pitch, s.yaw, 0.0)
    }

    /// Advance the scheduler by `dt` seconds and produce the frame.
    pub fn update(&mut self, dt: f32) -> RenderState {
        self.rotation.update(dt);
        let rotation = self.group_rotation();
        let eye = self.viewport.eye();
        let params = DepthParams::from_config(&self.config, self.viewport.distance());
        shade_badges(&params, eye, rotation, self.registry.badges_mut());

        let mut instances: Vec<(f32, BillboardInstance)> = self
            .registry
            .badges()
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let position = rotation * b.position();
                let inst = BillboardInstance {
                    position,
                    size: b.scale,
                    opacity: b.opacity,
                    badge: i,
                };
                (eye.distance_squared(position), inst)
            })
            .collect();
        instances.sort_by(|a, b| b.0.total_cmp(&a.0));

        RenderState {
            view: self.viewport.view_matrix(),
            proj: self.viewport.projection_matrix(),
            eye,
            instances: instances.into_iter().map(|(_, inst)| inst).collect(),
        }
    }
}
