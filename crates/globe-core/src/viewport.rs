//! Camera framing bound to the drawing surface.

use crate::constants::*;
use glam::{Mat4, Vec3};

/// Perspective camera on the `+Z` axis looking at the sphere centre.
#[derive(Clone, Debug)]
pub struct Viewport {
    width: u32,
    height: u32,
    fovy_radians: f32,
    znear: f32,
    zfar: f32,
    /// Radius that must stay in frame: sphere plus half the widest badge.
    bound_radius: f32,
    distance: f32,
}

impl Viewport {
    pub fn new(bound_radius: f32) -> Self {
        let mut vp = Self {
            width: 1,
            height: 1,
            fovy_radians: FOV_Y_DEG.to_radians(),
            znear: Z_NEAR,
            zfar: Z_FAR,
            bound_radius,
            distance: CAMERA_Z,
        };
        vp.reframe();
        vp
    }

    /// Update for a new surface size in pixels. Zero sizes are clamped to 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.reframe();
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Current camera distance from the origin.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect(), self.znear, self.zfar)
    }

    // The bound sphere must fit in the narrower of the two fields of view.
    fn reframe(&mut self) {
        let half_v = self.fovy_radians * 0.5;
        let half_h = (half_v.tan() * self.aspect()).atan();
        let half = half_v.min(half_h).max(1e-3);
        let fit = self.bound_radius / half.sin();
        self.distance = fit.max(CAMERA_Z);
    }
}
