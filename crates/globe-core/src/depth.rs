//! Per-frame depth cueing: nearer badges are larger and more opaque.

use crate::config::GlobeConfig;
use crate::registry::Badge;
use glam::{Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthParams {
    /// Camera distance from the sphere centre.
    pub view_distance: f32,
    pub radius: f32,
    pub width_front: f32,
    pub width_back: f32,
    pub opacity_front: f32,
    pub opacity_back: f32,
    pub exponent: f32,
}

impl DepthParams {
    pub fn from_config(cfg: &GlobeConfig, view_distance: f32) -> Self {
        Self {
            view_distance,
            radius: cfg.radius,
            width_front: cfg.width_front,
            width_back: cfg.width_back,
            opacity_front: cfg.opacity_front,
            opacity_back: cfg.opacity_back,
            exponent: cfg.depth_exponent,
        }
    }
}

/// Smoothstepped nearness in `[0, 1]`: 1 at the front of the sphere, 0 at the
/// back.
pub fn depth_factor(distance: f32, view_distance: f32, radius: f32) -> f32 {
    let near = (view_distance - radius).max(1e-4);
    let far = view_distance + radius;
    let span = (far - near).max(1e-6);
    let t = (distance - near) / span;
    let c = (1.0 - t).clamp(0.0, 1.0);
    c * c * (3.0 - 2.0 * c)
}

/// Opacity and billboard size for a badge at `distance` from the eye.
pub fn shade(params: &DepthParams, distance: f32, aspect: f32) -> (f32, Vec2) {
    let f = depth_factor(distance, params.view_distance, params.radius);
    let opacity = params.opacity_back + (params.opacity_front - params.opacity_back) * f.powf(params.exponent);
    let width = params.width_back + (params.width_front - params.width_back) * f;
    let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    (opacity, Vec2::new(width, width / aspect))
}

/// Update opacity and scale of every badge for the current group rotation.
pub fn shade_badges<T>(params: &DepthParams, eye: Vec3, rotation: Quat, badges: &mut [Badge<T>]) {
    for badge in badges.iter_mut() {
        let world = rotation * badge.position();
        let (opacity, scale) = shade(params, eye.distance(world), badge.aspect);
        badge.opacity = opacity;
        badge.scale = scale;
    }
}
