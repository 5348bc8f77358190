// Host-side tests for depth cueing and camera framing.

use globe_core::depth::*;
use globe_core::{GlobeConfig, Viewport};
use glam::Vec3;

fn params(view_distance: f32) -> DepthParams {
    DepthParams::from_config(&GlobeConfig::default(), view_distance)
}

#[test]
fn factor_is_one_at_front_and_zero_at_back() {
    let (d, r) = (6.0, 2.15);
    assert!((depth_factor(d - r, d, r) - 1.0).abs() < 1e-6);
    assert!(depth_factor(d + r, d, r).abs() < 1e-6);
    // Clamped outside the sphere's depth range.
    assert_eq!(depth_factor(0.0, d, r), 1.0);
    assert_eq!(depth_factor(100.0, d, r), 0.0);
}

#[test]
fn opacity_and_width_decrease_with_distance() {
    let p = params(6.0);
    let mut prev: Option<(f32, f32)> = None;
    let steps = 50;
    for i in 0..=steps {
        let d = 3.85 + 4.3 * i as f32 / steps as f32;
        let (opacity, size) = shade(&p, d, 1.5);
        if let Some((po, pw)) = prev {
            assert!(opacity <= po + 1e-6);
            assert!(size.x <= pw + 1e-6);
        }
        prev = Some((opacity, size.x));
    }
}

#[test]
fn extremes_hit_configured_limits() {
    let p = params(6.0);
    let (front_op, front) = shade(&p, 6.0 - 2.15, 2.0);
    assert!((front_op - p.opacity_front).abs() < 1e-5);
    assert!((front.x - p.width_front).abs() < 1e-5);
    assert!((front.y - p.width_front / 2.0).abs() < 1e-5);

    let (back_op, back) = shade(&p, 6.0 + 2.15, 2.0);
    assert!((back_op - p.opacity_back).abs() < 1e-5);
    assert!((back.x - p.width_back).abs() < 1e-5);
}

#[test]
fn invalid_aspect_is_treated_as_square() {
    let p = params(6.0);
    for aspect in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let (_, size) = shade(&p, 6.0, aspect);
        assert_eq!(size.x, size.y);
    }
}

#[test]
fn landscape_viewport_uses_minimum_distance() {
    let mut vp = Viewport::new(2.15 + 0.27);
    vp.resize(1600, 900);
    assert_eq!(vp.distance(), 6.0);
    assert_eq!(vp.eye(), Vec3::new(0.0, 0.0, 6.0));
    assert!((vp.aspect() - 1600.0 / 900.0).abs() < 1e-6);
}

#[test]
fn portrait_viewport_moves_camera_back_to_fit() {
    let bound = 2.15 + 0.27;
    let mut vp = Viewport::new(bound);
    vp.resize(400, 1000);
    assert!(vp.distance() > 6.0);
    // The bound sphere just touches the horizontal frustum planes.
    let half_h = ((55.0f32.to_radians() * 0.5).tan() * vp.aspect()).atan();
    assert!((vp.distance() * half_h.sin() - bound).abs() < 1e-4);
}

#[test]
fn zero_size_is_clamped() {
    let mut vp = Viewport::new(2.42);
    vp.resize(0, 0);
    assert_eq!(vp.size(), (1, 1));
    assert_eq!(vp.aspect(), 1.0);
}

#[test]
fn origin_projects_to_screen_centre() {
    let mut vp = Viewport::new(2.42);
    vp.resize(800, 600);
    let clip = vp.projection_matrix() * vp.view_matrix() * Vec3::ZERO.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}
