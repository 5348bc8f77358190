// Host-side tests for sphere placement.
// The main crate is wasm-only, so we exercise globe-core directly.

use globe_core::layout::*;
use glam::Vec3;

const R: f32 = 2.15;

#[test]
fn every_point_lies_on_the_sphere() {
    for n in [1usize, 2, 3, 10, 66, 200] {
        let pts = fibonacci_sphere(n, R);
        assert_eq!(pts.len(), n);
        for p in &pts {
            assert!((p.length() - R).abs() < 1e-4, "n={} |p|={}", n, p.length());
        }
    }
}

#[test]
fn zero_points_is_clamped_to_one() {
    let pts = fibonacci_sphere(0, R);
    assert_eq!(pts.len(), 1);
    assert!((pts[0].length() - R).abs() < 1e-4);
}

#[test]
fn spiral_matches_closed_form() {
    let n = 4;
    let pts = fibonacci_sphere(n, 1.0);
    let inc = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    for (i, p) in pts.iter().enumerate() {
        let y = i as f32 * (2.0 / n as f32) - 1.0 + 1.0 / n as f32;
        let r = (1.0 - y * y).sqrt();
        let phi = i as f32 * inc;
        let expected = Vec3::new(phi.cos() * r, y, phi.sin() * r);
        assert!((*p - expected).length() < 1e-5);
    }
}

#[test]
fn layout_is_deterministic() {
    let min_angle = angular_footprint(0.41, R);
    let a = layout(66, R, min_angle, 32);
    let b = layout(66, R, min_angle, 32);
    assert_eq!(a, b);
}

#[test]
fn relaxation_separates_close_pair_and_keeps_radius() {
    let mut pts = vec![Vec3::X * R, (Vec3::X + Vec3::Z * 0.01).normalize() * R];
    let before = min_separation(&pts);
    let stats = relax(&mut pts, R, 0.5, 64);
    assert!(stats.iterations > 0);
    let after = min_separation(&pts);
    assert!(after > before);
    assert!(after > 0.49, "separation {}", after);
    for p in &pts {
        assert!((p.length() - R).abs() < 1e-4);
    }
}

#[test]
fn relaxation_splits_coincident_points() {
    let mut pts = vec![Vec3::Y * R, Vec3::Y * R];
    relax(&mut pts, R, 0.4, 64);
    assert!(min_separation(&pts) > 0.35);
    for p in &pts {
        assert!(p.is_finite());
        assert!((p.length() - R).abs() < 1e-4);
    }
}

#[test]
fn relaxation_is_a_noop_when_already_separated() {
    let mut pts = fibonacci_sphere(20, R);
    let original = pts.clone();
    let stats = relax(&mut pts, R, 0.05, 10);
    assert!(stats.converged);
    assert_eq!(stats.iterations, 1);
    for (a, b) in pts.iter().zip(&original) {
        assert!((*a - *b).length() < 1e-5);
    }
}

#[test]
fn relaxation_skips_trivial_inputs() {
    let mut one = vec![Vec3::Z * R];
    let stats = relax(&mut one, R, 1.0, 10);
    assert_eq!(stats.iterations, 0);
    assert!(stats.converged);
}

#[test]
fn footprint_grows_with_width() {
    assert_eq!(angular_footprint(0.0, R), 0.0);
    let small = angular_footprint(0.28, R);
    let large = angular_footprint(0.54, R);
    assert!(small > 0.0 && large > small);
    assert_eq!(angular_footprint(1.0, 0.0), 0.0);
}
