//! Badge placement on the sphere surface.
//!
//! The base distribution is a golden-angle spiral which is deterministic in
//! `n`. An optional relaxation pass pushes apart any pair closer than a minimum
//! angular separation. Relaxation compares every pair on every iteration, so it
//! is O(n²) per pass: fine for catalog-sized globes (tens to low hundreds of
//! badges) but it needs a spatial index before n grows much further.

use glam::Vec3;

/// `n` points on a sphere of `radius` using the golden-angle spiral.
/// `n = 0` is treated as 1.
pub fn fibonacci_sphere(n: usize, radius: f32) -> Vec<Vec3> {
    let n = n.max(1);
    let off = 2.0 / n as f32;
    let inc = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    (0..n)
        .map(|i| {
            let y = i as f32 * off - 1.0 + off * 0.5;
            let r = (1.0 - y * y).max(0.0).sqrt();
            let phi = i as f32 * inc;
            Vec3::new(phi.cos() * r, y, phi.sin() * r) * radius
        })
        .collect()
}

/// Angle subtended at the sphere centre by a badge of `width` lying on the
/// surface. Used as the minimum separation during relaxation.
pub fn angular_footprint(width: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    2.0 * (width * 0.5 / radius).clamp(0.0, 1.0).asin()
}

/// Outcome of a relaxation run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelaxStats {
    pub iterations: usize,
    pub converged: bool,
}

/// Push apart points closer than `min_angle` radians, keeping them on the
/// sphere of `radius`. Stops after `max_iterations` passes or when no pair
/// violates the separation.
pub fn relax(points: &mut [Vec3], radius: f32, min_angle: f32, max_iterations: usize) -> RelaxStats {
    let n = points.len();
    if n < 2 || min_angle <= 0.0 || radius <= 0.0 {
        return RelaxStats {
            iterations: 0,
            converged: true,
        };
    }
    let mut units: Vec<Vec3> = points.iter().map(|p| p.normalize_or_zero()).collect();
    let mut push = vec![Vec3::ZERO; n];
    let step = crate::constants::RELAX_STEP;

    let mut stats = RelaxStats {
        iterations: 0,
        converged: false,
    };
    for iter in 0..max_iterations {
        push.iter_mut().for_each(|p| *p = Vec3::ZERO);
        let mut violated = false;
        for i in 0..n {
            for j in (i + 1)..n {
                let angle = units[i].dot(units[j]).clamp(-1.0, 1.0).acos();
                if angle >= min_angle {
                    continue;
                }
                violated = true;
                let amount = (min_angle - angle) * step;
                let (di, dj) = match (
                    tangent_away(units[i], units[j]),
                    tangent_away(units[j], units[i]),
                ) {
                    (Some(a), Some(b)) => (a, b),
                    // Coincident points: split along an arbitrary tangent.
                    _ => {
                        let t = units[i].any_orthonormal_vector();
                        (t, -t)
                    }
                };
                push[i] += di * amount;
                push[j] += dj * amount;
            }
        }
        stats.iterations = iter + 1;
        if !violated {
            stats.converged = true;
            break;
        }
        for (u, p) in units.iter_mut().zip(&push) {
            let moved = (*u + *p).normalize_or_zero();
            if moved != Vec3::ZERO {
                *u = moved;
            }
        }
    }
    if !stats.converged {
        log::debug!(
            "[layout] relaxation stopped after {} passes without converging",
            stats.iterations
        );
    }
    for (p, u) in points.iter_mut().zip(&units) {
        *p = *u * radius;
    }
    stats
}

// Unit tangent at `from` pointing away from `other`; `None` when the two
// directions coincide.
fn tangent_away(from: Vec3, other: Vec3) -> Option<Vec3> {
    let d = from - other;
    let t = d - from * d.dot(from);
    let len = t.length();
    (len > 1e-6).then(|| t / len)
}

/// Spiral layout refined by relaxation (`iterations = 0` skips refinement).
pub fn layout(n: usize, radius: f32, min_angle: f32, iterations: usize) -> Vec<Vec3> {
    let mut points = fibonacci_sphere(n, radius);
    if iterations > 0 {
        relax(&mut points, radius, min_angle, iterations);
    }
    points
}

/// Smallest pairwise angle between points, in radians (π for fewer than two).
pub fn min_separation(points: &[Vec3]) -> f32 {
    let mut best = std::f32::consts::PI;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let a = points[i]
                .normalize_or_zero()
                .dot(points[j].normalize_or_zero())
                .clamp(-1.0, 1.0)
                .acos();
            best = best.min(a);
        }
    }
    best
}
