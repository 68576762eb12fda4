// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Integrator & Spherical Boundary
// ─────────────────────────────────────────────────────────────────────
//! Semi-implicit Euler step, one per frame, no sub-stepping:
//!
//!   v ← (v + F) · VELOCITY_DAMPING
//!   p ← p + v
//!   if |p| > EXTENT:  p ← p · EXTENT/|p|,  v ← −0.5 · v
//!
//! The reflection reverses the velocity along its own direction rather
//! than mirroring it about the boundary normal.

use crate::params::{BOUNDARY_RESTITUTION, EXTENT, VELOCITY_DAMPING};

/// What happened to a particle during one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved freely inside the domain.
    Free,
    /// Crossed the boundary and was reflected.
    Reflected,
    /// Position or velocity went non-finite; particle reset to rest at the origin.
    Reset,
}

/// Integrate one particle in place. `position` and `velocity` are the
/// particle's three consecutive slots in the arena.
#[inline]
pub fn integrate(position: &mut [f32], velocity: &mut [f32], force: [f32; 3]) -> StepOutcome {
    for axis in 0..3 {
        velocity[axis] = (velocity[axis] + force[axis]) * VELOCITY_DAMPING;
        position[axis] += velocity[axis];
    }
    if !is_finite3(position) || !is_finite3(velocity) {
        position[..3].fill(0.0);
        velocity[..3].fill(0.0);
        return StepOutcome::Reset;
    }
    if contain(position, velocity) {
        StepOutcome::Reflected
    } else {
        StepOutcome::Free
    }
}

/// Spherical boundary. Returns `true` when the particle was outside.
///
/// The rescaled point satisfies `radius_sq(p) <= EXTENT²` exactly, so a
/// reflected particle is not reflected again on the next step.
#[inline]
pub fn contain(position: &mut [f32], velocity: &mut [f32]) -> bool {
    if radius_sq(position) <= EXTENT * EXTENT {
        return false;
    }
    let r = (position[..3].iter().map(|&c| c as f64 * c as f64).sum::<f64>()).sqrt();
    let scale = EXTENT as f64 / r;
    for axis in 0..3 {
        position[axis] = (position[axis] as f64 * scale) as f32;
        velocity[axis] *= BOUNDARY_RESTITUTION;
    }
    // f32 rounding can leave the point a hair outside
    while radius_sq(position) > EXTENT * EXTENT {
        for c in position[..3].iter_mut() {
            *c = shrink_one_ulp(*c);
        }
    }
    true
}

/// `x² + y² + z²` in f32, the boundary predicate's own arithmetic.
#[inline]
pub fn radius_sq(p: &[f32]) -> f32 {
    p[0] * p[0] + p[1] * p[1] + p[2] * p[2]
}

/// Next representable value toward zero.
#[inline]
fn shrink_one_ulp(x: f32) -> f32 {
    if x == 0.0 || !x.is_finite() {
        x
    } else {
        f32::from_bits(x.to_bits() - 1)
    }
}

#[inline]
pub fn is_finite3(v: &[f32]) -> bool {
    v[0].is_finite() && v[1].is_finite() && v[2].is_finite()
}

#[inline]
pub fn norm3(v: &[f32]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_step() {
        let mut p = [1.0, 2.0, 3.0];
        let mut v = [0.5, 0.0, -0.5];
        let out = integrate(&mut p, &mut v, [0.5, 0.0, 0.0]);
        assert_eq!(out, StepOutcome::Free);
        assert!((v[0] - 0.95).abs() < 1e-6);
        assert!((v[2] + 0.475).abs() < 1e-6);
        assert!((p[0] - 1.95).abs() < 1e-6);
        assert!((p[2] - 2.525).abs() < 1e-6);
    }

    #[test]
    fn test_zero_force_decays() {
        let mut p = [0.0; 3];
        let mut v = [1.0, -2.0, 0.5];
        for _ in 0..50 {
            let before = norm3(&v);
            integrate(&mut p, &mut v, [0.0; 3]);
            assert!(norm3(&v) <= before);
        }
    }

    #[test]
    fn test_boundary_rescale_and_reflect() {
        // 1.1 × EXTENT along a diagonal
        let d = 1.1 * EXTENT / 3f32.sqrt();
        let mut p = [d, d, d];
        let mut v = [0.3, -0.2, 0.7];
        let v_before = v;
        assert!(contain(&mut p, &mut v));
        assert!(radius_sq(&p) <= EXTENT * EXTENT);
        assert!(norm3(&p) > EXTENT - 1e-3);
        for axis in 0..3 {
            assert_eq!(v[axis], -0.5 * v_before[axis]);
        }
    }

    #[test]
    fn test_contained_points_stay_contained() {
        let mut rng = crate::rng::SimpleRng::new(2024);
        for _ in 0..100_000 {
            let mut p = [
                rng.next_centered() * 200.0,
                rng.next_centered() * 200.0,
                rng.next_centered() * 200.0,
            ];
            let mut v = [1.0, -1.0, 0.5];
            contain(&mut p, &mut v);
            assert!(radius_sq(&p) <= EXTENT * EXTENT, "{p:?} r2={}", radius_sq(&p));
            assert!(norm3(&p) <= EXTENT);
            let v_before = v;
            assert!(!contain(&mut p, &mut v), "reflected twice at {p:?}");
            assert_eq!(v, v_before);
        }
    }

    #[test]
    fn test_shrink_one_ulp() {
        assert!(shrink_one_ulp(1.0) < 1.0);
        assert!(shrink_one_ulp(-1.0) > -1.0);
        assert_eq!(shrink_one_ulp(0.0), 0.0);
    }

    #[test]
    fn test_inside_untouched() {
        let mut p = [EXTENT, 0.0, 0.0];
        let mut v = [1.0, 1.0, 1.0];
        assert!(!contain(&mut p, &mut v));
        assert_eq!(p, [EXTENT, 0.0, 0.0]);
        assert_eq!(v, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_integrate_reflects() {
        let mut p = [EXTENT - 0.1, 0.0, 0.0];
        let mut v = [2.0, 0.0, 0.0];
        let out = integrate(&mut p, &mut v, [0.0; 3]);
        assert_eq!(out, StepOutcome::Reflected);
        assert!(radius_sq(&p) <= EXTENT * EXTENT);
        assert!((v[0] + 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_reset() {
        let mut p = [1.0, 1.0, 1.0];
        let mut v = [0.0; 3];
        let out = integrate(&mut p, &mut v, [f32::NAN, 0.0, 0.0]);
        assert_eq!(out, StepOutcome::Reset);
        assert_eq!(p, [0.0; 3]);
        assert_eq!(v, [0.0; 3]);
    }

    #[test]
    fn test_infinite_force_reset() {
        let mut p = [1.0, 1.0, 1.0];
        let mut v = [0.0; 3];
        assert_eq!(integrate(&mut p, &mut v, [0.0, f32::INFINITY, 0.0]), StepOutcome::Reset);
    }

    #[test]
    fn test_works_on_arena_slices() {
        let mut positions = vec![0.0f32; 6];
        let mut velocities = vec![0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0];
        for (p, v) in positions
            .chunks_exact_mut(3)
            .zip(velocities.chunks_exact_mut(3))
        {
            integrate(p, v, [0.0; 3]);
        }
        assert_eq!(&positions[..3], &[0.0, 0.0, 0.0]);
        assert!((positions[3] - 0.95).abs() < 1e-6);
    }
}
