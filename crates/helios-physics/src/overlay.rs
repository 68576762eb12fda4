// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Mode Overlay Forces
// ─────────────────────────────────────────────────────────────────────
//! Geometric forces layered on top of the standing wave, selected by
//! the active `Mode`:
//!
//!   - Crystal:  polar-angle snapping (120°, 60°) + triangular lattice
//!   - Harmonic: comma spiral about Z + perfect-fifth overlay
//!   - Topology: trefoil-knot attractor + torus containment
//!
//! Every overlay is a pure function of position, logical time, flags
//! and the particle's wave arguments. Sub-feature forces sum; disabled
//! sub-features contribute exactly zero.

use std::f32::consts::TAU;

use helios_types::{CrystalExtensions, Extensions, HarmonicExtensions, Mode, TopologyExtensions};

use crate::params::{
    COMMA_SPIRAL_RATE, COMMA_SPIRAL_STRENGTH, CRYSTAL_SNAP_STRENGTH, FIFTH_RATIO, FIFTH_STRENGTH,
    LATTICE_SPACING, LATTICE_STRENGTH, PYTHAGOREAN_COMMA, TORUS_MAJOR_RADIUS, TORUS_MINOR_RADIUS,
    TORUS_STRENGTH, TREFOIL_SCALE, TREFOIL_STRENGTH,
};

const ZERO: [f32; 3] = [0.0, 0.0, 0.0];

/// Per-particle inputs shared by all overlays.
#[derive(Debug, Clone, Copy)]
pub struct OverlayInput {
    pub position: [f32; 3],
    /// Standing-wave arguments `(w_x, w_y, w_z)` at `position`.
    pub waves: [f32; 3],
    /// Cycle position plus elapsed fraction of the current tick.
    pub logical_time: f32,
}

/// Overlay force for the active mode. `Standard` has none.
#[inline]
pub fn overlay_force(mode: Mode, extensions: &Extensions, input: &OverlayInput) -> [f32; 3] {
    match mode {
        Mode::Standard => ZERO,
        Mode::Crystal => crystal_force(input.position, &extensions.crystal),
        Mode::Harmonic => harmonic_force(input, &extensions.harmonic),
        Mode::Topology => topology_force(input.position, &extensions.topology),
    }
}

// ── Crystal ───────────────────────────────────────────────────────────

pub fn crystal_force(position: [f32; 3], flags: &CrystalExtensions) -> [f32; 3] {
    let mut force = ZERO;
    if flags.three_fold {
        add_assign(&mut force, angular_snap(position, 3));
    }
    if flags.six_fold {
        add_assign(&mut force, angular_snap(position, 6));
    }
    if flags.lattice {
        add_assign(&mut force, lattice_pull(position));
    }
    force
}

/// Spring from `(x, y)` toward the same radius at the nearest multiple
/// of `360° / fold`. Z is untouched.
pub fn angular_snap(position: [f32; 3], fold: u32) -> [f32; 3] {
    let [x, y, _] = position;
    let radius = x.hypot(y);
    let angle = y.atan2(x);
    let step = TAU / fold as f32;
    let target = (angle / step).round() * step;
    let (ts, tc) = target.sin_cos();
    [
        (radius * tc - x) * CRYSTAL_SNAP_STRENGTH,
        (radius * ts - y) * CRYSTAL_SNAP_STRENGTH,
        0.0,
    ]
}

/// Nearest node of the triangular lattice with basis
/// `(s, 0)`, `(s/2, s·√3/2)` to `(x, y)`.
pub fn nearest_lattice_node(x: f32, y: f32) -> (f32, f32) {
    let s = LATTICE_SPACING;
    let row_height = s * 3f32.sqrt() * 0.5;
    let j = y / row_height;
    let i = x / s - 0.5 * j;

    let mut best = (0.0, 0.0);
    let mut best_d2 = f32::INFINITY;
    for ci in [i.floor(), i.ceil()] {
        for cj in [j.floor(), j.ceil()] {
            let nx = (ci + 0.5 * cj) * s;
            let ny = cj * row_height;
            let d2 = (nx - x).powi(2) + (ny - y).powi(2);
            if d2 < best_d2 {
                best_d2 = d2;
                best = (nx, ny);
            }
        }
    }
    best
}

pub fn lattice_pull(position: [f32; 3]) -> [f32; 3] {
    let [x, y, _] = position;
    let (nx, ny) = nearest_lattice_node(x, y);
    [(nx - x) * LATTICE_STRENGTH, (ny - y) * LATTICE_STRENGTH, 0.0]
}

// ── Harmonic ──────────────────────────────────────────────────────────

pub fn harmonic_force(input: &OverlayInput, flags: &HarmonicExtensions) -> [f32; 3] {
    let mut force = ZERO;
    if flags.comma_spiral {
        add_assign(&mut force, comma_spiral(input.position, input.logical_time));
    }
    if flags.perfect_fifth {
        add_assign(&mut force, perfect_fifth(input.waves));
    }
    force
}

/// Tangential push about Z whose strength swings sinusoidally with
/// logical time at a comma-detuned rate.
pub fn comma_spiral(position: [f32; 3], logical_time: f32) -> [f32; 3] {
    let [x, y, _] = position;
    let strength =
        COMMA_SPIRAL_STRENGTH * (logical_time * COMMA_SPIRAL_RATE * PYTHAGOREAN_COMMA).sin();
    [-y * strength, x * strength, 0.0]
}

/// `FIFTH_STRENGTH · sin(1.5 · w)` per axis.
pub fn perfect_fifth(waves: [f32; 3]) -> [f32; 3] {
    waves.map(|w| FIFTH_STRENGTH * (FIFTH_RATIO * w).sin())
}

// ── Topology ──────────────────────────────────────────────────────────

pub fn topology_force(position: [f32; 3], flags: &TopologyExtensions) -> [f32; 3] {
    let mut force = ZERO;
    if flags.trefoil {
        add_assign(&mut force, trefoil_pull(position));
    }
    if flags.torus {
        add_assign(&mut force, torus_containment(position));
    }
    force
}

/// Trefoil knot point at parameter `t`:
/// `(sin t + 2 sin 2t, cos t − 2 cos 2t, −sin 3t) · TREFOIL_SCALE`.
pub fn trefoil_point(t: f32) -> [f32; 3] {
    [
        (t.sin() + 2.0 * (2.0 * t).sin()) * TREFOIL_SCALE,
        (t.cos() - 2.0 * (2.0 * t).cos()) * TREFOIL_SCALE,
        -(3.0 * t).sin() * TREFOIL_SCALE,
    ]
}

/// Spring toward the trefoil point parameterised by the particle's own
/// XY polar angle. O(1); not the true nearest point.
pub fn trefoil_pull(position: [f32; 3]) -> [f32; 3] {
    let t = position[1].atan2(position[0]);
    let target = trefoil_point(t);
    [
        (target[0] - position[0]) * TREFOIL_STRENGTH,
        (target[1] - position[1]) * TREFOIL_STRENGTH,
        (target[2] - position[2]) * TREFOIL_STRENGTH,
    ]
}

/// Nearest point on the torus centre-line circle (radius R in the XY
/// plane). On the Z axis the ring point falls back to +X.
pub fn torus_ring_point(position: [f32; 3]) -> [f32; 3] {
    let [x, y, _] = position;
    let rho = x.hypot(y);
    if rho <= f32::EPSILON {
        return [TORUS_MAJOR_RADIUS, 0.0, 0.0];
    }
    let s = TORUS_MAJOR_RADIUS / rho;
    [x * s, y * s, 0.0]
}

/// Pull particles outside the torus back onto its surface; zero inside.
pub fn torus_containment(position: [f32; 3]) -> [f32; 3] {
    let ring = torus_ring_point(position);
    let d = [
        position[0] - ring[0],
        position[1] - ring[1],
        position[2] - ring[2],
    ];
    let dist = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
    if dist <= TORUS_MINOR_RADIUS {
        return ZERO;
    }
    let s = TORUS_MINOR_RADIUS / dist;
    [
        (ring[0] + d[0] * s - position[0]) * TORUS_STRENGTH,
        (ring[1] + d[1] * s - position[1]) * TORUS_STRENGTH,
        (ring[2] + d[2] * s - position[2]) * TORUS_STRENGTH,
    ]
}

#[inline]
fn add_assign(acc: &mut [f32; 3], f: [f32; 3]) {
    acc[0] += f[0];
    acc[1] += f[1];
    acc[2] += f[2];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::EXTENT;

    fn input(position: [f32; 3]) -> OverlayInput {
        OverlayInput {
            position,
            waves: [0.3, 1.1, -0.7],
            logical_time: 3.25,
        }
    }

    fn polar(r: f32, deg: f32) -> [f32; 3] {
        let a = deg.to_radians();
        [r * a.cos(), r * a.sin(), 0.0]
    }

    fn angle_deg(x: f32, y: f32) -> f32 {
        y.atan2(x).to_degrees()
    }

    #[test]
    fn test_standard_has_no_overlay() {
        let mut ext = Extensions::default();
        ext.crystal.three_fold = true;
        ext.topology.torus = true;
        assert_eq!(overlay_force(Mode::Standard, &ext, &input([40.0, 1.0, 30.0])), ZERO);
    }

    #[test]
    fn test_no_flags_no_force() {
        let ext = Extensions::default();
        for mode in [Mode::Crystal, Mode::Harmonic, Mode::Topology] {
            assert_eq!(overlay_force(mode, &ext, &input([45.0, -20.0, 30.0])), ZERO);
        }
    }

    #[test]
    fn test_three_fold_pulls_toward_zero_degrees() {
        let flags = CrystalExtensions {
            three_fold: true,
            ..Default::default()
        };
        let p = polar(20.0, 10.0);
        let f = crystal_force(p, &flags);

        // Tangential component points toward decreasing angle
        let a = 10f32.to_radians();
        let tangential = -f[0] * a.sin() + f[1] * a.cos();
        assert!(tangential < 0.0, "tangential={tangential}");

        // Force aims at the 0° point, not the 120° one
        let to_zero = [20.0 - p[0], 0.0 - p[1]];
        let t120 = polar(20.0, 120.0);
        let to_120 = [t120[0] - p[0], t120[1] - p[1]];
        let cos_sim = |u: [f32; 2]| {
            (f[0] * u[0] + f[1] * u[1]) / (f[0].hypot(f[1]) * u[0].hypot(u[1]))
        };
        assert!(cos_sim(to_zero) > 0.99);
        assert!(cos_sim(to_120) < cos_sim(to_zero));

        // Applying the force moves the angle toward 0°
        let moved = [p[0] + f[0] * 100.0, p[1] + f[1] * 100.0];
        let new_angle = angle_deg(moved[0], moved[1]);
        assert!(new_angle < 10.0 && new_angle > -1.0, "angle={new_angle}");
    }

    #[test]
    fn test_three_fold_snaps_near_120() {
        let f = angular_snap(polar(20.0, 110.0), 3);
        let a = 110f32.to_radians();
        let tangential = -f[0] * a.sin() + f[1] * a.cos();
        assert!(tangential > 0.0);
    }

    #[test]
    fn test_six_fold_target() {
        // 50° is nearest 60° under six-fold, nearest 0° under three-fold
        let p = polar(20.0, 50.0);
        let a = 50f32.to_radians();
        let tang = |f: [f32; 3]| -f[0] * a.sin() + f[1] * a.cos();
        assert!(tang(angular_snap(p, 6)) > 0.0);
        assert!(tang(angular_snap(p, 3)) < 0.0);
    }

    #[test]
    fn test_snap_on_axis_is_zero() {
        let f = angular_snap([30.0, 0.0, 5.0], 3);
        assert!(f.iter().all(|c| c.abs() < 1e-6));
    }

    #[test]
    fn test_snap_at_origin_finite() {
        let f = crystal_force(
            [0.0, 0.0, 0.0],
            &CrystalExtensions {
                three_fold: true,
                six_fold: true,
                lattice: true,
            },
        );
        assert!(f.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_lattice_nodes() {
        let s = LATTICE_SPACING;
        let h = s * 3f32.sqrt() * 0.5;
        assert_eq!(nearest_lattice_node(0.1, -0.1), (0.0, 0.0));
        let (nx, ny) = nearest_lattice_node(0.5 * s + 0.2, h - 0.3);
        assert!((nx - 0.5 * s).abs() < 1e-4 && (ny - h).abs() < 1e-4);
        let (nx, ny) = nearest_lattice_node(-s + 0.4, 0.2);
        assert!((nx + s).abs() < 1e-4 && ny.abs() < 1e-4);
    }

    #[test]
    fn test_lattice_node_is_nearest() {
        // Brute force over a patch of nodes
        let s = LATTICE_SPACING;
        let h = s * 3f32.sqrt() * 0.5;
        for k in 0..200 {
            let x = (k as f32 * 1.37).sin() * EXTENT;
            let y = (k as f32 * 0.91).cos() * EXTENT;
            let (nx, ny) = nearest_lattice_node(x, y);
            let d_best = (nx - x).hypot(ny - y);
            for j in -6..=6 {
                for i in -8..=8 {
                    let cx = (i as f32 + 0.5 * j as f32) * s;
                    let cy = j as f32 * h;
                    assert!(d_best <= (cx - x).hypot(cy - y) + 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_lattice_pull_direction() {
        let f = lattice_pull([1.0, -2.0, 9.0]);
        assert!(f[0] < 0.0 && f[1] > 0.0 && f[2] == 0.0);
    }

    #[test]
    fn test_crystal_features_sum() {
        let p = polar(25.0, 37.0);
        let all = crystal_force(
            p,
            &CrystalExtensions {
                three_fold: true,
                six_fold: true,
                lattice: true,
            },
        );
        let sum = [angular_snap(p, 3), angular_snap(p, 6), lattice_pull(p)]
            .iter()
            .fold(ZERO, |mut acc, f| {
                add_assign(&mut acc, *f);
                acc
            });
        for i in 0..3 {
            assert!((all[i] - sum[i]).abs() < 1e-7);
        }
    }

    #[test]
    fn test_comma_spiral_is_tangential() {
        let p = [12.0, -5.0, 3.0];
        let f = comma_spiral(p, 2.0);
        assert!((f[0] * p[0] + f[1] * p[1]).abs() < 1e-6);
        assert_eq!(f[2], 0.0);
    }

    #[test]
    fn test_comma_spiral_oscillates() {
        let p = [10.0, 0.0, 0.0];
        let period = TAU / (COMMA_SPIRAL_RATE * PYTHAGOREAN_COMMA);
        let a = comma_spiral(p, period * 0.25)[1];
        let b = comma_spiral(p, period * 0.75)[1];
        assert!(a > 0.0 && b < 0.0);
        assert!(comma_spiral(p, 0.0)[1].abs() < 1e-9);
    }

    #[test]
    fn test_perfect_fifth() {
        let f = perfect_fifth([0.0, std::f32::consts::PI / 3.0, -std::f32::consts::PI / 3.0]);
        assert_eq!(f[0], 0.0);
        assert!((f[1] - FIFTH_STRENGTH).abs() < 1e-6);
        assert!((f[2] + FIFTH_STRENGTH).abs() < 1e-6);
    }

    #[test]
    fn test_harmonic_uses_waves_and_time() {
        let flags = HarmonicExtensions {
            comma_spiral: true,
            perfect_fifth: true,
        };
        let inp = input([10.0, 4.0, -2.0]);
        let f = harmonic_force(&inp, &flags);
        let a = comma_spiral(inp.position, inp.logical_time);
        let b = perfect_fifth(inp.waves);
        for i in 0..3 {
            assert!((f[i] - (a[i] + b[i])).abs() < 1e-7);
        }
    }

    #[test]
    fn test_trefoil_pull_toward_curve() {
        let p: [f32; 3] = [30.0, 10.0, 20.0];
        let target = trefoil_point(p[1].atan2(p[0]));
        let f = trefoil_pull(p);
        let moved = [p[0] + f[0], p[1] + f[1], p[2] + f[2]];
        let d = |q: [f32; 3]| {
            ((q[0] - target[0]).powi(2) + (q[1] - target[1]).powi(2) + (q[2] - target[2]).powi(2))
                .sqrt()
        };
        assert!(d(moved) < d(p));
    }

    #[test]
    fn test_trefoil_inside_domain() {
        for i in 0..360 {
            let q = trefoil_point((i as f32).to_radians());
            let r = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2]).sqrt();
            assert!(r < EXTENT);
        }
    }

    #[test]
    fn test_torus_inside_no_force() {
        // On the tube centre-line and just inside the surface
        assert_eq!(torus_containment([TORUS_MAJOR_RADIUS, 0.0, 0.0]), ZERO);
        let inside = [0.0, TORUS_MAJOR_RADIUS, TORUS_MINOR_RADIUS * 0.99];
        assert_eq!(torus_containment(inside), ZERO);
    }

    #[test]
    fn test_torus_outside_pulls_back() {
        let p = [TORUS_MAJOR_RADIUS, 0.0, TORUS_MINOR_RADIUS * 2.0];
        let f = torus_containment(p);
        assert!(f[2] < 0.0);
        assert!(f[0].abs() < 1e-6 && f[1].abs() < 1e-6);
        let expected = -TORUS_MINOR_RADIUS * TORUS_STRENGTH;
        assert!((f[2] - expected).abs() < 1e-4);
    }

    #[test]
    fn test_torus_axis_fallback() {
        let f = torus_containment([0.0, 0.0, 10.0]);
        assert!(f.iter().all(|c| c.is_finite()));
        assert!(f[0] > 0.0);
    }

    #[test]
    fn test_topology_features_sum() {
        let p = [5.0, 5.0, 40.0];
        let flags = TopologyExtensions {
            trefoil: true,
            torus: true,
        };
        let f = topology_force(p, &flags);
        let a = trefoil_pull(p);
        let b = torus_containment(p);
        for i in 0..3 {
            assert!((f[i] - (a[i] + b[i])).abs() < 1e-6);
        }
    }
}
