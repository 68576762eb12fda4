// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Render State Mapper
// ─────────────────────────────────────────────────────────────────────
//! Per-particle colour and frame-global point size / opacity.
//!
//! Colours are a pure function of (position, mode, quality); nothing
//! here reads velocity or time. Point size and opacity shrink with the
//! square root of the particle count so that dense clouds stay legible.

use std::f32::consts::TAU;

use helios_physics::EXTENT;
use helios_types::{finite_or, Mode, RenderParams};

use crate::arena::ParticleBuffer;

/// Particle count at which `density_factor` is 1.
pub const REFERENCE_COUNT: f32 = 10_000.0;

pub const BASE_POINT_SIZE: f32 = 0.6;
pub const BASE_OPACITY: f32 = 0.8;

pub const POINT_SIZE_RANGE: (f32, f32) = (0.05, 4.0);
pub const OPACITY_RANGE: (f32, f32) = (0.02, 1.0);

/// `sqrt(REFERENCE_COUNT / count)`; an empty cloud counts as one particle.
#[inline]
pub fn density_factor(particle_count: usize) -> f32 {
    (REFERENCE_COUNT / particle_count.max(1) as f32).sqrt()
}

/// Frame-global blending parameters.
pub fn render_params(particle_count: usize, quality: f32) -> RenderParams {
    let density = density_factor(particle_count);
    let (size_lo, size_hi) = POINT_SIZE_RANGE;
    let (op_lo, op_hi) = OPACITY_RANGE;
    RenderParams {
        point_size: finite_or(BASE_POINT_SIZE * quality * density, BASE_POINT_SIZE, size_lo, size_hi),
        opacity: finite_or(BASE_OPACITY * density, BASE_OPACITY, op_lo, op_hi),
    }
}

/// Colour multiplier for `quality`. Non-finite quality falls back to 1.
pub fn brightness(quality: f32) -> f32 {
    finite_or(0.55 + 0.45 * quality, 1.0, 0.2, 1.0)
}

/// RGB in [0, 1] for one particle.
pub fn particle_color(mode: Mode, position: [f32; 3], quality: f32) -> [f32; 3] {
    shade(mode, position, brightness(quality))
}

/// Rewrite every particle colour in the arena.
pub fn recolor(buffer: &mut ParticleBuffer, mode: Mode, quality: f32) {
    let brightness = brightness(quality);
    let ParticleBuffer {
        positions, colors, ..
    } = buffer;
    for (p, c) in positions.chunks_exact(3).zip(colors.chunks_exact_mut(3)) {
        c.copy_from_slice(&shade(mode, [p[0], p[1], p[2]], brightness));
    }
}

/// Per-particle colour at a precomputed brightness. Silent on NaN: a
/// non-finite channel becomes 0.
fn shade(mode: Mode, position: [f32; 3], brightness: f32) -> [f32; 3] {
    let [x, y, z] = position;
    let base = match mode {
        Mode::Standard => {
            let k = TAU / EXTENT;
            [
                0.5 + 0.5 * (x * k).cos(),
                0.5 + 0.5 * (y * k + TAU / 3.0).cos(),
                0.5 + 0.5 * (z * k + 2.0 * TAU / 3.0).cos(),
            ]
        }
        Mode::Crystal => {
            // Six sectors per turn, matching the six-fold snap
            let hue = (y.atan2(x) / TAU * 6.0).rem_euclid(1.0);
            hue_to_rgb(hue)
        }
        Mode::Harmonic => {
            let t = radius(position) / EXTENT * TAU * 1.5;
            [
                0.5 + 0.5 * t.sin(),
                0.5 + 0.5 * (t + TAU / 3.0).sin(),
                0.5 + 0.5 * (t + 2.0 * TAU / 3.0).sin(),
            ]
        }
        Mode::Topology => {
            let hue = (y.atan2(x) / TAU).rem_euclid(1.0);
            let r = (radius(position) / EXTENT).min(1.0);
            // Core particles pale, rim particles saturated
            mix(hue_to_rgb(hue), [1.0; 3], 0.6 * (1.0 - r))
        }
    };
    base.map(|c| {
        let c = c * brightness;
        if c.is_finite() {
            c.clamp(0.0, 1.0)
        } else {
            0.0
        }
    })
}

/// Fully saturated hue in [0, 1) to RGB.
fn hue_to_rgb(h: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0) * 6.0;
    [
        ((h - 3.0).abs() - 1.0).clamp(0.0, 1.0),
        (2.0 - (h - 2.0).abs()).clamp(0.0, 1.0),
        (2.0 - (h - 4.0).abs()).clamp(0.0, 1.0),
    ]
}

#[inline]
fn mix(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[inline]
fn radius(p: [f32; 3]) -> f32 {
    (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt()
}
