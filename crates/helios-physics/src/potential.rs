// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Standing-Wave Potential Field
// ─────────────────────────────────────────────────────────────────────
//! Separable triple-cosine standing wave driven by the digit triple:
//!
//!   w_x = m·k·x + (m/9)·π      (and analogues for y/n, z/p)
//!   V   = cos w_x · cos w_y · cos w_z
//!   F   = s · (m sin w_x cos w_y cos w_z,
//!              n cos w_x sin w_y cos w_z,
//!              p cos w_x cos w_y sin w_z)
//!
//! with k = π / EXTENT and s = k · WAVE_STRENGTH · (E/3) · amplitude · 0.1,
//! E = m² + n² + p². F is the exact analytic −∇V scaled by s/k, so
//! particles drift toward the nodes of V.

use std::f32::consts::PI;

use helios_types::DigitTriple;

use crate::params::{FORCE_ATTENUATION, WAVE_NUMBER, WAVE_STRENGTH};

/// Per-tick coefficients of the standing wave.
///
/// Built once per frame from the committed triple; evaluated once per
/// particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandingWave {
    modes: [f32; 3],
    phases: [f32; 3],
    force_scale: f32,
}

impl StandingWave {
    pub fn new(triple: DigitTriple, amplitude: f32) -> Self {
        let modes = triple.as_f32();
        let phases = modes.map(|d| d / 9.0 * PI);
        let force_scale = WAVE_NUMBER
            * WAVE_STRENGTH
            * triple.standardized_mode()
            * amplitude
            * FORCE_ATTENUATION;
        Self {
            modes,
            phases,
            force_scale,
        }
    }

    pub fn force_scale(&self) -> f32 {
        self.force_scale
    }

    /// Wave arguments `(w_x, w_y, w_z)` at `position`.
    #[inline]
    pub fn waves(&self, position: [f32; 3]) -> [f32; 3] {
        [
            self.modes[0] * position[0] * WAVE_NUMBER + self.phases[0],
            self.modes[1] * position[1] * WAVE_NUMBER + self.phases[1],
            self.modes[2] * position[2] * WAVE_NUMBER + self.phases[2],
        ]
    }

    /// Scalar potential. Only used for diagnostics and tests.
    pub fn potential(&self, position: [f32; 3]) -> f32 {
        let w = self.waves(position);
        w[0].cos() * w[1].cos() * w[2].cos()
    }

    /// Force from precomputed wave arguments.
    #[inline]
    pub fn force_from_waves(&self, w: [f32; 3]) -> [f32; 3] {
        let (sx, cx) = w[0].sin_cos();
        let (sy, cy) = w[1].sin_cos();
        let (sz, cz) = w[2].sin_cos();
        let s = self.force_scale;
        [
            s * self.modes[0] * sx * cy * cz,
            s * self.modes[1] * cx * sy * cz,
            s * self.modes[2] * cx * cy * sz,
        ]
    }

    #[inline]
    pub fn force(&self, position: [f32; 3]) -> [f32; 3] {
        self.force_from_waves(self.waves(position))
    }
}
