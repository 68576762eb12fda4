// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Telemetry & Render Types
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

/// Replace a non-finite value with `fallback`, then clamp to [lo, hi].
#[inline]
pub fn finite_or(value: f32, fallback: f32, lo: f32, hi: f32) -> f32 {
    if !value.is_finite() {
        log::warn!("finite_or: non-finite value {value}, using {fallback:.4}");
        return fallback.clamp(lo, hi);
    }
    value.clamp(lo, hi)
}

/// The three single-digit mode numbers driving the standing wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DigitTriple {
    pub m: u8,
    pub n: u8,
    pub p: u8,
}

impl DigitTriple {
    pub fn new(m: u8, n: u8, p: u8) -> Self {
        Self { m, n, p }
    }

    /// `m² + n² + p²`.
    #[inline]
    pub fn energy(self) -> u32 {
        let (m, n, p) = (self.m as u32, self.n as u32, self.p as u32);
        m * m + n * n + p * p
    }

    /// Energy divided by the number of axes.
    #[inline]
    pub fn standardized_mode(self) -> f32 {
        self.energy() as f32 / 3.0
    }

    pub fn as_f32(self) -> [f32; 3] {
        [self.m as f32, self.n as f32, self.p as f32]
    }
}

/// Scalar telemetry written to display handles once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameTelemetry {
    pub digits: DigitTriple,
    pub energy: u32,
    pub cycle_position: u32,
}

impl FrameTelemetry {
    pub fn new(digits: DigitTriple, cycle_position: u32) -> Self {
        Self {
            digits,
            energy: digits.energy(),
            cycle_position,
        }
    }
}

/// Frame-global blending parameters for the point renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderParams {
    pub point_size: f32,
    pub opacity: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_or_nan() {
        assert_eq!(finite_or(f32::NAN, 0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_finite_or_inf() {
        assert_eq!(finite_or(f32::INFINITY, 2.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_finite_or_normal() {
        assert_eq!(finite_or(0.25, 0.5, 0.0, 1.0), 0.25);
        assert_eq!(finite_or(-3.0, 0.5, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_energy() {
        let t = DigitTriple::new(3, 1, 4);
        assert_eq!(t.energy(), 26);
        assert!((t.standardized_mode() - 26.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_triple() {
        let t = DigitTriple::default();
        assert_eq!(t.energy(), 0);
        assert_eq!(t.standardized_mode(), 0.0);
    }

    #[test]
    fn test_telemetry_energy_matches_digits() {
        let tel = FrameTelemetry::new(DigitTriple::new(9, 9, 9), 17);
        assert_eq!(tel.energy, 243);
        assert_eq!(tel.cycle_position, 17);
    }
}
