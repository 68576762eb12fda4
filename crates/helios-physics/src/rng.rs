// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Seeded RNG
// ─────────────────────────────────────────────────────────────────────
//! Minimal xorshift64 generator for the initial grid jitter.
//!
//! Kept in-crate so that the same seed yields the same layout on every
//! platform and toolchain.

/// Xorshift64 RNG.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF_CAFE_BABE } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform in [-0.5, 0.5).
    pub fn next_centered(&mut self) -> f32 {
        self.next_f32() - 0.5
    }
}
