// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Particle Arena
// ─────────────────────────────────────────────────────────────────────
//! Struct-of-arrays particle storage: positions, velocities and colours
//! as three dense `f32` arrays of length `3 · count`.
//!
//! Particle `i` always occupies slots `3i, 3i+1, 3i+2` of each array.
//! The arena is allocated once per particle count and mutated in place
//! by the frame loop; a count change builds a fresh arena.

use helios_physics::integrator::{contain, is_finite3};
use helios_physics::params::{EXTENT, GRID_FILL, GRID_JITTER};
use helios_physics::SimpleRng;
use helios_types::{HeliosError, HeliosResult};

/// Pre-allocated particle state.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBuffer {
    count: usize,
    pub positions: Vec<f32>,
    pub velocities: Vec<f32>,
    pub colors: Vec<f32>,
}

impl ParticleBuffer {
    /// Allocate `count` particles at the origin, at rest, black.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            positions: vec![0.0; 3 * count],
            velocities: vec![0.0; 3 * count],
            colors: vec![0.0; 3 * count],
        }
    }

    /// Allocate and lay out on a jittered grid.
    pub fn seeded(count: usize, seed: u64) -> Self {
        let mut buffer = Self::new(count);
        buffer.seed_grid(seed);
        buffer
    }

    /// Re-seed positions on a jittered grid and zero velocities.
    ///
    /// The grid is a cube inscribed in the sphere of radius
    /// `GRID_FILL · EXTENT`. A count that is not a perfect cube fills
    /// fewer Z layers; those layers are centred on the origin.
    pub fn seed_grid(&mut self, seed: u64) {
        let side = grid_side(self.count);
        let layers = self.count.div_ceil(side * side).max(1);
        let half = EXTENT * GRID_FILL / 3f32.sqrt();
        let cell = 2.0 * half / side as f32;
        let origin = [
            -0.5 * side as f32 * cell,
            -0.5 * side as f32 * cell,
            -0.5 * layers as f32 * cell,
        ];
        let mut rng = SimpleRng::new(seed);

        for (i, (p, v)) in self
            .positions
            .chunks_exact_mut(3)
            .zip(self.velocities.chunks_exact_mut(3))
            .enumerate()
        {
            let cells = [i % side, (i / side) % side, i / (side * side)];
            for axis in 0..3 {
                let jitter = rng.next_centered() * GRID_JITTER * cell;
                p[axis] = origin[axis] + (cells[axis] as f32 + 0.5) * cell + jitter;
            }
            v.fill(0.0);
            contain(p, v);
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn position(&self, i: usize) -> [f32; 3] {
        triple(&self.positions, i)
    }

    pub fn velocity(&self, i: usize) -> [f32; 3] {
        triple(&self.velocities, i)
    }

    pub fn color(&self, i: usize) -> [f32; 3] {
        triple(&self.colors, i)
    }

    pub fn set_position(&mut self, i: usize, p: [f32; 3]) {
        self.positions[3 * i..3 * i + 3].copy_from_slice(&p);
    }

    pub fn set_velocity(&mut self, i: usize, v: [f32; 3]) {
        self.velocities[3 * i..3 * i + 3].copy_from_slice(&v);
    }

    /// Largest distance of any particle from the origin.
    pub fn max_radius(&self) -> f32 {
        self.positions
            .chunks_exact(3)
            .map(|p| (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt())
            .fold(0.0, f32::max)
    }

    /// Fail on the first particle holding a NaN or infinite value.
    pub fn verify_finite(&self) -> HeliosResult<()> {
        for (i, (p, v)) in self
            .positions
            .chunks_exact(3)
            .zip(self.velocities.chunks_exact(3))
            .enumerate()
        {
            if !is_finite3(p) || !is_finite3(v) {
                return Err(HeliosError::Numerical(format!(
                    "particle {i} is non-finite: p={p:?} v={v:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Smallest `side` with `side³ ≥ count`.
fn grid_side(count: usize) -> usize {
    let mut side = (count as f64).cbrt().ceil().max(1.0) as usize;
    while side * side * side < count {
        side += 1;
    }
    side
}

#[inline]
fn triple(values: &[f32], i: usize) -> [f32; 3] {
    [values[3 * i], values[3 * i + 1], values[3 * i + 2]]
}
