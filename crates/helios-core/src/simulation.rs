// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Simulation Frame Loop
// ─────────────────────────────────────────────────────────────────────
//! One `Simulation` owns the particle arena, the phase clock and the
//! committed digit triple. The host calls `frame()` once per display
//! refresh; each call runs
//!
//!   clock → digits → standing wave + overlay → integrator → render
//!
//! to completion over every particle. Forces are evaluated on every
//! frame, paused or not; only the digit triple is frozen by a pause.

use std::sync::Arc;

use helios_physics::{
    integrate, overlay_force, triple_at, DigitRegistry, DigitSource, OverlayInput, PhaseClock,
    StandingWave, StepOutcome,
};
use helios_types::{DigitTriple, FrameTelemetry, HeliosResult, RenderParams, SimulationConfig};

use crate::arena::ParticleBuffer;
use crate::render::{recolor, render_params};
use crate::shared::SharedConfig;
use crate::telemetry::TelemetrySink;

/// Outcome of one `Simulation::frame` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frames stepped since construction or the last reset, this one included.
    pub frame: u64,
    /// Whether the phase clock committed a tick this frame.
    pub ticked: bool,
    /// Telemetry published this frame; `None` when no tick happened.
    pub telemetry: Option<FrameTelemetry>,
    /// Particles reflected off the boundary sphere.
    pub reflected: usize,
    /// Particles reset to the origin after going non-finite.
    pub resets: usize,
    pub render: RenderParams,
}

pub struct Simulation {
    config: Arc<SimulationConfig>,
    digits: Arc<dyn DigitSource>,
    buffer: ParticleBuffer,
    clock: PhaseClock,
    triple: DigitTriple,
    render: RenderParams,
    latest: FrameTelemetry,
    frame_count: u64,
}

impl Simulation {
    /// Simulation backed by the built-in constant registry.
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_digits(config, Arc::new(DigitRegistry::builtin()))
    }

    /// Simulation backed by a custom digit source.
    pub fn with_digits(config: SimulationConfig, digits: Arc<dyn DigitSource>) -> Self {
        let config = Arc::new(config);
        let buffer = ParticleBuffer::seeded(config.particle_count, config.seed);
        let clock = PhaseClock::new(config.speed, config.is_playing);
        let triple = triple_at(digits.as_ref(), &config, clock.position());
        let mut sim = Self {
            render: render_params(config.particle_count, config.quality),
            latest: FrameTelemetry::new(triple, clock.position()),
            config,
            digits,
            buffer,
            clock,
            triple,
            frame_count: 0,
        };
        recolor(&mut sim.buffer, sim.config.mode, sim.config.quality);
        sim
    }

    /// Validate `config`, then build.
    pub fn try_new(config: SimulationConfig) -> HeliosResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Replace the active configuration.
    ///
    /// A changed `particle_count` builds a fresh arena and restarts the
    /// cycle; telemetry and colours are rebuilt before this returns. Any
    /// other change keeps particle state and cycle position; the digit
    /// triple is re-read from the current position so new mappings and
    /// staggers take effect immediately.
    pub fn apply_config(&mut self, config: impl Into<Arc<SimulationConfig>>) {
        let config = config.into();
        if Arc::ptr_eq(&config, &self.config) {
            return;
        }
        let reallocate = config.particle_count != self.buffer.count();
        if reallocate {
            log::info!(
                "Reallocating particle arena: {} -> {} particles",
                self.buffer.count(),
                config.particle_count
            );
            let buffer = ParticleBuffer::seeded(config.particle_count, config.seed);
            self.buffer = buffer;
            self.clock.reset();
            self.frame_count = 0;
        }
        self.clock.configure(config.speed, config.is_playing);
        self.triple = triple_at(self.digits.as_ref(), &config, self.clock.position());
        if reallocate {
            self.latest = FrameTelemetry::new(self.triple, self.clock.position());
        }
        if reallocate || config.mode != self.config.mode || config.quality != self.config.quality {
            recolor(&mut self.buffer, config.mode, config.quality);
        }
        self.render = render_params(config.particle_count, config.quality);
        self.config = config;
        log::debug!(
            "Config applied: mode={:?} speed={} amplitude={}",
            self.config.mode,
            self.config.speed,
            self.config.amplitude
        );
    }

    /// Re-seed the arena and rewind the cycle to position 0.
    pub fn reset(&mut self) {
        self.buffer.seed_grid(self.config.seed);
        self.clock.reset();
        self.triple = triple_at(self.digits.as_ref(), &self.config, 0);
        self.latest = FrameTelemetry::new(self.triple, 0);
        self.frame_count = 0;
        recolor(&mut self.buffer, self.config.mode, self.config.quality);
        log::info!("Simulation reset ({} particles)", self.buffer.count());
    }

    /// Step one frame at host time `now_ms`.
    pub fn frame(&mut self, now_ms: f64, sink: &mut dyn TelemetrySink) -> FrameReport {
        let ticked = self.clock.poll(now_ms);
        let telemetry = if ticked {
            let pos = self.clock.position();
            self.triple = triple_at(self.digits.as_ref(), &self.config, pos);
            let telemetry = FrameTelemetry::new(self.triple, pos);
            self.latest = telemetry;
            log::debug!(
                "Tick {pos}: digits=({}, {}, {}) energy={}",
                self.triple.m,
                self.triple.n,
                self.triple.p,
                telemetry.energy
            );
            if std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.publish(&telemetry)))
                .is_err()
            {
                log::error!("Telemetry sink panicked at tick {pos}; frame continues");
            }
            Some(telemetry)
        } else {
            None
        };

        let (reflected, resets) = self.step_particles();
        if resets > 0 {
            log::warn!("{resets} particle(s) went non-finite and were reset to the origin");
        }

        recolor(&mut self.buffer, self.config.mode, self.config.quality);
        self.render = render_params(self.buffer.count(), self.config.quality);
        self.frame_count += 1;

        FrameReport {
            frame: self.frame_count,
            ticked,
            telemetry,
            reflected,
            resets,
            render: self.render,
        }
    }

    /// Snapshot `shared`, apply it, then step one frame.
    pub fn frame_shared(
        &mut self,
        now_ms: f64,
        shared: &SharedConfig,
        sink: &mut dyn TelemetrySink,
    ) -> FrameReport {
        self.apply_config(shared.snapshot());
        self.frame(now_ms, sink)
    }

    /// Forces and integration for every particle. Returns
    /// `(reflected, resets)`.
    fn step_particles(&mut self) -> (usize, usize) {
        let wave = StandingWave::new(self.triple, self.config.amplitude);
        let logical_time = self.clock.logical_time();
        let mode = self.config.mode;
        let extensions = &self.config.extensions;

        let mut reflected = 0;
        let mut resets = 0;
        let ParticleBuffer {
            positions,
            velocities,
            ..
        } = &mut self.buffer;
        for (p, v) in positions
            .chunks_exact_mut(3)
            .zip(velocities.chunks_exact_mut(3))
        {
            let position = [p[0], p[1], p[2]];
            let waves = wave.waves(position);
            let mut force = wave.force_from_waves(waves);
            let overlay = overlay_force(
                mode,
                extensions,
                &OverlayInput {
                    position,
                    waves,
                    logical_time,
                },
            );
            for axis in 0..3 {
                force[axis] += overlay[axis];
            }
            match integrate(p, v, force) {
                StepOutcome::Free => {}
                StepOutcome::Reflected => reflected += 1,
                StepOutcome::Reset => resets += 1,
            }
        }
        (reflected, resets)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    /// Mutable arena access for hosts that inject particle state.
    pub fn buffer_mut(&mut self) -> &mut ParticleBuffer {
        &mut self.buffer
    }

    pub fn positions(&self) -> &[f32] {
        &self.buffer.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.buffer.colors
    }

    pub fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    pub fn triple(&self) -> DigitTriple {
        self.triple
    }

    /// Telemetry of the most recent tick (or of position 0 before any tick).
    pub fn telemetry(&self) -> FrameTelemetry {
        self.latest
    }

    pub fn render_params(&self) -> RenderParams {
        self.render
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
