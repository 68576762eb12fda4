// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Simulation Core
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Frame-driven particle simulation, render state and telemetry for
//! the HELIOS Bridge.
//!
//! # Invariants
//!
//! 1. **Bounded domain**: after every frame, every particle satisfies
//!    `|p| ≤ EXTENT`. Particles that cross the sphere are projected
//!    back onto it and their velocity is scaled by −0.5.
//!
//! 2. **One tick per interval**: the phase clock advances the cycle by
//!    at most one position per frame. A stalled host never triggers a
//!    burst of catch-up ticks.
//!
//! 3. **Telemetry on tick only**: sinks receive exactly one record per
//!    committed tick, never on plain frames.
//!
//! 4. **No per-frame allocation of particle state**: the arena is
//!    rebuilt only when `particle_count` changes; frames mutate it in
//!    place.

pub mod arena;
pub mod render;
pub mod shared;
pub mod simulation;
pub mod telemetry;

pub use arena::ParticleBuffer;
pub use render::{brightness, particle_color, recolor, render_params};
pub use shared::SharedConfig;
pub use simulation::{FrameReport, Simulation};
pub use telemetry::{ExternalTelemetry, NullTelemetry, RecordingTelemetry, TelemetrySink};
