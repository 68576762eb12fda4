// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Particle Physics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Physics of the HELIOS particle field: digit-sequence provider,
//! phase clock, standing-wave potential, mode overlays, and the
//! damped integrator with spherical boundary.
//!
//! Everything here is a pure function or a small state machine; the
//! frame loop that ties them together lives in `helios-core`.

pub mod clock;
pub mod digits;
pub mod integrator;
pub mod overlay;
pub mod params;
pub mod potential;
pub mod rng;

pub use clock::{ClockState, CycleState, PhaseClock};
pub use digits::{digit_at, triple_at, DigitRegistry, DigitSequence, DigitSource};
pub use integrator::{contain, integrate, radius_sq, StepOutcome};
pub use overlay::{overlay_force, OverlayInput};
pub use params::{EXTENT, MAX_CYCLE, VELOCITY_DAMPING};
pub use potential::StandingWave;
pub use rng::SimpleRng;
