// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Particle Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! HELIOS Bridge particle kernel — the per-frame standing-wave
//! simulation behind the HELIOS visualisation.

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{
    Axis, CrystalExtensions, Extensions, HarmonicExtensions, Mode, PerAxis, SimulationConfig,
    TopologyExtensions,
};
pub use error::{HeliosError, HeliosResult};
pub use telemetry::{finite_or, DigitTriple, FrameTelemetry, RenderParams};
