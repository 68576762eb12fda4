// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Canonical Parameters
// ─────────────────────────────────────────────────────────────────────
//! Fixed constants of the simulation domain, the standing-wave model,
//! and the mode overlays.
//!
//! All lengths are in domain units; all forces are velocity deltas per
//! frame (the integrator is not scaled by dt).

use std::f32::consts::PI;

/// Half-width of the simulation domain and radius of the boundary sphere.
pub const EXTENT: f32 = 50.0;

/// Length of the logical cycle; positions wrap modulo this.
pub const MAX_CYCLE: u32 = 2500;

/// Spatial wave number of the standing wave, `π / EXTENT`.
pub const WAVE_NUMBER: f32 = PI / EXTENT;

/// Global gain of the standing-wave force.
pub const WAVE_STRENGTH: f32 = 0.08;

/// Extra attenuation folded into the force scale.
pub const FORCE_ATTENUATION: f32 = 0.1;

/// Per-frame velocity multiplier. The only dissipation in the system.
pub const VELOCITY_DAMPING: f32 = 0.95;

/// Velocity multiplier applied when a particle crosses the boundary.
pub const BOUNDARY_RESTITUTION: f32 = -0.5;

// ── Crystal ───────────────────────────────────────────────────────────

/// Spring constant pulling toward the snapped polar angle.
pub const CRYSTAL_SNAP_STRENGTH: f32 = 0.002;

/// Triangular lattice spacing.
pub const LATTICE_SPACING: f32 = EXTENT / 3.0;

/// Spring constant pulling toward the nearest lattice node.
pub const LATTICE_STRENGTH: f32 = 0.004;

// ── Harmonic ──────────────────────────────────────────────────────────

/// Pythagorean comma, 3¹² / 2¹⁹.
pub const PYTHAGOREAN_COMMA: f32 = 531_441.0 / 524_288.0;

/// Peak tangential gain of the comma spiral.
pub const COMMA_SPIRAL_STRENGTH: f32 = 0.004;

/// Angular rate (rad per tick) of the spiral's strength oscillation.
pub const COMMA_SPIRAL_RATE: f32 = 0.25;

/// Frequency ratio of the perfect-fifth overlay.
pub const FIFTH_RATIO: f32 = 1.5;

/// Amplitude of the perfect-fifth overlay.
pub const FIFTH_STRENGTH: f32 = 0.02;

// ── Topology ──────────────────────────────────────────────────────────

/// Scale applied to the unit trefoil parameterisation (max radius 3).
pub const TREFOIL_SCALE: f32 = EXTENT * 0.25;

/// Spring constant pulling toward the trefoil point.
pub const TREFOIL_STRENGTH: f32 = 0.003;

/// Torus major radius (centre of tube to Z axis).
pub const TORUS_MAJOR_RADIUS: f32 = 0.8 * EXTENT;

/// Torus minor radius (tube radius).
pub const TORUS_MINOR_RADIUS: f32 = 0.3 * EXTENT;

/// Spring constant pulling escaped particles back onto the torus.
pub const TORUS_STRENGTH: f32 = 0.05;

// ── Initial layout ────────────────────────────────────────────────────

/// Radius, as a fraction of `EXTENT`, of the sphere through the seeded
/// grid's corners.
pub const GRID_FILL: f32 = 0.8;

/// Jitter amplitude as a fraction of one grid cell.
pub const GRID_JITTER: f32 = 0.5;
