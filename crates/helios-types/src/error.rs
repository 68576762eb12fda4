// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Particle Kernel Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all HELIOS kernel failures.
///
/// The frame loop itself never fails; these surface from configuration
/// loading, name parsing and sequence registration.
#[derive(Error, Debug)]
pub enum HeliosError {
    /// Configuration error (parse failure or out-of-range field).
    #[error("config error: {0}")]
    Config(String),

    /// Digit sequence could not be registered.
    #[error("digit sequence error: {0}")]
    Sequence(String),

    /// Invalid input from a host binding (unknown mode or extension flag).
    #[error("validation error: {0}")]
    Validation(String),

    /// Numerical error (NaN/Inf in computation).
    #[error("numerical error: {0}")]
    Numerical(String),
}

pub type HeliosResult<T> = Result<T, HeliosError>;
