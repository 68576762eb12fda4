// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the HELIOS particle kernel.
//!
//! Exposes `SimulationConfig` and `Simulation` to a Python host that
//! owns the window and the point renderer.
//!
//! # FFI Safety
//!
//! - GIL acquired via `Python::with_gil` before every Python callback.
//! - Exceptions raised by the tick callback are logged (`log::warn!`); the frame completes.
//! - Particle buffers are copied out; no borrowed slice escapes to Python.
//! - All config validated before storage (`SimulationConfig::validate()`).
//!
//! Install: `pip install -e crates/helios-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from helios_bridge import Simulation, SimulationConfig
//!
//! cfg = SimulationConfig(particle_count=20_000, mode="CRYSTAL", flags=["three_fold"])
//! sim = Simulation(cfg, on_tick=lambda t: print(t["digits"], t["energy"]))
//! report = sim.frame(now_ms)
//! xyz, rgb = sim.positions(), sim.colors()
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use helios_core::{ExternalTelemetry, FrameReport, NullTelemetry, Simulation};
use helios_physics::{DigitRegistry, DigitSequence};
use helios_types::{Extensions, FrameTelemetry, HeliosError, Mode, PerAxis, SimulationConfig};

fn value_error(e: HeliosError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn telemetry_dict<'py>(py: Python<'py>, t: &FrameTelemetry) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("digits", (t.digits.m, t.digits.n, t.digits.p))?;
    dict.set_item("energy", t.energy)?;
    dict.set_item("cycle_position", t.cycle_position)?;
    Ok(dict)
}

fn report_dict<'py>(py: Python<'py>, r: &FrameReport) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("frame", r.frame)?;
    dict.set_item("ticked", r.ticked)?;
    dict.set_item("reflected", r.reflected)?;
    dict.set_item("resets", r.resets)?;
    dict.set_item("point_size", r.render.point_size)?;
    dict.set_item("opacity", r.render.opacity)?;
    match &r.telemetry {
        Some(t) => dict.set_item("telemetry", telemetry_dict(py, t)?)?,
        None => dict.set_item("telemetry", py.None())?,
    }
    Ok(dict)
}

// ─── PySimulationConfig ─────────────────────────────────────────────

/// Python-visible simulation configuration.
#[pyclass(name = "SimulationConfig")]
#[derive(Clone)]
struct PySimulationConfig {
    inner: SimulationConfig,
}

#[pymethods]
impl PySimulationConfig {
    #[new]
    #[pyo3(signature = (
        particle_count = 50_000,
        speed = 2.0,
        amplitude = 1.0,
        quality = 1.0,
        mode = "STANDARD",
        mapping = ("pi".to_string(), "e".to_string(), "phi".to_string()),
        stagger = (0, 0, 0),
        flags = Vec::new(),
        is_playing = true,
        seed = 42,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        particle_count: usize,
        speed: f32,
        amplitude: f32,
        quality: f32,
        mode: &str,
        mapping: (String, String, String),
        stagger: (i64, i64, i64),
        flags: Vec<String>,
        is_playing: bool,
        seed: u64,
    ) -> PyResult<Self> {
        let config = SimulationConfig {
            particle_count,
            speed,
            amplitude,
            quality,
            mode: mode.parse::<Mode>().map_err(value_error)?,
            mapping: PerAxis::new(mapping.0, mapping.1, mapping.2),
            stagger: PerAxis::new(stagger.0, stagger.1, stagger.2),
            extensions: Extensions::from_names(&flags).map_err(value_error)?,
            is_playing,
            seed,
        };
        config.validate().map_err(value_error)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = SimulationConfig::from_json(json).map_err(value_error)?;
        config.validate().map_err(value_error)?;
        Ok(Self { inner: config })
    }

    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(value_error)
    }

    #[getter]
    fn particle_count(&self) -> usize {
        self.inner.particle_count
    }

    #[getter]
    fn speed(&self) -> f32 {
        self.inner.speed
    }

    #[getter]
    fn amplitude(&self) -> f32 {
        self.inner.amplitude
    }

    #[getter]
    fn quality(&self) -> f32 {
        self.inner.quality
    }

    #[getter]
    fn mode(&self) -> &'static str {
        self.inner.mode.as_str()
    }

    #[getter]
    fn mapping(&self) -> (String, String, String) {
        let m = &self.inner.mapping;
        (m.a.clone(), m.b.clone(), m.c.clone())
    }

    #[getter]
    fn stagger(&self) -> (i64, i64, i64) {
        let s = &self.inner.stagger;
        (s.a, s.b, s.c)
    }

    #[getter]
    fn flags(&self) -> Vec<&'static str> {
        self.inner.extensions.enabled_names()
    }

    #[getter]
    fn is_playing(&self) -> bool {
        self.inner.is_playing
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.inner.seed
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulationConfig(particles={}, mode={}, speed={}, amplitude={}, playing={})",
            self.inner.particle_count,
            self.inner.mode.as_str(),
            self.inner.speed,
            self.inner.amplitude,
            self.inner.is_playing
        )
    }
}

// ─── PySimulation ───────────────────────────────────────────────────

/// Frame-driven particle simulation exposed to Python.
///
/// The host calls `frame(now_ms)` from its render callback and uploads
/// `positions()` / `colors()` (flat `[x0, y0, z0, x1, ...]` lists) to
/// its point renderer.
#[pyclass(name = "Simulation")]
struct PySimulation {
    inner: Simulation,
    sink: Option<ExternalTelemetry>,
}

#[pymethods]
impl PySimulation {
    /// Create a simulation.
    ///
    /// Args:
    ///     config: Optional SimulationConfig (uses defaults if None).
    ///     sequences: Optional dict of extra digit sequences, id -> digit string.
    ///     on_tick: Optional Callable[[dict], None] called once per tick with
    ///              {"digits": (m, n, p), "energy": int, "cycle_position": int}.
    #[new]
    #[pyo3(signature = (config = None, sequences = None, on_tick = None))]
    fn new(
        config: Option<PySimulationConfig>,
        sequences: Option<HashMap<String, String>>,
        on_tick: Option<PyObject>,
    ) -> PyResult<Self> {
        let cfg = config.map(|c| c.inner).unwrap_or_default();

        let mut registry = DigitRegistry::builtin();
        for (id, digits) in sequences.unwrap_or_default() {
            registry.register(DigitSequence::new(id, &digits).map_err(value_error)?);
        }

        let sink = on_tick.map(|cb| {
            ExternalTelemetry::new(move |t: &FrameTelemetry| {
                Python::with_gil(|py| {
                    if let Err(e) = telemetry_dict(py, t).and_then(|d| cb.call1(py, (d,))) {
                        log::warn!("on_tick callback raised at tick {}: {e}", t.cycle_position);
                    }
                })
            })
        });

        Ok(Self {
            inner: Simulation::with_digits(cfg, Arc::new(registry)),
            sink,
        })
    }

    /// Step one frame at host time `now_ms`.
    ///
    /// Returns: dict with frame, ticked, reflected, resets, point_size,
    /// opacity and telemetry (dict or None).
    fn frame(&mut self, py: Python<'_>, now_ms: f64) -> PyResult<PyObject> {
        let report = match self.sink.as_mut() {
            Some(sink) => self.inner.frame(now_ms, sink),
            None => self.inner.frame(now_ms, &mut NullTelemetry),
        };
        Ok(report_dict(py, &report)?.into())
    }

    /// Re-seed particles and rewind the cycle.
    fn reset(&mut self) {
        self.inner.reset();
    }

    /// Replace the configuration. Changing `particle_count` rebuilds the cloud.
    fn apply_config(&mut self, config: PySimulationConfig) -> PyResult<()> {
        config.inner.validate().map_err(value_error)?;
        self.inner.apply_config(config.inner);
        Ok(())
    }

    #[getter]
    fn config(&self) -> PySimulationConfig {
        PySimulationConfig {
            inner: self.inner.config().clone(),
        }
    }

    /// Flat xyz positions, length 3 × particle_count.
    fn positions(&self) -> Vec<f32> {
        self.inner.positions().to_vec()
    }

    /// Flat rgb colours in [0, 1], length 3 × particle_count.
    fn colors(&self) -> Vec<f32> {
        self.inner.colors().to_vec()
    }

    /// Telemetry of the most recent tick.
    fn telemetry(&self, py: Python<'_>) -> PyResult<PyObject> {
        Ok(telemetry_dict(py, &self.inner.telemetry())?.into())
    }

    /// Returns: tuple(point_size, opacity)
    fn render_params(&self) -> (f32, f32) {
        let rp = self.inner.render_params();
        (rp.point_size, rp.opacity)
    }

    #[getter]
    fn particle_count(&self) -> usize {
        self.inner.buffer().count()
    }

    #[getter]
    fn cycle_position(&self) -> u32 {
        self.inner.clock().position()
    }

    #[getter]
    fn frame_count(&self) -> u64 {
        self.inner.frame_count()
    }

    fn __repr__(&self) -> String {
        format!(
            "Simulation(particles={}, mode={}, cycle={}, frames={})",
            self.inner.buffer().count(),
            self.inner.config().mode.as_str(),
            self.inner.clock().position(),
            self.inner.frame_count()
        )
    }
}

/// Ids of the digit sequences shipped with the kernel.
#[pyfunction]
fn builtin_sequences() -> Vec<String> {
    DigitRegistry::builtin()
        .ids()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[pymodule]
fn helios_bridge(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySimulationConfig>()?;
    m.add_class::<PySimulation>()?;
    m.add_function(wrap_pyfunction!(builtin_sequences, m)?)?;
    Ok(())
}

