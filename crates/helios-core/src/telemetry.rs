// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Telemetry Sinks
// ─────────────────────────────────────────────────────────────────────
//! Display handles for the per-tick scalar telemetry.
//!
//! The frame loop pushes one `FrameTelemetry` per tick, synchronously.
//! Hosts plug in a closure (`ExternalTelemetry`); tests use
//! `RecordingTelemetry`.

use helios_types::FrameTelemetry;

/// Receiver of per-tick telemetry.
pub trait TelemetrySink {
    fn publish(&mut self, telemetry: &FrameTelemetry);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn publish(&mut self, _telemetry: &FrameTelemetry) {}
}

type PublishFn = Box<dyn FnMut(&FrameTelemetry) + Send + Sync>;

/// Forwards telemetry to a host callback.
///
/// Used by the PyO3 layer to update Python-side display labels.
pub struct ExternalTelemetry {
    publish_fn: PublishFn,
}

impl ExternalTelemetry {
    pub fn new(publish_fn: impl FnMut(&FrameTelemetry) + Send + Sync + 'static) -> Self {
        Self {
            publish_fn: Box::new(publish_fn),
        }
    }
}

impl TelemetrySink for ExternalTelemetry {
    fn publish(&mut self, telemetry: &FrameTelemetry) {
        (self.publish_fn)(telemetry)
    }
}

/// Keeps every published record.
#[derive(Debug, Default, Clone)]
pub struct RecordingTelemetry {
    history: Vec<FrameTelemetry>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&FrameTelemetry> {
        self.history.last()
    }

    pub fn history(&self) -> &[FrameTelemetry] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn publish(&mut self, telemetry: &FrameTelemetry) {
        self.history.push(*telemetry);
    }
}
