// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Phase Clock
// ─────────────────────────────────────────────────────────────────────
//! Decouples logical ticks (digit-sequence advances) from the render
//! frame rate.
//!
//! While running, a frame whose timestamp is more than `1000 / speed`
//! ms past the last tick advances the cycle by exactly one position.
//! Missed intervals are never caught up, so a stalled host (minimised
//! window, backgrounded tab) resumes at one tick per interval.

use crate::params::MAX_CYCLE;

/// Mutable cycle bookkeeping owned by the clock.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CycleState {
    /// Logical cycle position in `[0, MAX_CYCLE)`.
    pub current_pos: u32,
    /// Host timestamp (ms) of the last committed tick.
    pub last_tick_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Paused,
    Running,
}

#[derive(Debug, Clone)]
pub struct PhaseClock {
    cycle: CycleState,
    state: ClockState,
    interval_ms: f64,
    /// Elapsed share of the current interval, frozen while paused.
    fraction: f32,
}

impl Default for PhaseClock {
    fn default() -> Self {
        Self::new(2.0, true)
    }
}

impl PhaseClock {
    pub fn new(speed: f32, playing: bool) -> Self {
        let mut clock = Self {
            cycle: CycleState::default(),
            state: ClockState::Paused,
            interval_ms: f64::INFINITY,
            fraction: 0.0,
        };
        clock.configure(speed, playing);
        clock
    }

    /// Apply `speed` (ticks per second) and the play flag.
    ///
    /// A non-positive or non-finite speed yields an infinite interval:
    /// the clock runs but never ticks.
    pub fn configure(&mut self, speed: f32, playing: bool) {
        self.interval_ms = if speed.is_finite() && speed > 0.0 {
            1000.0 / speed as f64
        } else {
            f64::INFINITY
        };
        self.state = if playing {
            ClockState::Running
        } else {
            ClockState::Paused
        };
    }

    /// Per-frame check. Returns `true` when a tick was committed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if self.state == ClockState::Paused {
            return false;
        }
        let elapsed = now_ms - self.cycle.last_tick_ms;
        let ticked = elapsed > self.interval_ms;
        if ticked {
            self.advance();
            self.cycle.last_tick_ms = now_ms;
            self.fraction = 0.0;
        } else if self.interval_ms.is_finite() {
            self.fraction = (elapsed / self.interval_ms).clamp(0.0, 1.0) as f32;
        }
        ticked
    }

    /// Advance the cycle by one position, wrapping at `MAX_CYCLE`.
    #[inline]
    pub fn advance(&mut self) {
        self.cycle.current_pos = (self.cycle.current_pos + 1) % MAX_CYCLE;
    }

    /// Back to position 0 with no tick history.
    pub fn reset(&mut self) {
        self.cycle = CycleState::default();
        self.fraction = 0.0;
    }

    #[inline]
    pub fn position(&self) -> u32 {
        self.cycle.current_pos
    }

    /// Continuous logical time: cycle position plus the elapsed share of
    /// the current interval.
    #[inline]
    pub fn logical_time(&self) -> f32 {
        self.cycle.current_pos as f32 + self.fraction
    }

    pub fn cycle(&self) -> CycleState {
        self.cycle
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}
