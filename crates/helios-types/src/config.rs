// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Simulation Configuration
// ─────────────────────────────────────────────────────────────────────

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HeliosError, HeliosResult};

/// Smallest particle count the renderer is tuned for.
pub const MIN_PARTICLES: usize = 1_000;
/// Largest particle count the renderer is tuned for.
pub const MAX_PARTICLES: usize = 1_000_000;

/// One of the three digit axes. `A` drives `m`, `B` drives `n`, `C` drives `p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    A,
    B,
    C,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::A, Axis::B, Axis::C];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::A => 0,
            Axis::B => 1,
            Axis::C => 2,
        }
    }
}

/// A value per digit axis, serialised as `{ "a": .., "b": .., "c": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerAxis<T> {
    pub a: T,
    pub b: T,
    pub c: T,
}

impl<T> PerAxis<T> {
    pub fn new(a: T, b: T, c: T) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::A => &self.a,
            Axis::B => &self.b,
            Axis::C => &self.c,
        }
    }
}

/// Active simulation mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    #[default]
    Standard,
    Crystal,
    Harmonic,
    Topology,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Standard, Mode::Crystal, Mode::Harmonic, Mode::Topology];

    /// Wire name, as serialised.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Standard => "STANDARD",
            Mode::Crystal => "CRYSTAL",
            Mode::Harmonic => "HARMONIC",
            Mode::Topology => "TOPOLOGY",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive.
impl FromStr for Mode {
    type Err = HeliosError;

    fn from_str(s: &str) -> HeliosResult<Self> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| HeliosError::Validation(format!("unknown mode '{s}'")))
    }
}

/// Crystal overlay sub-features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrystalExtensions {
    /// Snap the XY polar angle toward multiples of 120°.
    pub three_fold: bool,
    /// Snap the XY polar angle toward multiples of 60°.
    pub six_fold: bool,
    /// Pull (x, y) toward the nearest triangular lattice node.
    pub lattice: bool,
}

/// Harmonic overlay sub-features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonicExtensions {
    /// Rotation about Z whose strength oscillates over logical time.
    pub comma_spiral: bool,
    /// Sinusoidal force at 1.5× the standing-wave frequency.
    pub perfect_fifth: bool,
}

/// Topology overlay sub-features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyExtensions {
    /// Pull toward the trefoil knot.
    pub trefoil: bool,
    /// Contain particles inside the torus.
    pub torus: bool,
}

/// Per-mode boolean feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Extensions {
    pub crystal: CrystalExtensions,
    pub harmonic: HarmonicExtensions,
    pub topology: TopologyExtensions,
}

impl Extensions {
    /// Flag names accepted by `enable`, in display order.
    pub const FLAG_NAMES: [&'static str; 7] = [
        "three_fold",
        "six_fold",
        "lattice",
        "comma_spiral",
        "perfect_fifth",
        "trefoil",
        "torus",
    ];

    /// Build from a list of flag names.
    pub fn from_names<I>(names: I) -> HeliosResult<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut ext = Self::default();
        for name in names {
            ext.enable(name.as_ref())?;
        }
        Ok(ext)
    }

    /// Set one flag by name.
    pub fn enable(&mut self, name: &str) -> HeliosResult<()> {
        let slot = match name {
            "three_fold" => &mut self.crystal.three_fold,
            "six_fold" => &mut self.crystal.six_fold,
            "lattice" => &mut self.crystal.lattice,
            "comma_spiral" => &mut self.harmonic.comma_spiral,
            "perfect_fifth" => &mut self.harmonic.perfect_fifth,
            "trefoil" => &mut self.topology.trefoil,
            "torus" => &mut self.topology.torus,
            other => {
                return Err(HeliosError::Validation(format!(
                    "unknown extension flag '{other}'"
                )))
            }
        };
        *slot = true;
        Ok(())
    }

    /// Names of the set flags, in `FLAG_NAMES` order.
    pub fn enabled_names(&self) -> Vec<&'static str> {
        let set = [
            self.crystal.three_fold,
            self.crystal.six_fold,
            self.crystal.lattice,
            self.harmonic.comma_spiral,
            self.harmonic.perfect_fifth,
            self.topology.trefoil,
            self.topology.torus,
        ];
        Self::FLAG_NAMES
            .into_iter()
            .zip(set)
            .filter_map(|(name, on)| on.then_some(name))
            .collect()
    }

    /// True when the overlay for `mode` has at least one flag set.
    pub fn any_enabled(&self, mode: Mode) -> bool {
        match mode {
            Mode::Standard => false,
            Mode::Crystal => {
                let c = self.crystal;
                c.three_fold || c.six_fold || c.lattice
            }
            Mode::Harmonic => self.harmonic.comma_spiral || self.harmonic.perfect_fifth,
            Mode::Topology => self.topology.trefoil || self.topology.torus,
        }
    }
}

/// Runtime configuration for one simulation.
///
/// Supplied by the host UI and replaced wholesale on every edit; the
/// kernel never mutates a config it has been handed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of particles. Supported range is 10³–10⁶; the kernel does
    /// not enforce it (see `clamp_particle_count`).
    pub particle_count: usize,

    /// Logical ticks per second. Default: 2.0.
    pub speed: f32,

    /// Standing-wave force scale. Default: 1.0.
    pub amplitude: f32,

    /// Point size and brightness scale. Default: 1.0.
    pub quality: f32,

    /// Active overlay mode.
    pub mode: Mode,

    /// Transcendental constant id per axis (`pi`, `e`, `phi`, ...).
    pub mapping: PerAxis<String>,

    /// Integer phase offset per axis, added to the cycle position.
    pub stagger: PerAxis<i64>,

    /// Per-mode feature flags.
    pub extensions: Extensions,

    /// Whether the phase clock is running.
    pub is_playing: bool,

    /// Seed for the initial grid jitter.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 50_000,
            speed: 2.0,
            amplitude: 1.0,
            quality: 1.0,
            mode: Mode::Standard,
            mapping: PerAxis::new("pi".to_string(), "e".to_string(), "phi".to_string()),
            stagger: PerAxis::new(0, 0, 0),
            extensions: Extensions::default(),
            is_playing: true,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Validate configuration parameters.
    ///
    /// The kernel never calls this; hosts do before handing a config over.
    pub fn validate(&self) -> HeliosResult<()> {
        if !(MIN_PARTICLES..=MAX_PARTICLES).contains(&self.particle_count) {
            return Err(HeliosError::Config(format!(
                "particle_count must be in [{MIN_PARTICLES}, {MAX_PARTICLES}], got {}",
                self.particle_count
            )));
        }
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(HeliosError::Config(format!(
                "speed must be finite and > 0, got {}",
                self.speed
            )));
        }
        if !self.amplitude.is_finite() {
            return Err(HeliosError::Config(format!(
                "amplitude must be finite, got {}",
                self.amplitude
            )));
        }
        if !self.quality.is_finite() || self.quality <= 0.0 {
            return Err(HeliosError::Config(format!(
                "quality must be finite and > 0, got {}",
                self.quality
            )));
        }
        for axis in Axis::ALL {
            if self.mapping.get(axis).trim().is_empty() {
                return Err(HeliosError::Config(format!(
                    "mapping for axis {axis:?} must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Copy with `particle_count` clamped into the supported range.
    pub fn clamp_particle_count(mut self) -> Self {
        self.particle_count = self.particle_count.clamp(MIN_PARTICLES, MAX_PARTICLES);
        self
    }

    /// Milliseconds between two ticks of the phase clock.
    #[inline]
    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / self.speed as f64
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> HeliosResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| HeliosError::Config(format!("JSON parse error: {e}")))
    }

    /// Serialise to a JSON string.
    pub fn to_json(&self) -> HeliosResult<String> {
        serde_json::to_string(self)
            .map_err(|e| HeliosError::Config(format!("JSON encode error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{mode}\""));
        }
        assert_eq!("crystal".parse::<Mode>().unwrap(), Mode::Crystal);
    }

    #[test]
    fn test_unknown_mode_is_validation_error() {
        let err = "FRACTAL".parse::<Mode>().unwrap_err();
        assert!(matches!(err, HeliosError::Validation(_)));
        assert!(err.to_string().contains("FRACTAL"));
    }

    #[test]
    fn test_extensions_from_names() {
        let ext = Extensions::from_names(["lattice", "torus"]).unwrap();
        assert!(ext.crystal.lattice && ext.topology.torus);
        assert!(!ext.crystal.six_fold);
        assert_eq!(ext.enabled_names(), vec!["lattice", "torus"]);
        let all = Extensions::from_names(Extensions::FLAG_NAMES).unwrap();
        assert_eq!(all.enabled_names(), Extensions::FLAG_NAMES.to_vec());
    }

    #[test]
    fn test_unknown_flag_is_validation_error() {
        let mut ext = Extensions::default();
        let err = ext.enable("nine_fold").unwrap_err();
        assert!(matches!(err, HeliosError::Validation(_)));
        assert_eq!(ext, Extensions::default());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_particle_count_out_of_range() {
        let cfg = SimulationConfig {
            particle_count: 8,
            ..SimulationConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("particle_count"));
    }

    #[test]
    fn test_clamp_particle_count() {
        let low = SimulationConfig {
            particle_count: 3,
            ..SimulationConfig::default()
        };
        assert_eq!(low.clamp_particle_count().particle_count, MIN_PARTICLES);
        let high = SimulationConfig {
            particle_count: 5_000_000,
            ..SimulationConfig::default()
        };
        assert_eq!(high.clamp_particle_count().particle_count, MAX_PARTICLES);
    }

    #[test]
    fn test_zero_speed_rejected() {
        let cfg = SimulationConfig {
            speed: 0.0,
            ..SimulationConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_empty_mapping_rejected() {
        let mut cfg = SimulationConfig::default();
        cfg.mapping.b = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_tick_interval() {
        let cfg = SimulationConfig {
            speed: 4.0,
            ..SimulationConfig::default()
        };
        assert!((cfg.tick_interval_ms() - 250.0).abs() < 1e-12);
    }

    #[test]
    fn test_json_round_trip() {
        let mut cfg = SimulationConfig {
            mode: Mode::Topology,
            stagger: PerAxis::new(3, -7, 11),
            ..SimulationConfig::default()
        };
        cfg.extensions.topology.torus = true;
        let json = cfg.to_json().unwrap();
        assert!(json.contains("\"TOPOLOGY\""));
        let back = SimulationConfig::from_json(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = SimulationConfig::from_json(
            r#"{"particle_count": 2000, "mode": "CRYSTAL", "extensions": {"crystal": {"lattice": true}}}"#,
        )
        .unwrap();
        assert_eq!(cfg.particle_count, 2000);
        assert_eq!(cfg.mode, Mode::Crystal);
        assert!(cfg.extensions.crystal.lattice);
        assert!(!cfg.extensions.crystal.three_fold);
        assert_eq!(cfg.mapping.a, "pi");
    }

    #[test]
    fn test_bad_json() {
        let err = SimulationConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, HeliosError::Config(_)));
    }

    #[test]
    fn test_any_enabled() {
        let mut ext = Extensions::default();
        assert!(!ext.any_enabled(Mode::Crystal));
        ext.harmonic.perfect_fifth = true;
        assert!(ext.any_enabled(Mode::Harmonic));
        assert!(!ext.any_enabled(Mode::Crystal));
        assert!(!ext.any_enabled(Mode::Standard));
    }

    #[test]
    fn test_axis_index() {
        let idx: Vec<usize> = Axis::ALL.iter().map(|a| a.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }
}
