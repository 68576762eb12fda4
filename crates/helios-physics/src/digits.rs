// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Digit Sequence Provider
// ─────────────────────────────────────────────────────────────────────
//! Maps a transcendental-constant id to a cyclic digit stream and
//! returns the digit at a staggered logical position.
//!
//! `digit_at` is total: when no sequence is registered for the mapped
//! id it falls back to `(staggered + axis_index) mod 10`.

use std::collections::HashMap;

use helios_types::{Axis, DigitTriple, HeliosError, HeliosResult, PerAxis, SimulationConfig};

use crate::params::MAX_CYCLE;

/// Built-in sequences: 2500 significant digits, integer part included.
const BUILTIN_SEQUENCES: [(&str, &str); 6] = [
    ("pi", include_str!("../data/pi.txt")),
    ("e", include_str!("../data/e.txt")),
    ("phi", include_str!("../data/phi.txt")),
    ("sqrt2", include_str!("../data/sqrt2.txt")),
    ("sqrt3", include_str!("../data/sqrt3.txt")),
    ("ln2", include_str!("../data/ln2.txt")),
];

/// A named, immutable digit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitSequence {
    id: String,
    digits: Vec<u8>,
}

impl DigitSequence {
    /// Build from raw text. Everything that is not an ASCII digit
    /// (decimal point, whitespace, line breaks) is dropped.
    pub fn new(id: impl Into<String>, raw: &str) -> HeliosResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(HeliosError::Sequence("sequence id must not be empty".into()));
        }
        let digits: Vec<u8> = raw
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        if digits.is_empty() {
            return Err(HeliosError::Sequence(format!(
                "sequence '{id}' contains no digits"
            )));
        }
        Ok(Self { id, digits })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Digit at `index`, wrapping by the sequence length.
    #[inline]
    pub fn digit(&self, index: usize) -> u8 {
        self.digits[index % self.digits.len()]
    }
}

/// Trait for digit sequence lookup backends.
pub trait DigitSource: Send + Sync {
    /// Sequence registered under `id`, if any.
    fn lookup(&self, id: &str) -> Option<&DigitSequence>;
}

/// In-memory sequence registry.
#[derive(Debug, Clone, Default)]
pub struct DigitRegistry {
    sequences: HashMap<String, DigitSequence>,
}

impl DigitRegistry {
    /// Registry with no sequences; every lookup takes the fallback path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry preloaded with `pi`, `e`, `phi`, `sqrt2`, `sqrt3`, `ln2`.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for (id, raw) in BUILTIN_SEQUENCES {
            match DigitSequence::new(id, raw) {
                Ok(seq) => registry.register(seq),
                Err(e) => log::error!("built-in sequence '{id}' unusable: {e}"),
            }
        }
        registry
    }

    /// Register (or replace) a sequence under its own id.
    pub fn register(&mut self, sequence: DigitSequence) {
        self.sequences.insert(sequence.id.clone(), sequence);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sequences.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.sequences.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl DigitSource for DigitRegistry {
    fn lookup(&self, id: &str) -> Option<&DigitSequence> {
        self.sequences.get(id)
    }
}

/// `max(0, (logical_position + stagger) mod MAX_CYCLE)`.
///
/// Truncating remainder: a negative sum leaves a negative remainder,
/// which the `max` clamps to 0.
#[inline]
pub fn staggered_position(logical_position: u32, stagger: i64) -> usize {
    let shifted = (logical_position as i64).saturating_add(stagger) % MAX_CYCLE as i64;
    shifted.max(0) as usize
}

/// Digit for `axis` at `logical_position`, always in 0..=9.
pub fn digit_at(
    source: &dyn DigitSource,
    mapping: &PerAxis<String>,
    stagger: &PerAxis<i64>,
    axis: Axis,
    logical_position: u32,
) -> u8 {
    let staggered = staggered_position(logical_position, *stagger.get(axis));
    match source.lookup(mapping.get(axis)) {
        Some(seq) => seq.digit(staggered),
        None => ((staggered + axis.index()) % 10) as u8,
    }
}

/// The `(m, n, p)` triple for `logical_position` under `config`.
pub fn triple_at(
    source: &dyn DigitSource,
    config: &SimulationConfig,
    logical_position: u32,
) -> DigitTriple {
    let d = |axis| digit_at(source, &config.mapping, &config.stagger, axis, logical_position);
    DigitTriple::new(d(Axis::A), d(Axis::B), d(Axis::C))
}
