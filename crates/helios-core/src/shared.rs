// ─────────────────────────────────────────────────────────────────────
// HELIOS Bridge — Copy-on-Write Config Handle
// ─────────────────────────────────────────────────────────────────────
//! Writers replace the whole configuration; readers take a cheap
//! `Arc` snapshot and never observe a half-written config.

use std::sync::Arc;

use parking_lot::RwLock;

use helios_types::SimulationConfig;

#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<Arc<SimulationConfig>>>,
}

impl SharedConfig {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// Swap in a new configuration.
    pub fn replace(&self, config: SimulationConfig) {
        *self.inner.write() = Arc::new(config);
        log::debug!("SharedConfig: configuration replaced");
    }

    /// Clone the current config, edit the clone, swap it in.
    pub fn update(&self, edit: impl FnOnce(&mut SimulationConfig)) {
        let mut guard = self.inner.write();
        let mut next = SimulationConfig::clone(&guard);
        edit(&mut next);
        *guard = Arc::new(next);
    }

    /// Current configuration. Later writes do not affect the snapshot.
    pub fn snapshot(&self) -> Arc<SimulationConfig> {
        Arc::clone(&self.inner.read())
    }
}
