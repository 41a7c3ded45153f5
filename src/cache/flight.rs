//! Per-key single-flight guards.
//!
//! Concurrent requests for the same uncached page acquire the same lease and
//! serialize on it, so exactly one of them generates while the rest find the
//! freshly stored page on re-check.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use super::keys::PageKey;

#[derive(Default)]
pub struct FlightMap {
    leases: DashMap<PageKey, Arc<Mutex<()>>>,
}

impl FlightMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared lease for `key`, created on first use.
    pub fn lease(&self, key: PageKey) -> Arc<Mutex<()>> {
        self.leases.entry(key).or_default().clone()
    }

    /// Drops the lease for `key`. Used after generation for an unknown id so
    /// probes for arbitrary ids cannot grow the map without bound.
    pub fn forget(&self, key: &PageKey) {
        self.leases.remove(key);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.leases.len()
    }
}
