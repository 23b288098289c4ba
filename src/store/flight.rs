//! Per-entry single-flight locks
//!
//! Calls for the same entry path run one at a time; calls for different
//! entries never wait on each other. Slots are dropped from the map once the
//! last interested caller is done, so the map only holds paths with a call in
//! progress.

use crate::sync::MutexExt;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub(crate) struct Flights {
    slots: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl Flights {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the slot for `key`
    pub(crate) fn run<R>(&self, key: &Path, f: impl FnOnce() -> R) -> R {
        let slot = {
            let mut slots = self.slots.lock_recovered();
            Arc::clone(slots.entry(key.to_path_buf()).or_default())
        };
        let release = Release {
            flights: self,
            key,
            slot,
        };

        let _guard = release.slot.lock_recovered();
        f()
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.slots.lock_recovered().len()
    }
}

/// Drops the slot from the map on the way out, unwinding included
struct Release<'a> {
    flights: &'a Flights,
    key: &'a Path,
    slot: Arc<Mutex<()>>,
}

impl Drop for Release<'_> {
    fn drop(&mut self) {
        let mut slots = self.flights.slots.lock_recovered();
        // map + this caller; anyone else still waiting holds another clone
        if Arc::strong_count(&self.slot) == 2 {
            slots.remove(self.key);
        }
    }
}
