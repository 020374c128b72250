//! In-Memory Snapshot Store
//!
//! HashMap-backed twin of the file store, for tests and ephemeral
//! sessions. Can simulate write failures to exercise the degraded path.

use super::traits::{SnapshotError, SnapshotStore};
use crate::domain::ItemId;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemorySnapshotStore {
    data: Mutex<HashMap<String, HashSet<ItemId>>>,
    fail_writes: AtomicBool,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail, for testing error handling
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn read_snapshot(&self, key: &str) -> Option<HashSet<ItemId>> {
        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.get(key).cloned()
    }

    fn write_snapshot(&self, key: &str, ids: &HashSet<ItemId>) -> Result<(), SnapshotError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SnapshotError::Io("simulated write failure".to_string()));
        }
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        data.insert(key.to_string(), ids.clone());
        Ok(())
    }
}
