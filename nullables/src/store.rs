//! Nullable store: thread-safe in-memory storage for testing.

use energy_store::{IdentityStore, StoreError};
use energy_types::Nullifier;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// An in-memory identity store for testing.
///
/// Counts writes and can be told to fail them, so tests can assert that a
/// rejected operation wrote nothing.
pub struct NullStore {
    records: Mutex<HashMap<Nullifier, Vec<u8>>>,
    writes: AtomicU64,
    fail_writes: AtomicBool,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            writes: AtomicU64::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Total successful `put_record` calls.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every subsequent `put_record` fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityStore for NullStore {
    fn get_record(&self, nullifier: &Nullifier) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.records.lock().unwrap().get(nullifier).cloned())
    }

    fn put_record(&self, nullifier: &Nullifier, record: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("write failure injected".into()));
        }
        self.records
            .lock()
            .unwrap()
            .insert(*nullifier, record.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn iter_records(&self) -> Result<Vec<(Nullifier, Vec<u8>)>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect())
    }
}
