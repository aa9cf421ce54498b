use crate::StoreError;
use energy_types::Nullifier;

/// Store trait for per-identity ledger records.
///
/// Uses opaque `Vec<u8>` so the store doesn't depend on the ledger crate.
/// The ledger serializes/deserializes its own record type.
///
/// Each `put_record` must be atomic: a reader sees either the previous
/// record or the new one, never a partial write. Records are never deleted.
pub trait IdentityStore: Send + Sync {
    fn get_record(&self, nullifier: &Nullifier) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_record(&self, nullifier: &Nullifier, record: &[u8]) -> Result<(), StoreError>;
    fn iter_records(&self) -> Result<Vec<(Nullifier, Vec<u8>)>, StoreError>;

    /// Number of identities with a persisted record.
    fn record_count(&self) -> Result<u64, StoreError> {
        self.iter_records().map(|v| v.len() as u64)
    }
}
