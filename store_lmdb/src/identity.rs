use energy_store::{IdentityStore, StoreError};
use energy_types::Nullifier;
use heed::{types::Bytes, Database, Env};
use std::sync::Arc;

use crate::LmdbError;

/// Identity records keyed by the raw 32 nullifier bytes.
pub struct LmdbIdentityStore {
    env: Arc<Env>,
    identities_db: Database<Bytes, Bytes>,
}

impl LmdbIdentityStore {
    pub fn new(env: Arc<Env>, identities_db: Database<Bytes, Bytes>) -> Self {
        Self { env, identities_db }
    }
}

impl IdentityStore for LmdbIdentityStore {
    fn get_record(&self, nullifier: &Nullifier) -> Result<Option<Vec<u8>>, StoreError> {
        let txn = self.env.read_txn().map_err(LmdbError::from)?;
        let value = self
            .identities_db
            .get(&txn, nullifier.as_bytes())
            .map_err(LmdbError::from)?;
        Ok(value.map(|bytes| bytes.to_vec()))
    }

    fn put_record(&self, nullifier: &Nullifier, record: &[u8]) -> Result<(), StoreError> {
        let mut txn = self.env.write_txn().map_err(LmdbError::from)?;
        self.identities_db
            .put(&mut txn, nullifier.as_bytes(), record)
            .map_err(LmdbError::from)?;
        txn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter_records(&self) -> Result<Vec<(Nullifier, Vec<u8>)>, StoreError> {
        let txn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut results = Vec::new();
        let iter = self.identities_db.iter(&txn).map_err(LmdbError::from)?;
        for item in iter {
            let (key, val) = item.map_err(LmdbError::from)?;
            let nullifier = Nullifier::try_from(key)
                .map_err(|e| StoreError::Corruption(format!("identity key: {e}")))?;
            results.push((nullifier, val.to_vec()));
        }
        Ok(results)
    }

    fn record_count(&self) -> Result<u64, StoreError> {
        let txn = self.env.read_txn().map_err(LmdbError::from)?;
        let count = self.identities_db.len(&txn).map_err(LmdbError::from)?;
        Ok(count)
    }
}
