//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::identity::LmdbIdentityStore;
use crate::LmdbError;

/// Named databases inside the environment.
const IDENTITIES_DB: &str = "identities";
const MAX_DBS: u32 = 4;

/// Default map size: 1 GiB.
pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    identities_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path).map_err(|e| LmdbError::Io(e.to_string()))?;

        // SAFETY: the environment is opened once per process for this path
        // and never re-opened while a handle is alive.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let identities_db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, Some(IDENTITIES_DB))?;
        wtxn.commit()?;

        tracing::info!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env: Arc::new(env),
            identities_db,
        })
    }

    /// Store handle for per-identity records.
    pub fn identity_store(&self) -> LmdbIdentityStore {
        LmdbIdentityStore::new(Arc::clone(&self.env), self.identities_db)
    }

    pub fn env(&self) -> &Arc<Env> {
        &self.env
    }
}
