//! LMDB storage backend for the Energy ledger.
//!
//! Implements the storage traits from `energy-store` using the `heed` LMDB
//! bindings. Every record write is its own LMDB write transaction, which
//! gives the all-or-nothing guarantee the ledger relies on.

pub mod environment;
pub mod error;
pub mod identity;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use identity::LmdbIdentityStore;
