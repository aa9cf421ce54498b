//! Abstract storage traits for the Energy ledger.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits.

pub mod error;
pub mod identity;

pub use error::StoreError;
pub use identity::IdentityStore;
