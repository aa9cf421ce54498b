//! Hashing primitives for the Energy ledger.
//!
//! - **Blake2b-256** for all hashing
//! - **Field reduction**: digests shifted right by one byte so they fit the
//!   proof system's scalar field
//! - **External context** derivation binding proofs to an application and action

pub mod context;
pub mod hash;

pub use context::external_context;
pub use hash::{blake2b_256, blake2b_256_multi, hash_to_field, hash_to_field_multi};
