//! External context (external nullifier) derivation.
//!
//! Proofs are generated against `hash(hash(app_id) || action)`. Binding both
//! the application and the action means a proof for one action cannot be
//! replayed against another action, nor against another application.
//! Every verifier deployment must derive this identically.

use crate::hash::{hash_to_field, hash_to_field_multi};
use energy_types::FieldHash;

/// Derive the external context hash for `action` within `app_id`.
pub fn external_context(app_id: &str, action: &str) -> FieldHash {
    let app_hash = hash_to_field(app_id.as_bytes());
    hash_to_field_multi(&[app_hash.as_bytes(), action.as_bytes()])
}
