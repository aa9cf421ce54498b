//! Proof and public-signal types.

use energy_types::{FieldHash, Nullifier};
use serde::{Deserialize, Serialize};

/// A Groth16 proof as eight field elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof(pub [FieldHash; 8]);

/// Everything a verifier needs to check one proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRequest {
    /// Merkle root of the identity set the proof was made against.
    pub root: FieldHash,
    /// Which identity set ("verified humans").
    pub group_id: u64,
    /// Hash of the canonical spend signal.
    pub signal_hash: FieldHash,
    /// The identity key the proof discloses.
    pub nullifier: Nullifier,
    /// Application/action binding.
    pub external_context: FieldHash,
    pub proof: Proof,
}
