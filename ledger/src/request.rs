//! Spend request and receipt.

use energy_signal::SpendSignal;
use energy_types::{Address, FieldHash, Nullifier};
use energy_verifier::Proof;
use serde::{Deserialize, Serialize};

/// A caller-asserted spend, authenticated by `proof`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendRequest {
    /// Identity-set root the proof was made against.
    pub root: FieldHash,
    pub nullifier: Nullifier,
    pub proof: Proof,
    pub spender_tag: Address,
    pub recipient: Address,
    pub amount: u128,
    pub nonce: u64,
}

impl SpendRequest {
    /// The parameters the proof must be bound to.
    pub fn signal(&self) -> SpendSignal {
        SpendSignal::new(self.nonce, self.amount, self.spender_tag, self.recipient)
    }
}

/// Outcome of an accepted spend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendReceipt {
    pub nullifier: Nullifier,
    pub nonce: u64,
    pub amount: u128,
    /// Balance left after the debit.
    pub remaining: u128,
    pub signal_hash: FieldHash,
}
