//! The spend signal and its canonical form.

use crate::error::SignalError;
use energy_crypto::hash_to_field;
use energy_types::{Address, FieldHash};
use serde::Serialize;

/// The parameters of a spend that a proof must be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpendSignal {
    pub nonce: u64,
    pub amount: u128,
    pub spender_tag: Address,
    pub recipient: Address,
}

/// Wire shape of the canonical encoding. Field order here is the key order
/// on the wire.
#[derive(Serialize)]
struct CanonicalSignal {
    nonce: String,
    amount: String,
    #[serde(rename = "spenderTag")]
    spender_tag: String,
    recipient: String,
}

impl SpendSignal {
    pub fn new(nonce: u64, amount: u128, spender_tag: Address, recipient: Address) -> Self {
        Self {
            nonce,
            amount,
            spender_tag,
            recipient,
        }
    }

    /// The canonical textual encoding the proof is generated against.
    pub fn canonical(&self) -> Result<String, SignalError> {
        let wire = CanonicalSignal {
            nonce: self.nonce.to_string(),
            amount: self.amount.to_string(),
            spender_tag: self.spender_tag.to_string(),
            recipient: self.recipient.to_string(),
        };
        Ok(serde_json::to_string(&wire)?)
    }

    /// Field-reduced hash of [`SpendSignal::canonical`].
    pub fn hash(&self) -> Result<FieldHash, SignalError> {
        let encoded = self.canonical()?;
        Ok(hash_to_field(encoded.as_bytes()))
    }
}
