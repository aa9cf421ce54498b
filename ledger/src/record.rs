//! The persisted per-identity record.

use energy_accrual::AccrualState;
use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Everything the ledger stores for one nullifier.
///
/// Missing records read as the all-zero default, so an identity exists
/// implicitly from its first interaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub accrual: AccrualState,
    /// Last nonce consumed. Zero means none yet.
    pub nonce: u64,
}

impl IdentityRecord {
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        bincode::deserialize(bytes).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// The nonce the next spend must carry.
    pub fn next_nonce(&self) -> Result<u64, LedgerError> {
        self.nonce.checked_add(1).ok_or(LedgerError::NonceExhausted)
    }
}
