//! Per-identity accrual checkpoint.

use energy_types::{Timestamp, Year};
use serde::{Deserialize, Serialize};

/// Accrual state for a single identity.
///
/// The all-zero default is the implicit state of an identity that has never
/// been seen. `amount` is only meaningful relative to `year`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualState {
    /// Energy available as of `year`.
    pub amount: u128,

    /// The year in which `amount` was last computed.
    pub year: Year,

    /// Last moment whole periods were credited into `amount`.
    /// Zero means the identity has never been initialized.
    pub last_claim: Timestamp,
}

impl AccrualState {
    pub fn new(amount: u128, year: Year, last_claim: Timestamp) -> Self {
        Self {
            amount,
            year,
            last_claim,
        }
    }

    /// Whether accrual has ever been realized for this identity.
    pub fn is_initialized(&self) -> bool {
        !self.last_claim.is_unset()
    }
}

/// Result of evaluating an [`AccrualState`] at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accrued {
    /// Energy available at the evaluation time.
    pub amount: u128,
    /// Year the amount is valid for.
    pub year: Year,
    /// Whole periods credited since `last_claim`. Zero for the bootstrap and
    /// yearly-reset branches.
    pub periods_elapsed: u64,
}
