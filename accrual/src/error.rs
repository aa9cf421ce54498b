//! Accrual-specific errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccrualError {
    #[error("insufficient energy: need {needed}, available {available}")]
    InsufficientEnergy { needed: u128, available: u128 },

    #[error("arithmetic overflow in accrual computation")]
    Overflow,

    #[error("timestamp {now} precedes last claim {last_claim}")]
    TimestampRegression { now: u64, last_claim: u64 },

    #[error("cannot realize accrual at the epoch, it would leave the checkpoint unset")]
    UnsetTimestamp,

    #[error("accrual period must be non-zero")]
    ZeroPeriod,
}
