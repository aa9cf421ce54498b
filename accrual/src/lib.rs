//! Energy accrual: the lazy regeneration state machine.
//!
//! Energy is never ticked forward by a scheduler. Each identity stores a
//! checkpoint `(amount, year, last_claim)` and the current balance is a pure
//! function of that checkpoint and `now`:
//!
//! - first contact: `bootstrap_periods × rate`
//! - year boundary crossed since the checkpoint: `0` (unspent Energy expires)
//! - otherwise: `amount + ⌊(now − last_claim) / period⌋ × rate`
//!
//! This crate handles:
//! - Balance computation from time and stored state
//! - Realizing accrual into the stored checkpoint
//! - Debiting spent Energy

pub mod engine;
pub mod error;
pub mod state;

pub use engine::AccrualEngine;
pub use error::AccrualError;
pub use state::{AccrualState, Accrued};
