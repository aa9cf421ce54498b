//! Energy spend ledger.
//!
//! Every verified human, identified only by a nullifier, holds a regenerating
//! Energy balance. A spend is accepted exactly once:
//!
//! 1. the asserted nonce must be the stored nonce plus one
//! 2. the proof must verify against the canonical signal of this exact spend
//! 3. the nonce is committed
//! 4. accrual is realized up to now
//! 5. the balance is debited, or the spend fails with the nonce already burned
//!
//! Balance and nonce queries never write.

pub mod config;
pub mod error;
pub mod events;
pub mod ledger;
pub mod metrics;
pub mod record;
pub mod request;

pub use config::EnergyConfig;
pub use error::LedgerError;
pub use events::{EventBus, LedgerEvent};
pub use ledger::{EnergyLedger, LedgerSummary};
pub use metrics::LedgerMetrics;
pub use record::IdentityRecord;
pub use request::{SpendReceipt, SpendRequest};
