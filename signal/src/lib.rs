//! Canonical spend-signal encoding.
//!
//! A spend proof authenticates exactly one `{nonce, amount, spenderTag,
//! recipient}` tuple. The tuple is rendered to a compact JSON object with a
//! fixed key order, integers as decimal strings and addresses as
//! `0x`-prefixed 40-digit lowercase hex, then reduced with
//! `energy_crypto::hash_to_field`. The byte layout is a compatibility
//! contract with whoever generates proofs:
//!
//! ```text
//! {"nonce":"1","amount":"50","spenderTag":"0x…","recipient":"0x…"}
//! ```

pub mod error;
pub mod signal;

pub use error::SignalError;
pub use signal::SpendSignal;
