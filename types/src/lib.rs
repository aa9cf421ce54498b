//! Fundamental types for the Energy ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! identity nullifiers, recipient addresses, field hashes, timestamps and the
//! approximate calendar, plus the accrual parameters.

pub mod address;
pub mod error;
pub mod hash;
mod hex_repr;
pub mod nullifier;
pub mod params;
pub mod time;

pub use address::Address;
pub use error::ParseError;
pub use hash::FieldHash;
pub use nullifier::Nullifier;
pub use params::EnergyParams;
pub use time::{Timestamp, Year};
