//! Shared utilities for the Energy ledger.

pub mod logging;

pub use logging::{init_tracing, LogFormat};
