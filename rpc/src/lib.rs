//! JSON-over-HTTP server for the Energy ledger.
//!
//! Provides endpoints for:
//! - Spend submission
//! - Balance and nonce queries
//! - Prometheus metrics

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::{RpcServer, RpcState};
