//! Identity-proof verification seam.
//!
//! The ledger never checks proofs itself. It assembles a [`ProofRequest`]
//! (public signals plus the proof) and hands it to an [`IdentityVerifier`],
//! which accepts or rejects. Implementations might be:
//! - a remote verification service ([`RemoteVerifier`])
//! - an in-process verifier linked against the proof system
//! - a scripted double for tests (see `energy-nullables`)

pub mod context;
pub mod error;
pub mod proof;
pub mod remote;
pub mod verifier;

pub use context::ActionContext;
pub use error::VerifierError;
pub use proof::{Proof, ProofRequest};
pub use remote::RemoteVerifier;
pub use verifier::IdentityVerifier;
