//! Pluggable verifier trait.

use crate::error::VerifierError;
use crate::proof::ProofRequest;

/// A synchronous accept/reject oracle for identity proofs.
///
/// `Ok(())` means the proof is valid for exactly the public signals in the
/// request. Any error fails the calling operation without side effects.
pub trait IdentityVerifier: Send + Sync {
    /// Human-readable name of this verifier.
    fn name(&self) -> &str;

    /// Verify `request.proof` against its public signals.
    fn verify(&self, request: &ProofRequest) -> Result<(), VerifierError>;
}
