//! Nullable verifier: scripted accept/reject for testing.

use energy_types::FieldHash;
use energy_verifier::{IdentityVerifier, ProofRequest, VerifierError};
use std::collections::VecDeque;
use std::sync::Mutex;

/// What the verifier answers for one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
    /// Simulates an outage of the verification service.
    Unavailable,
    /// Accept only when the request carries this signal hash, i.e. the proof
    /// was generated for exactly one spend.
    AcceptSignal(FieldHash),
}

/// A deterministic verifier for testing.
///
/// Answers scripted verdicts in order, then the fallback verdict forever.
/// Every request is recorded for inspection.
pub struct NullVerifier {
    script: Mutex<VecDeque<Verdict>>,
    fallback: Verdict,
    requests: Mutex<Vec<ProofRequest>>,
}

impl NullVerifier {
    pub fn new(script: Vec<Verdict>, fallback: Verdict) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn accept_all() -> Self {
        Self::new(Vec::new(), Verdict::Accept)
    }

    pub fn reject_all() -> Self {
        Self::new(Vec::new(), Verdict::Reject)
    }

    /// Accept only proofs bound to `signal_hash`.
    pub fn bound_to(signal_hash: FieldHash) -> Self {
        Self::new(Vec::new(), Verdict::AcceptSignal(signal_hash))
    }

    /// All requests seen so far, in call order.
    pub fn requests(&self) -> Vec<ProofRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl IdentityVerifier for NullVerifier {
    fn name(&self) -> &str {
        "null-verifier"
    }

    fn verify(&self, request: &ProofRequest) -> Result<(), VerifierError> {
        self.requests.lock().unwrap().push(request.clone());
        let verdict = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        match verdict {
            Verdict::Accept => Ok(()),
            Verdict::Reject => Err(VerifierError::Rejected("scripted rejection".into())),
            Verdict::Unavailable => Err(VerifierError::Unavailable("scripted outage".into())),
            Verdict::AcceptSignal(expected) if expected == request.signal_hash => Ok(()),
            Verdict::AcceptSignal(_) => Err(VerifierError::Rejected("signal mismatch".into())),
        }
    }
}
