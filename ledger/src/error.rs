use energy_accrual::AccrualError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid nonce: expected {expected}, got {got}")]
    InvalidNonce { expected: u64, got: u64 },

    #[error("insufficient energy: need {needed}, available {available}")]
    InsufficientEnergy { needed: u128, available: u128 },

    #[error("proof rejected: {0}")]
    ProofRejected(String),

    #[error("verifier unavailable: {0}")]
    VerifierUnavailable(String),

    #[error("nonce space exhausted for this identity")]
    NonceExhausted,

    #[error("accrual error: {0}")]
    Accrual(AccrualError),

    #[error("signal error: {0}")]
    Signal(#[from] energy_signal::SignalError),

    #[error("storage error: {0}")]
    Store(#[from] energy_store::StoreError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("config error: {0}")]
    Config(String),
}

impl From<AccrualError> for LedgerError {
    fn from(e: AccrualError) -> Self {
        match e {
            AccrualError::InsufficientEnergy { needed, available } => {
                LedgerError::InsufficientEnergy { needed, available }
            }
            other => LedgerError::Accrual(other),
        }
    }
}

impl From<energy_verifier::VerifierError> for LedgerError {
    fn from(e: energy_verifier::VerifierError) -> Self {
        use energy_verifier::VerifierError;
        match e {
            VerifierError::Rejected(reason) => LedgerError::ProofRejected(reason),
            VerifierError::Unavailable(reason) => LedgerError::VerifierUnavailable(reason),
            VerifierError::InvalidResponse(reason) => LedgerError::VerifierUnavailable(reason),
        }
    }
}
