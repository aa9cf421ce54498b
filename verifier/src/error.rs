use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("proof rejected: {0}")]
    Rejected(String),

    #[error("verifier unavailable: {0}")]
    Unavailable(String),

    #[error("invalid verifier response: {0}")]
    InvalidResponse(String),
}
