//! RPC error types and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use energy_accrual::AccrualError;
use energy_ledger::LedgerError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("server error: {0}")]
    Server(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl RpcError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            RpcError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            RpcError::Server(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            RpcError::Ledger(e) => match e {
                LedgerError::InvalidNonce { .. } => (StatusCode::CONFLICT, "INVALID_NONCE"),
                LedgerError::NonceExhausted => (StatusCode::CONFLICT, "NONCE_EXHAUSTED"),
                LedgerError::ProofRejected(_) => (StatusCode::UNAUTHORIZED, "PROOF_REJECTED"),
                LedgerError::InsufficientEnergy { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_ENERGY")
                }
                LedgerError::VerifierUnavailable(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "VERIFIER_UNAVAILABLE")
                }
                LedgerError::Signal(_) => (StatusCode::BAD_REQUEST, "BAD_SIGNAL"),
                LedgerError::Store(_) | LedgerError::Serialization(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
                }
                LedgerError::Accrual(
                    AccrualError::TimestampRegression { .. } | AccrualError::UnsetTimestamp,
                ) => (StatusCode::INTERNAL_SERVER_ERROR, "CLOCK_REGRESSION"),
                LedgerError::Accrual(_) | LedgerError::Config(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                }
            },
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = ErrorResponse {
            error: self.to_string(),
            code,
        };
        (status, Json(body)).into_response()
    }
}
