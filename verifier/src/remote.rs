//! HTTP client for a remote verification service.
//!
//! The service receives the [`ProofRequest`] as a JSON `POST` body and
//! answers `{"valid": bool, "reason": string?}`.

use std::time::Duration;

use serde::Deserialize;

use crate::error::VerifierError;
use crate::proof::ProofRequest;
use crate::verifier::IdentityVerifier;

/// Verifier that delegates to a remote service over HTTP.
///
/// Uses the blocking `reqwest` client: callers inside an async runtime must
/// run ledger calls on a blocking thread.
pub struct RemoteVerifier {
    endpoint: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    valid: bool,
    #[serde(default)]
    reason: Option<String>,
}

impl RemoteVerifier {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, VerifierError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VerifierError::Unavailable(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl IdentityVerifier for RemoteVerifier {
    fn name(&self) -> &str {
        "remote"
    }

    fn verify(&self, request: &ProofRequest) -> Result<(), VerifierError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| VerifierError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VerifierError::Unavailable(format!(
                "{} returned {status}",
                self.endpoint
            )));
        }

        let body = response
            .text()
            .map_err(|e| VerifierError::InvalidResponse(e.to_string()))?;
        parse_verdict(&body)?;
        tracing::debug!(nullifier = %request.nullifier, "remote verifier accepted proof");
        Ok(())
    }
}

fn parse_verdict(body: &str) -> Result<(), VerifierError> {
    let parsed: VerifyResponse =
        serde_json::from_str(body).map_err(|e| VerifierError::InvalidResponse(e.to_string()))?;
    if parsed.valid {
        Ok(())
    } else {
        Err(VerifierError::Rejected(
            parsed.reason.unwrap_or_else(|| "invalid proof".to_string()),
        ))
    }
}
