use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("signal encoding failed: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for SignalError {
    fn from(e: serde_json::Error) -> Self {
        SignalError::Encoding(e.to_string())
    }
}
