//! RPC request handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use energy_ledger::{SpendReceipt, SpendRequest};
use energy_types::Nullifier;
use serde::{Deserialize, Serialize};

use crate::error::RpcError;
use crate::server::RpcState;

// ── Spend ────────────────────────────────────────────────────────────────

/// Amounts are rendered as decimal strings.
#[derive(Debug, Serialize, Deserialize)]
pub struct SpendResponse {
    pub nullifier: String,
    pub nonce: u64,
    pub amount: String,
    pub remaining: String,
    pub signal_hash: String,
}

impl From<SpendReceipt> for SpendResponse {
    fn from(r: SpendReceipt) -> Self {
        Self {
            nullifier: r.nullifier.to_string(),
            nonce: r.nonce,
            amount: r.amount.to_string(),
            remaining: r.remaining.to_string(),
            signal_hash: r.signal_hash.to_string(),
        }
    }
}

pub async fn spend(
    State(state): State<Arc<RpcState>>,
    body: Result<Json<SpendRequest>, JsonRejection>,
) -> Result<Json<SpendResponse>, RpcError> {
    let Json(request) = body.map_err(|e| RpcError::InvalidRequest(e.body_text()))?;
    let receipt = state
        .with_ledger(move |ledger, now| ledger.spend(&request, now))
        .await?;
    Ok(Json(receipt.into()))
}

// ── Queries ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub nullifier: String,
    pub balance: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NonceResponse {
    pub nullifier: String,
    pub nonce: u64,
}

fn parse_nullifier(raw: &str) -> Result<Nullifier, RpcError> {
    raw.parse()
        .map_err(|e: energy_types::ParseError| RpcError::InvalidRequest(e.to_string()))
}

pub async fn balance(
    State(state): State<Arc<RpcState>>,
    Path(raw): Path<String>,
) -> Result<Json<BalanceResponse>, RpcError> {
    let nullifier = parse_nullifier(&raw)?;
    let balance = state
        .with_ledger(move |ledger, now| ledger.query_balance(&nullifier, now))
        .await?;
    Ok(Json(BalanceResponse {
        nullifier: nullifier.to_string(),
        balance: balance.to_string(),
    }))
}

pub async fn nonce(
    State(state): State<Arc<RpcState>>,
    Path(raw): Path<String>,
) -> Result<Json<NonceResponse>, RpcError> {
    let nullifier = parse_nullifier(&raw)?;
    let nonce = state
        .with_ledger(move |ledger, _| ledger.query_nonce(&nullifier))
        .await?;
    Ok(Json(NonceResponse {
        nullifier: nullifier.to_string(),
        nonce,
    }))
}

// ── Metrics ──────────────────────────────────────────────────────────────

pub async fn metrics(State(state): State<Arc<RpcState>>) -> Result<impl IntoResponse, RpcError> {
    let text = state
        .metrics
        .encode_text()
        .map_err(|e| RpcError::Server(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        text,
    ))
}
