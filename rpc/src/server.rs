//! Axum-based RPC server.

use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use energy_ledger::{EnergyLedger, LedgerError, LedgerMetrics};
use energy_types::Timestamp;
use tracing::info;

use crate::error::RpcError;
use crate::handlers;

/// Source of the current time for ledger calls.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

/// Shared state behind every handler.
///
/// The ledger serializes mutations per identity on its own; queries and
/// spends for other identities proceed while a spend waits on the verifier.
pub struct RpcState {
    ledger: EnergyLedger,
    pub metrics: Arc<LedgerMetrics>,
    clock: Clock,
}

impl RpcState {
    pub fn new(ledger: EnergyLedger) -> Self {
        Self::with_clock(ledger, Arc::new(Timestamp::now))
    }

    pub fn with_clock(ledger: EnergyLedger, clock: Clock) -> Self {
        let metrics = ledger.metrics();
        Self {
            ledger,
            metrics,
            clock,
        }
    }

    /// Run `f` against the ledger on the blocking pool.
    pub async fn with_ledger<T, F>(self: &Arc<Self>, f: F) -> Result<T, RpcError>
    where
        F: FnOnce(&EnergyLedger, Timestamp) -> Result<T, LedgerError> + Send + 'static,
        T: Send + 'static,
    {
        let state = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            let now = (state.clock)();
            f(&state.ledger, now).map_err(RpcError::from)
        })
        .await
        .map_err(|e| RpcError::Server(e.to_string()))?
    }
}

pub struct RpcServer {
    pub listen_addr: String,
    pub state: Arc<RpcState>,
}

impl RpcServer {
    pub fn new(listen_addr: impl Into<String>, state: Arc<RpcState>) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            state,
        }
    }

    pub fn router(state: Arc<RpcState>) -> Router {
        Router::new()
            .route("/spend", post(handlers::spend))
            .route("/balance/:nullifier", get(handlers::balance))
            .route("/nonce/:nullifier", get(handlers::nonce))
            .route("/metrics", get(handlers::metrics))
            .with_state(state)
    }

    /// Start the RPC server. Runs until the server fails.
    pub async fn start(&self) -> Result<(), RpcError> {
        self.start_with_shutdown(std::future::pending()).await
    }

    /// Start the RPC server and stop gracefully once `shutdown` resolves.
    pub async fn start_with_shutdown<S>(&self, shutdown: S) -> Result<(), RpcError>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let app = Self::router(Arc::clone(&self.state));
        let listener = tokio::net::TcpListener::bind(&self.listen_addr)
            .await
            .map_err(|e| RpcError::Server(format!("bind {}: {e}", self.listen_addr)))?;
        info!("RPC server listening on {}", self.listen_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))
    }
}
