//! Prometheus metrics for the Energy ledger.
//!
//! [`LedgerMetrics`] owns a dedicated [`Registry`] that the RPC `/metrics`
//! endpoint encodes into the Prometheus text exposition format.

use prometheus::{register_int_counter_with_registry, Encoder, IntCounter, Opts, Registry, TextEncoder};

use crate::LedgerError;

pub struct LedgerMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    /// Spends that passed every check and were debited.
    pub spends_accepted: IntCounter,
    /// Total Energy debited by accepted spends.
    pub energy_spent: IntCounter,
    /// Spends whose nonce was not the stored nonce plus one.
    pub rejected_invalid_nonce: IntCounter,
    /// Spends whose proof the verifier refused.
    pub rejected_proof: IntCounter,
    /// Spends that failed because the verifier could not be reached.
    pub verifier_unavailable: IntCounter,
    /// Verified spends that burned their nonce on an insufficient balance.
    pub rejected_insufficient: IntCounter,
    /// Explicit balance realizations outside a spend.
    pub balances_realized: IntCounter,
}

fn counter(registry: &Registry, name: &str, help: &str) -> IntCounter {
    register_int_counter_with_registry!(Opts::new(name, help), registry)
        .unwrap_or_else(|e| panic!("failed to register {name}: {e}"))
}

impl LedgerMetrics {
    /// Create a fresh set of metrics, all registered under a new
    /// [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();
        Self {
            spends_accepted: counter(
                &registry,
                "energy_spends_accepted_total",
                "Spends authorized and debited",
            ),
            energy_spent: counter(
                &registry,
                "energy_spent_total",
                "Energy units debited by accepted spends",
            ),
            rejected_invalid_nonce: counter(
                &registry,
                "energy_spends_rejected_nonce_total",
                "Spends rejected for an out-of-sequence nonce",
            ),
            rejected_proof: counter(
                &registry,
                "energy_spends_rejected_proof_total",
                "Spends rejected by the identity verifier",
            ),
            verifier_unavailable: counter(
                &registry,
                "energy_verifier_unavailable_total",
                "Spends aborted because the verifier was unreachable",
            ),
            rejected_insufficient: counter(
                &registry,
                "energy_spends_rejected_insufficient_total",
                "Verified spends that exceeded the available balance",
            ),
            balances_realized: counter(
                &registry,
                "energy_balances_realized_total",
                "Explicit balance realizations",
            ),
            registry,
        }
    }

    /// Record an accepted spend of `amount`.
    pub fn record_spend(&self, amount: u128) {
        self.spends_accepted.inc();
        self.energy_spent
            .inc_by(u64::try_from(amount).unwrap_or(u64::MAX));
    }

    /// Bump the rejection counter matching `err`, if any.
    pub fn record_rejection(&self, err: &LedgerError) {
        match err {
            LedgerError::InvalidNonce { .. } => self.rejected_invalid_nonce.inc(),
            LedgerError::ProofRejected(_) => self.rejected_proof.inc(),
            LedgerError::VerifierUnavailable(_) => self.verifier_unavailable.inc(),
            LedgerError::InsufficientEnergy { .. } => self.rejected_insufficient.inc(),
            _ => {}
        }
    }

    /// Encode every registered metric in the Prometheus text format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl Default for LedgerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
