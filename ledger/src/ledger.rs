//! The Energy ledger: spend authorization over per-identity records.

use std::sync::{Arc, Mutex, MutexGuard};

use energy_accrual::{AccrualEngine, Accrued};
use energy_store::IdentityStore;
use energy_types::{EnergyParams, FieldHash, Nullifier, Timestamp};
use energy_verifier::{ActionContext, IdentityVerifier, ProofRequest};
use tracing::{debug, info, warn};

use crate::events::{EventBus, LedgerEvent};
use crate::metrics::LedgerMetrics;
use crate::record::IdentityRecord;
use crate::request::{SpendReceipt, SpendRequest};
use crate::LedgerError;

/// Summary statistics for the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerSummary {
    pub identities: u64,
}

/// Number of lock stripes guarding per-identity read-modify-write cycles.
const LOCK_STRIPES: usize = 64;

/// Nonce-sequenced, proof-authorized Energy spends.
///
/// Each mutating call loads one record, works on a copy, and writes it back
/// once at the end. A call that fails before the nonce is committed writes
/// nothing.
///
/// Mutations of one identity are serialized by a striped lock held from
/// load to save, including the verifier call. Queries take no lock: they
/// read whichever record the store last committed.
pub struct EnergyLedger {
    store: Arc<dyn IdentityStore>,
    verifier: Arc<dyn IdentityVerifier>,
    engine: AccrualEngine,
    context: ActionContext,
    external_context: FieldHash,
    events: EventBus,
    metrics: Arc<LedgerMetrics>,
    stripes: Vec<Mutex<()>>,
}

impl EnergyLedger {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        verifier: Arc<dyn IdentityVerifier>,
        context: ActionContext,
        params: EnergyParams,
    ) -> Result<Self, LedgerError> {
        let engine = AccrualEngine::new(params)?;
        let external_context = context.external_context();
        info!(
            app_id = %context.app_id,
            action = %context.action,
            verifier = verifier.name(),
            "energy ledger ready"
        );
        Ok(Self {
            store,
            verifier,
            engine,
            context,
            external_context,
            events: EventBus::new(),
            metrics: Arc::new(LedgerMetrics::new()),
            stripes: (0..LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
        })
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    pub fn metrics(&self) -> Arc<LedgerMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn params(&self) -> &EnergyParams {
        self.engine.params()
    }

    pub fn context(&self) -> &ActionContext {
        &self.context
    }

    /// `hash(hash(app_id) || action)` for the configured context.
    pub fn external_context(&self) -> FieldHash {
        self.external_context
    }

    /// Authorize and apply one spend.
    ///
    /// Order matters: nonce check, proof check, nonce commit, accrual, debit.
    /// Once the proof verifies the nonce is consumed, even if the debit then
    /// fails for lack of Energy.
    pub fn spend(
        &self,
        request: &SpendRequest,
        now: Timestamp,
    ) -> Result<SpendReceipt, LedgerError> {
        let result = self.apply_spend(request, now);
        match &result {
            Ok(receipt) => {
                self.metrics.record_spend(receipt.amount);
                info!(
                    nullifier = %receipt.nullifier,
                    nonce = receipt.nonce,
                    amount = %receipt.amount,
                    remaining = %receipt.remaining,
                    "energy spent"
                );
            }
            Err(e) => {
                self.metrics.record_rejection(e);
                warn!(
                    nullifier = %request.nullifier,
                    nonce = request.nonce,
                    amount = %request.amount,
                    error = %e,
                    "spend rejected"
                );
            }
        }
        result
    }

    fn apply_spend(
        &self,
        request: &SpendRequest,
        now: Timestamp,
    ) -> Result<SpendReceipt, LedgerError> {
        let nullifier = request.nullifier;
        let _guard = self.lock_identity(&nullifier);
        let mut record = self.load(&nullifier)?;

        let expected = record.next_nonce()?;
        if request.nonce != expected {
            return Err(LedgerError::InvalidNonce {
                expected,
                got: request.nonce,
            });
        }

        let signal_hash = request.signal().hash()?;
        let proof_request = ProofRequest {
            root: request.root,
            group_id: self.context.group_id,
            signal_hash,
            nullifier,
            external_context: self.external_context,
            proof: request.proof,
        };
        self.verifier.verify(&proof_request)?;

        // Past this point the nonce is burned whatever happens next.
        record.nonce = request.nonce;

        if let Err(e) = self.engine.advance(&mut record.accrual, now) {
            self.save(&nullifier, &record)?;
            return Err(e.into());
        }

        if let Err(e) = self.engine.debit(&mut record.accrual, request.amount) {
            self.save(&nullifier, &record)?;
            return Err(e.into());
        }

        self.save(&nullifier, &record)?;
        self.events.emit(&LedgerEvent::EnergySpent {
            nullifier,
            spender_tag: request.spender_tag,
            recipient: request.recipient,
            amount: request.amount,
        });

        Ok(SpendReceipt {
            nullifier,
            nonce: request.nonce,
            amount: request.amount,
            remaining: record.accrual.amount,
            signal_hash,
        })
    }

    /// Realize accrual for `nullifier` up to `now` and persist it.
    pub fn realize_balance(
        &self,
        nullifier: &Nullifier,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        let guard = self.lock_identity(nullifier);
        let mut record = self.load(nullifier)?;
        let Accrued {
            amount,
            year,
            periods_elapsed,
        } = self.engine.advance(&mut record.accrual, now)?;
        self.save(nullifier, &record)?;
        drop(guard);

        self.metrics.balances_realized.inc();
        debug!(%nullifier, %amount, %year, periods_elapsed, "balance realized");
        self.events.emit(&LedgerEvent::BalanceRealized {
            nullifier: *nullifier,
            amount,
            year,
            periods_elapsed,
        });
        Ok(amount)
    }

    /// Balance `nullifier` would have at `now`. Never writes.
    pub fn query_balance(&self, nullifier: &Nullifier, now: Timestamp) -> Result<u128, LedgerError> {
        let record = self.load(nullifier)?;
        Ok(self.engine.balance(&record.accrual, now)?)
    }

    /// Last nonce consumed by `nullifier`; zero if it never spent.
    pub fn query_nonce(&self, nullifier: &Nullifier) -> Result<u64, LedgerError> {
        Ok(self.load(nullifier)?.nonce)
    }

    /// The stored record, or the implicit default for an unseen identity.
    pub fn record(&self, nullifier: &Nullifier) -> Result<IdentityRecord, LedgerError> {
        self.load(nullifier)
    }

    pub fn summary(&self) -> Result<LedgerSummary, LedgerError> {
        Ok(LedgerSummary {
            identities: self.store.record_count()?,
        })
    }

    /// Exclusive access to `nullifier`'s record for one load/save cycle.
    ///
    /// The guarded value is `()`, so a poisoned stripe carries no broken
    /// state and is simply reclaimed.
    fn lock_identity(&self, nullifier: &Nullifier) -> MutexGuard<'_, ()> {
        let stripe = nullifier.as_bytes()[0] as usize % LOCK_STRIPES;
        self.stripes[stripe]
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self, nullifier: &Nullifier) -> Result<IdentityRecord, LedgerError> {
        match self.store.get_record(nullifier)? {
            Some(bytes) => IdentityRecord::from_bytes(&bytes),
            None => Ok(IdentityRecord::default()),
        }
    }

    fn save(&self, nullifier: &Nullifier, record: &IdentityRecord) -> Result<(), LedgerError> {
        self.store.put_record(nullifier, &record.to_bytes()?)?;
        Ok(())
    }
}
