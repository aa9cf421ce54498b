//! End-to-end spend authorization against nullable collaborators.

use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use energy_accrual::AccrualError;
use energy_ledger::{EnergyLedger, LedgerError, LedgerEvent, SpendRequest};
use energy_nullables::{NullClock, NullStore, NullVerifier, Verdict};
use energy_signal::SpendSignal;
use energy_types::{Address, EnergyParams, FieldHash, Nullifier, Timestamp, Year};
use energy_verifier::{ActionContext, IdentityVerifier, Proof, ProofRequest, VerifierError};

const APP_ID: &str = "app_test_energy";
const DAY: u64 = 86_400;
const WEEK: u64 = 7 * DAY;

struct Harness {
    ledger: EnergyLedger,
    store: Arc<NullStore>,
    verifier: Arc<NullVerifier>,
    clock: NullClock,
}

impl Harness {
    fn new(verifier: NullVerifier) -> Self {
        let store = Arc::new(NullStore::new());
        let verifier = Arc::new(verifier);
        let ledger = EnergyLedger::new(
            store.clone(),
            verifier.clone(),
            ActionContext::spend(APP_ID),
            EnergyParams::default(),
        )
        .unwrap();
        Self {
            ledger,
            store,
            verifier,
            clock: NullClock::in_year(2030, 1_000),
        }
    }

    fn spend(&self, nonce: u64, amount: u128) -> Result<energy_ledger::SpendReceipt, LedgerError> {
        let now = self.clock.now();
        self.ledger.spend(&request(nonce, amount), now)
    }

    fn balance(&self) -> u128 {
        self.ledger.query_balance(&alice(), self.clock.now()).unwrap()
    }

    fn nonce(&self) -> u64 {
        self.ledger.query_nonce(&alice()).unwrap()
    }
}

fn alice() -> Nullifier {
    Nullifier::new([0xA1; 32])
}

fn tag() -> Address {
    Address::new([0x5E; 20])
}

fn shop() -> Address {
    Address::new([0xC0; 20])
}

fn request(nonce: u64, amount: u128) -> SpendRequest {
    SpendRequest {
        root: FieldHash::new([0; 32]),
        nullifier: alice(),
        proof: Proof::default(),
        spender_tag: tag(),
        recipient: shop(),
        amount,
        nonce,
    }
}

#[test]
fn unseen_identity_reads_bootstrap_grant_without_writing() {
    let h = Harness::new(NullVerifier::accept_all());
    assert_eq!(h.balance(), 200);
    assert_eq!(h.nonce(), 0);
    assert_eq!(h.store.write_count(), 0);
    assert_eq!(h.ledger.summary().unwrap().identities, 0);
}

#[test]
fn first_spend_bootstraps_then_debits() {
    let h = Harness::new(NullVerifier::accept_all());
    let t0 = h.clock.now();

    let receipt = h.spend(1, 50).unwrap();
    assert_eq!(receipt.remaining, 150);
    assert_eq!(receipt.nonce, 1);

    let record = h.ledger.record(&alice()).unwrap();
    assert_eq!(record.nonce, 1);
    assert_eq!(record.accrual.amount, 150);
    assert_eq!(record.accrual.year, Year::new(2030));
    assert_eq!(record.accrual.last_claim, t0);
    assert_eq!(h.store.write_count(), 1);
}

#[test]
fn only_whole_periods_accrue() {
    let h = Harness::new(NullVerifier::accept_all());
    h.spend(1, 200).unwrap();
    assert_eq!(h.balance(), 0);

    h.clock.advance(6 * DAY);
    assert_eq!(h.balance(), 0);

    h.clock.advance(DAY);
    assert_eq!(h.balance(), 100);

    h.clock.advance(2 * WEEK + 10);
    assert_eq!(h.balance(), 300);
}

#[test]
fn sub_period_realization_keeps_checkpoint() {
    let h = Harness::new(NullVerifier::accept_all());
    let t0 = h.clock.now();
    assert_eq!(h.ledger.realize_balance(&alice(), t0).unwrap(), 200);

    h.clock.advance(4 * DAY);
    assert_eq!(h.ledger.realize_balance(&alice(), h.clock.now()).unwrap(), 200);
    assert_eq!(h.ledger.record(&alice()).unwrap().accrual.last_claim, t0);

    h.clock.advance(4 * DAY);
    let t8 = h.clock.now();
    assert_eq!(h.ledger.realize_balance(&alice(), t8).unwrap(), 300);
    assert_eq!(h.ledger.record(&alice()).unwrap().accrual.last_claim, t8);

    // Six days after the new checkpoint: still no further credit.
    h.clock.advance(6 * DAY);
    assert_eq!(h.balance(), 300);
}

#[test]
fn balance_expires_at_year_boundary() {
    let h = Harness::new(NullVerifier::accept_all());
    let t0 = h.clock.now();
    h.spend(1, 50).unwrap();
    assert_eq!(h.balance(), 150);

    h.clock.set(Year::new(2031).start().as_secs() + 1_000);
    assert_eq!(h.balance(), 0);

    assert_eq!(h.ledger.realize_balance(&alice(), h.clock.now()).unwrap(), 0);
    let record = h.ledger.record(&alice()).unwrap();
    assert_eq!(record.accrual.year, Year::new(2031));
    assert_eq!(record.accrual.last_claim, t0);
}

#[test]
fn accrual_after_reset_measures_from_previous_checkpoint() {
    let h = Harness::new(NullVerifier::accept_all());
    h.spend(1, 200).unwrap();

    h.clock.set(Year::new(2031).start().as_secs() + 1_000);
    h.ledger.realize_balance(&alice(), h.clock.now()).unwrap();

    // 365 days plus one week since the 2030 checkpoint: 53 whole periods.
    h.clock.advance(WEEK);
    assert_eq!(h.balance(), 5_300);
}

#[test]
fn nonce_must_be_exactly_next() {
    let h = Harness::new(NullVerifier::accept_all());

    let err = h.spend(2, 10).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidNonce { expected: 1, got: 2 }));
    assert_eq!(h.store.write_count(), 0);
    assert_eq!(h.verifier.call_count(), 0);

    h.spend(1, 10).unwrap();

    let err = h.spend(1, 10).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidNonce { expected: 2, got: 1 }));
    let err = h.spend(0, 10).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidNonce { expected: 2, got: 0 }));

    h.spend(2, 10).unwrap();
    assert_eq!(h.nonce(), 2);
}

#[test]
fn insufficient_balance_burns_nonce_and_keeps_realized_accrual() {
    let h = Harness::new(NullVerifier::accept_all());
    let t0 = h.clock.now();

    let err = h.spend(1, 500).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::InsufficientEnergy {
            needed: 500,
            available: 200
        }
    ));
    assert_eq!(h.nonce(), 1);
    let record = h.ledger.record(&alice()).unwrap();
    assert_eq!(record.accrual.amount, 200);
    assert_eq!(record.accrual.last_claim, t0);

    // The same nonce is now spent; the next one works.
    assert!(matches!(
        h.spend(1, 10).unwrap_err(),
        LedgerError::InvalidNonce { expected: 2, got: 1 }
    ));
    assert_eq!(h.spend(2, 10).unwrap().remaining, 190);
}

#[test]
fn debit_emits_exact_notification() {
    let mut h = Harness::new(NullVerifier::accept_all());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    h.ledger
        .subscribe(Box::new(move |e| sink.lock().unwrap().push(e.clone())));

    let receipt = h.spend(1, 75).unwrap();
    assert_eq!(receipt.remaining, 125);
    assert_eq!(h.balance(), 125);

    let events = seen.lock().unwrap();
    assert_eq!(
        *events,
        vec![LedgerEvent::EnergySpent {
            nullifier: alice(),
            spender_tag: tag(),
            recipient: shop(),
            amount: 75,
        }]
    );
}

#[test]
fn failed_spend_emits_nothing() {
    let mut h = Harness::new(NullVerifier::accept_all());
    let seen = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&seen);
    h.ledger
        .subscribe(Box::new(move |_| *sink.lock().unwrap() += 1));

    h.spend(1, 1_000).unwrap_err();
    h.spend(5, 1).unwrap_err();
    assert_eq!(*seen.lock().unwrap(), 0);
}

#[test]
fn proof_is_bound_to_every_spend_parameter() {
    let bound = SpendSignal::new(1, 40, tag(), shop()).hash().unwrap();
    let h = Harness::new(NullVerifier::bound_to(bound));

    // Same proof reused for a different recipient.
    let mut redirected = request(1, 40);
    redirected.recipient = Address::new([0xBA; 20]);
    let err = h.ledger.spend(&redirected, h.clock.now()).unwrap_err();
    assert!(matches!(err, LedgerError::ProofRejected(_)));

    // Same proof reused for a different amount.
    let err = h.spend(1, 41).unwrap_err();
    assert!(matches!(err, LedgerError::ProofRejected(_)));
    assert_eq!(h.nonce(), 0);
    assert_eq!(h.store.write_count(), 0);

    let receipt = h.spend(1, 40).unwrap();
    assert_eq!(receipt.signal_hash, bound);
}

#[test]
fn verifier_sees_public_signals() {
    let h = Harness::new(NullVerifier::accept_all());
    let mut req = request(1, 40);
    req.root = FieldHash::new([0x07; 32]);
    h.ledger.spend(&req, h.clock.now()).unwrap();

    let seen = h.verifier.requests();
    assert_eq!(seen.len(), 1);
    let sent = &seen[0];
    assert_eq!(sent.root, req.root);
    assert_eq!(sent.group_id, 1);
    assert_eq!(sent.nullifier, alice());
    assert_eq!(sent.signal_hash, req.signal().hash().unwrap());
    assert_eq!(
        sent.external_context,
        energy_crypto::external_context(APP_ID, "spend-energy")
    );
    assert!(sent.signal_hash.fits_field());
    assert!(sent.external_context.fits_field());
}

#[test]
fn rejected_proof_writes_nothing() {
    let h = Harness::new(NullVerifier::reject_all());
    let err = h.spend(1, 10).unwrap_err();
    assert!(matches!(err, LedgerError::ProofRejected(_)));
    assert_eq!(h.store.write_count(), 0);
    assert_eq!(h.nonce(), 0);
    assert_eq!(h.balance(), 200);
}

#[test]
fn verifier_outage_leaves_nonce_usable() {
    let h = Harness::new(NullVerifier::new(vec![Verdict::Unavailable], Verdict::Accept));
    let err = h.spend(1, 10).unwrap_err();
    assert!(matches!(err, LedgerError::VerifierUnavailable(_)));
    assert_eq!(h.store.write_count(), 0);

    assert_eq!(h.spend(1, 10).unwrap().remaining, 190);
}

#[test]
fn storage_failure_surfaces_and_commits_nothing() {
    let h = Harness::new(NullVerifier::accept_all());
    h.store.fail_writes(true);
    let err = h.spend(1, 10).unwrap_err();
    assert!(matches!(err, LedgerError::Store(_)));

    h.store.fail_writes(false);
    assert_eq!(h.nonce(), 0);
    assert_eq!(h.spend(1, 10).unwrap().remaining, 190);
}

#[test]
fn clock_regression_burns_nonce_without_touching_balance() {
    let h = Harness::new(NullVerifier::accept_all());
    let t0 = h.clock.now();
    h.spend(1, 50).unwrap();

    let earlier = Timestamp::new(t0.as_secs() - 10);
    let err = h.ledger.spend(&request(2, 10), earlier).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Accrual(AccrualError::TimestampRegression { .. })
    ));
    let record = h.ledger.record(&alice()).unwrap();
    assert_eq!(record.nonce, 2);
    assert_eq!(record.accrual.amount, 150);
    assert_eq!(record.accrual.last_claim, t0);
}

#[test]
fn identities_are_independent() {
    let h = Harness::new(NullVerifier::accept_all());
    h.spend(1, 120).unwrap();

    let bob = Nullifier::new([0xB0; 32]);
    let mut req = request(1, 30);
    req.nullifier = bob;
    assert_eq!(h.ledger.spend(&req, h.clock.now()).unwrap().remaining, 170);

    assert_eq!(h.balance(), 80);
    assert_eq!(h.ledger.query_nonce(&bob).unwrap(), 1);
    assert_eq!(h.ledger.summary().unwrap().identities, 2);
}

#[test]
fn realize_emits_balance_event() {
    let mut h = Harness::new(NullVerifier::accept_all());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    h.ledger
        .subscribe(Box::new(move |e| sink.lock().unwrap().push(e.clone())));

    h.spend(1, 200).unwrap();
    h.clock.advance(2 * WEEK);
    assert_eq!(h.ledger.realize_balance(&alice(), h.clock.now()).unwrap(), 200);

    let events = seen.lock().unwrap();
    assert_eq!(
        events.last(),
        Some(&LedgerEvent::BalanceRealized {
            nullifier: alice(),
            amount: 200,
            year: Year::new(2030),
            periods_elapsed: 2,
        })
    );
}

#[test]
fn metrics_track_outcomes() {
    let h = Harness::new(NullVerifier::new(vec![Verdict::Reject], Verdict::Accept));
    let metrics = h.ledger.metrics();

    h.spend(1, 10).unwrap_err();
    h.spend(3, 10).unwrap_err();
    h.spend(1, 60).unwrap();
    h.spend(2, 1_000).unwrap_err();

    assert_eq!(metrics.rejected_proof.get(), 1);
    assert_eq!(metrics.rejected_invalid_nonce.get(), 1);
    assert_eq!(metrics.rejected_insufficient.get(), 1);
    assert_eq!(metrics.spends_accepted.get(), 1);
    assert_eq!(metrics.energy_spent.get(), 60);
}

/// Parks every verification until the test releases it.
struct GateVerifier {
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl IdentityVerifier for GateVerifier {
    fn name(&self) -> &str {
        "gate-verifier"
    }

    fn verify(&self, _request: &ProofRequest) -> Result<(), VerifierError> {
        self.entered.lock().unwrap().send(()).unwrap();
        self.release
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(10))
            .map_err(|_| VerifierError::Unavailable("gate never released".into()))
    }
}

fn gated_ledger() -> (Arc<EnergyLedger>, mpsc::Receiver<()>, mpsc::Sender<()>) {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let verifier = GateVerifier {
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
    };
    let ledger = EnergyLedger::new(
        Arc::new(NullStore::new()),
        Arc::new(verifier),
        ActionContext::spend(APP_ID),
        EnergyParams::default(),
    )
    .unwrap();
    (Arc::new(ledger), entered_rx, release_tx)
}

#[test]
fn queries_proceed_while_a_spend_awaits_verification() {
    let (ledger, entered, release) = gated_ledger();
    let now = NullClock::in_year(2030, 1_000).now();

    let spender = {
        let ledger = Arc::clone(&ledger);
        thread::spawn(move || ledger.spend(&request(1, 50), now))
    };
    entered.recv_timeout(Duration::from_secs(5)).unwrap();

    let (done_tx, done_rx) = mpsc::channel();
    {
        let ledger = Arc::clone(&ledger);
        thread::spawn(move || {
            let bob = Nullifier::new([0xB0; 32]);
            let result = (
                ledger.query_balance(&alice(), now).unwrap(),
                ledger.query_nonce(&alice()).unwrap(),
                ledger.realize_balance(&bob, now).unwrap(),
            );
            done_tx.send(result).unwrap();
        });
    }
    let observed = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("queries blocked behind an in-flight verification");
    assert_eq!(observed, (200, 0, 200));

    release.send(()).unwrap();
    assert_eq!(spender.join().unwrap().unwrap().remaining, 150);
    assert_eq!(ledger.query_nonce(&alice()).unwrap(), 1);
}

#[test]
fn spends_of_one_identity_are_serialized() {
    let (ledger, entered, release) = gated_ledger();
    let now = NullClock::in_year(2030, 1_000).now();

    let first = {
        let ledger = Arc::clone(&ledger);
        thread::spawn(move || ledger.spend(&request(1, 50), now))
    };
    entered.recv_timeout(Duration::from_secs(5)).unwrap();

    // Nonce 2 is only valid once nonce 1 has committed, so this spend must
    // wait for the first rather than read the pre-spend record.
    let second = {
        let ledger = Arc::clone(&ledger);
        thread::spawn(move || ledger.spend(&request(2, 30), now))
    };
    assert!(entered.recv_timeout(Duration::from_millis(200)).is_err());

    release.send(()).unwrap();
    assert_eq!(first.join().unwrap().unwrap().remaining, 150);

    entered.recv_timeout(Duration::from_secs(5)).unwrap();
    release.send(()).unwrap();
    assert_eq!(second.join().unwrap().unwrap().remaining, 120);
    assert_eq!(ledger.query_nonce(&alice()).unwrap(), 2);
}
