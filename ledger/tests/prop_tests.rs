use std::sync::Arc;

use proptest::prelude::*;

use energy_ledger::{EnergyLedger, LedgerError, SpendRequest};
use energy_nullables::{NullClock, NullStore, NullVerifier};
use energy_types::{Address, EnergyParams, FieldHash, Nullifier};
use energy_verifier::{ActionContext, Proof};

const WEEK: u64 = 604_800;

fn ledger() -> EnergyLedger {
    EnergyLedger::new(
        Arc::new(NullStore::new()),
        Arc::new(NullVerifier::accept_all()),
        ActionContext::spend("app_prop"),
        EnergyParams::default(),
    )
    .unwrap()
}

fn request(nonce: u64, amount: u128) -> SpendRequest {
    SpendRequest {
        root: FieldHash::ZERO,
        nullifier: Nullifier::new([9; 32]),
        proof: Proof::default(),
        spender_tag: Address::new([1; 20]),
        recipient: Address::new([2; 20]),
        amount,
        nonce,
    }
}

proptest! {
    /// Every verified attempt consumes exactly one nonce, and the stored
    /// checkpoint matches a straightforward model of accrual and debit.
    /// Waits stay well inside one calendar year.
    #[test]
    fn verified_attempts_consume_nonces_and_track_model(
        steps in prop::collection::vec((0u128..400, 0u64..2 * WEEK), 1..15)
    ) {
        let ledger = ledger();
        let clock = NullClock::in_year(2050, 0);
        let nullifier = Nullifier::new([9; 32]);
        let mut model: Option<(u128, u64)> = None;

        for (i, (amount, wait)) in steps.iter().enumerate() {
            clock.advance(*wait);
            let now = clock.now().as_secs();
            let (mut available, last_claim) = match model {
                None => (200, now),
                Some((amount, last_claim)) => {
                    let periods = (now - last_claim) / WEEK;
                    let claim = if periods > 0 { now } else { last_claim };
                    (amount + periods as u128 * 100, claim)
                }
            };

            match ledger.spend(&request(i as u64 + 1, *amount), clock.now()) {
                Ok(receipt) => {
                    available -= *amount;
                    prop_assert_eq!(receipt.remaining, available);
                }
                Err(LedgerError::InsufficientEnergy { needed, available: have }) => {
                    prop_assert_eq!(needed, *amount);
                    prop_assert_eq!(have, available);
                }
                Err(e) => return Err(TestCaseError::fail(e.to_string())),
            }
            model = Some((available, last_claim));
        }

        prop_assert_eq!(ledger.query_nonce(&nullifier).unwrap(), steps.len() as u64);

        let record = ledger.record(&nullifier).unwrap();
        let (amount, last_claim) = model.unwrap();
        prop_assert_eq!(record.accrual.amount, amount);
        prop_assert_eq!(record.accrual.last_claim.as_secs(), last_claim);
    }

    /// A nonce other than stored + 1 is always refused without a write.
    #[test]
    fn out_of_sequence_nonce_rejected(nonce in 2u64..u64::MAX) {
        let ledger = ledger();
        let clock = NullClock::in_year(2050, 0);
        let err = ledger.spend(&request(nonce, 1), clock.now()).unwrap_err();
        let is_invalid_nonce = matches!(err, LedgerError::InvalidNonce { expected: 1, .. });
        prop_assert!(is_invalid_nonce);
        prop_assert_eq!(ledger.summary().unwrap().identities, 0);
    }
}
