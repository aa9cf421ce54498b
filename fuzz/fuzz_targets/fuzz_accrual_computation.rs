#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use energy_accrual::{AccrualEngine, AccrualError, AccrualState};
use energy_types::{EnergyParams, Timestamp};

#[derive(Arbitrary, Debug)]
enum Op {
    Wait(u32),
    Advance,
    Debit(u64),
}

#[derive(Arbitrary, Debug)]
struct Input {
    rate: u64,
    period: u64,
    bootstrap: u64,
    start: u64,
    ops: Vec<Op>,
}

// Drive the engine through arbitrary waits, realizations and debits.
// Nothing may panic, and within one year the balance never drops except by
// a successful debit.
fuzz_target!(|input: Input| {
    let params = EnergyParams {
        rate_per_period: input.rate,
        period_secs: input.period,
        bootstrap_periods: input.bootstrap,
    };
    let engine = match AccrualEngine::new(params) {
        Ok(engine) => engine,
        Err(AccrualError::ZeroPeriod) => return,
        Err(e) => panic!("unexpected constructor error: {e}"),
    };

    let mut state = AccrualState::default();
    let mut now = input.start;
    for op in input.ops {
        match op {
            Op::Wait(secs) => now = now.saturating_add(secs as u64),
            Op::Advance if now == 0 => {
                let err = engine.advance(&mut state, Timestamp::new(now)).unwrap_err();
                assert_eq!(err, AccrualError::UnsetTimestamp);
            }
            Op::Advance => {
                let before = engine.compute_current(&state, Timestamp::new(now));
                let after = engine.advance(&mut state, Timestamp::new(now));
                assert_eq!(before.is_ok(), after.is_ok());
                if let (Ok(b), Ok(a)) = (before, after) {
                    assert_eq!(a, b);
                    assert_eq!(state.amount, a.amount);
                }
            }
            Op::Debit(amount) => {
                let before = state.amount;
                match engine.debit(&mut state, amount as u128) {
                    Ok(()) => assert_eq!(state.amount, before - amount as u128),
                    Err(_) => assert_eq!(state.amount, before),
                }
            }
        }
        if let (Ok(a), Ok(b)) = (
            engine.compute_current(&state, Timestamp::new(now)),
            engine.compute_current(&state, Timestamp::new(now.saturating_add(1))),
        ) {
            if a.year == b.year {
                assert!(b.amount >= a.amount);
            }
        }
    }
});
