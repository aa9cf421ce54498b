//! Core accrual computation engine.

use crate::error::AccrualError;
use crate::state::{AccrualState, Accrued};
use energy_types::{EnergyParams, Timestamp};

/// Evaluates and updates accrual checkpoints.
///
/// Stateless apart from its parameters; every method operates on a caller
/// supplied [`AccrualState`], so the same engine serves every identity.
#[derive(Clone, Debug)]
pub struct AccrualEngine {
    params: EnergyParams,
}

impl AccrualEngine {
    pub fn new(params: EnergyParams) -> Result<Self, AccrualError> {
        if params.period_secs == 0 {
            return Err(AccrualError::ZeroPeriod);
        }
        Ok(Self { params })
    }

    pub fn params(&self) -> &EnergyParams {
        &self.params
    }

    /// Evaluate `state` at `now` without mutating it.
    ///
    /// Three branches, in order:
    /// 1. never initialized → bootstrap grant in the current year
    /// 2. stored year behind the current year → zero in the current year;
    ///    no accrual is credited on the reset transition itself
    /// 3. otherwise → stored amount plus whole elapsed periods
    ///
    /// Within a year the result never decreases as `now` grows, and partial
    /// periods never contribute.
    pub fn compute_current(
        &self,
        state: &AccrualState,
        now: Timestamp,
    ) -> Result<Accrued, AccrualError> {
        let current_year = now.calendar_year();

        if !state.is_initialized() {
            return Ok(Accrued {
                amount: self.params.bootstrap_grant(),
                year: current_year,
                periods_elapsed: 0,
            });
        }

        if state.year < current_year {
            return Ok(Accrued {
                amount: 0,
                year: current_year,
                periods_elapsed: 0,
            });
        }

        let elapsed = state.last_claim.checked_elapsed_until(now).ok_or(
            AccrualError::TimestampRegression {
                now: now.as_secs(),
                last_claim: state.last_claim.as_secs(),
            },
        )?;
        let periods_elapsed = elapsed / self.params.period_secs;
        let amount = state
            .amount
            .checked_add(self.params.accrual_for(periods_elapsed))
            .ok_or(AccrualError::Overflow)?;

        Ok(Accrued {
            amount,
            year: state.year,
            periods_elapsed,
        })
    }

    /// Current balance of `state` at `now`.
    pub fn balance(&self, state: &AccrualState, now: Timestamp) -> Result<u128, AccrualError> {
        self.compute_current(state, now).map(|a| a.amount)
    }

    /// Realize accrual into `state`.
    ///
    /// Amount and year are always written. `last_claim` moves to `now` only
    /// when whole periods were credited or on first contact; otherwise the
    /// old checkpoint is kept so sub-period calls never discard elapsed time.
    ///
    /// Fails with [`AccrualError::UnsetTimestamp`] at `now == 0`, which could
    /// not be told apart from an identity that was never seen.
    pub fn advance(&self, state: &mut AccrualState, now: Timestamp) -> Result<Accrued, AccrualError> {
        if now.is_unset() {
            return Err(AccrualError::UnsetTimestamp);
        }
        let first_contact = !state.is_initialized();
        let accrued = self.compute_current(state, now)?;

        state.amount = accrued.amount;
        state.year = accrued.year;
        if accrued.periods_elapsed > 0 || first_contact {
            state.last_claim = now;
        }
        Ok(accrued)
    }

    /// Remove `amount` from an already-realized state.
    pub fn debit(&self, state: &mut AccrualState, amount: u128) -> Result<(), AccrualError> {
        if state.amount < amount {
            return Err(AccrualError::InsufficientEnergy {
                needed: amount,
                available: state.amount,
            });
        }
        state.amount -= amount;
        Ok(())
    }
}

impl Default for AccrualEngine {
    fn default() -> Self {
        Self {
            params: EnergyParams::default(),
        }
    }
}
