//! Accrual parameters.

use serde::{Deserialize, Serialize};

/// The constants that drive Energy accrual.
///
/// Defaults are the compatible values every deployment must share:
/// 100 units per 168-hour period and a bootstrap grant of two periods.
/// Both factors are `u64`, so their products always fit a `u128` balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyParams {
    /// Energy credited per whole elapsed period.
    #[serde(default = "default_rate_per_period")]
    pub rate_per_period: u64,

    /// Length of one accrual period in seconds.
    #[serde(default = "default_period_secs")]
    pub period_secs: u64,

    /// Number of periods' worth of Energy granted on first contact.
    #[serde(default = "default_bootstrap_periods")]
    pub bootstrap_periods: u64,
}

fn default_rate_per_period() -> u64 {
    EnergyParams::DEFAULT_RATE_PER_PERIOD
}

fn default_period_secs() -> u64 {
    EnergyParams::DEFAULT_PERIOD_SECS
}

fn default_bootstrap_periods() -> u64 {
    EnergyParams::DEFAULT_BOOTSTRAP_PERIODS
}

impl EnergyParams {
    pub const DEFAULT_RATE_PER_PERIOD: u64 = 100;
    pub const DEFAULT_PERIOD_SECS: u64 = 168 * 3600; // 1 week
    pub const DEFAULT_BOOTSTRAP_PERIODS: u64 = 2;

    /// The one-time grant for an identity seen for the first time.
    pub fn bootstrap_grant(&self) -> u128 {
        self.bootstrap_periods as u128 * self.rate_per_period as u128
    }

    /// Energy credited for `periods` whole periods.
    pub fn accrual_for(&self, periods: u64) -> u128 {
        periods as u128 * self.rate_per_period as u128
    }
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            rate_per_period: default_rate_per_period(),
            period_secs: default_period_secs(),
            bootstrap_periods: default_bootstrap_periods(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_compatible_constants() {
        let p = EnergyParams::default();
        assert_eq!(p.rate_per_period, 100);
        assert_eq!(p.period_secs, 604_800);
        assert_eq!(p.bootstrap_grant(), 200);
    }
}
