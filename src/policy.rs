// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Protocol parameters of the storage miner economics.

use crate::sector::ChainEpoch;

pub const EPOCH_DURATION_SECONDS: i64 = 30;
pub const SECONDS_IN_HOUR: i64 = 3600;
pub const SECONDS_IN_DAY: i64 = 86400;
pub const EPOCHS_IN_HOUR: i64 = SECONDS_IN_HOUR / EPOCH_DURATION_SECONDS;
pub const EPOCHS_IN_DAY: i64 = SECONDS_IN_DAY / EPOCH_DURATION_SECONDS;

/// Precision used for making QA power calculations
pub const SECTOR_QUALITY_PRECISION: i64 = 20;

/// Quality multiplier for committed capacity (no deals) in a sector
pub const QUALITY_BASE_MULTIPLIER: i64 = 10;

/// Quality multiplier for unverified deals in a sector
pub const DEAL_WEIGHT_MULTIPLIER: i64 = 10;

/// Quality multiplier for verified deals in a sector
pub const VERIFIED_DEAL_WEIGHT_MULTIPLIER: i64 = 100;

/// Maximum number of lifetime days penalized when a sector is terminated.
pub const TERMINATION_LIFETIME_CAP: ChainEpoch = 140;

/// Fraction of a sector's expected rewards over its penalized lifetime that
/// is forfeited on termination.
pub const TERMINATION_REWARD_FACTOR: BigFrac = BigFrac {
    numerator: 1,
    denominator: 2,
};

/// Projection period of expected sector block reward used as the floor of
/// the termination penalty. SP = BR(t, 3.5 days)
pub const TERMINATION_PENALTY_LOWER_BOUND_PROJECTION_PERIOD: ChainEpoch =
    (EPOCHS_IN_DAY * 35) / 10;

/// A ratio applied with integer arithmetic: multiply by the numerator, then
/// divide by the denominator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BigFrac {
    pub numerator: i64,
    pub denominator: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_epoch_counts() {
        assert_eq!(EPOCHS_IN_HOUR, 120);
        assert_eq!(EPOCHS_IN_DAY, 2880);
        assert_eq!(TERMINATION_PENALTY_LOWER_BOUND_PROJECTION_PERIOD, 10080);
        assert_eq!(TERMINATION_LIFETIME_CAP * EPOCHS_IN_DAY, 403_200);
    }
}
