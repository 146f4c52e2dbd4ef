// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::econ::TokenAmount;
use crate::error::Result;
use crate::math::{self, PRECISION};
use crate::policy::{
    EPOCHS_IN_DAY, TERMINATION_LIFETIME_CAP, TERMINATION_PENALTY_LOWER_BOUND_PROJECTION_PERIOD,
    TERMINATION_REWARD_FACTOR,
};
use crate::sector::{ChainEpoch, StoragePower};
use crate::smooth::{self, FilterEstimate};
use num_bigint::BigInt;
use num_traits::Zero as _;
use std::cmp;

/// The projected block reward a sector would earn over some period.
/// Also known as "BR(t)".
/// BR(t) = ProjectedRewardFraction(t) * SectorQualityAdjustedPower
/// ProjectedRewardFraction(t) is the sum of estimated reward over estimated total power
/// over all epochs in the projection period [t t+projectionDuration]
pub fn expected_reward_for_power(
    reward_estimate: &FilterEstimate,
    network_qa_power_estimate: &FilterEstimate,
    qa_sector_power: &StoragePower,
    projection_duration: ChainEpoch,
) -> Result<TokenAmount> {
    let network_qa_power_smoothed = network_qa_power_estimate.estimate();

    if network_qa_power_smoothed.is_zero() {
        return Ok(TokenAmount::from_atto(reward_estimate.estimate()));
    }

    let expected_reward_for_proving_period = smooth::extrapolated_cum_sum_of_ratio(
        projection_duration,
        0,
        reward_estimate,
        network_qa_power_estimate,
    )?;
    let br128 = qa_sector_power * expected_reward_for_proving_period; // Q.0 * Q.128 => Q.128
    let br = br128 >> PRECISION;

    // truncation in the extrapolation can leave a small negative value
    Ok(TokenAmount::from_atto(cmp::max(br, BigInt::zero())))
}

/// The floor of the termination penalty, SP(t) = BR(t, 3.5 days).
pub fn pledge_penalty_for_termination_lower_bound(
    reward_estimate: &FilterEstimate,
    network_qa_power_estimate: &FilterEstimate,
    qa_sector_power: &StoragePower,
) -> Result<TokenAmount> {
    expected_reward_for_power(
        reward_estimate,
        network_qa_power_estimate,
        qa_sector_power,
        TERMINATION_PENALTY_LOWER_BOUND_PROJECTION_PERIOD,
    )
}

/// Penalty to locked pledge collateral for the termination of a sector before scheduled expiry.
/// SectorAge is the time between the sector's activation and termination.
#[allow(clippy::too_many_arguments)]
pub fn pledge_penalty_for_termination(
    day_reward: &TokenAmount,
    sector_age: ChainEpoch,
    twenty_day_reward_at_activation: &TokenAmount,
    network_qa_power_estimate: &FilterEstimate,
    qa_sector_power: &StoragePower,
    reward_estimate: &FilterEstimate,
    replaced_day_reward: &TokenAmount,
    replaced_sector_age: ChainEpoch,
) -> Result<TokenAmount> {
    // max(SP(t), BR(StartEpoch, 20d) + BR(StartEpoch, 1d) * terminationRewardFactor * min(SectorAgeInDays, 140))
    // and sectorAgeInDays = sectorAge / EpochsInDay
    let lifetime_cap = TERMINATION_LIFETIME_CAP * EPOCHS_IN_DAY;
    let capped_sector_age = cmp::min(sector_age, lifetime_cap);

    // expected reward for lifetime of new sector (epochs*AttoFIL/day)
    let mut expected_reward = day_reward.atto() * capped_sector_age;

    // if lifetime under cap and this sector replaced capacity, add expected reward for old sector's lifetime up to cap
    let relevant_replaced_age = cmp::min(replaced_sector_age, lifetime_cap - capped_sector_age);
    expected_reward += replaced_day_reward.atto() * relevant_replaced_age;

    let penalized_reward = expected_reward * TERMINATION_REWARD_FACTOR.numerator;

    // (epochs*AttoFIL/day -> AttoFIL)
    let penalized_reward_per_day = math::div_euclid(
        &penalized_reward,
        &(BigInt::from(EPOCHS_IN_DAY) * TERMINATION_REWARD_FACTOR.denominator),
    );

    Ok(cmp::max(
        pledge_penalty_for_termination_lower_bound(
            reward_estimate,
            network_qa_power_estimate,
            qa_sector_power,
        )?,
        TokenAmount::from_atto(twenty_day_reward_at_activation.atto() + penalized_reward_per_day),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn testing_estimate(x: impl Into<BigInt>, v: impl Into<BigInt>) -> FilterEstimate {
        FilterEstimate::new(x.into() << PRECISION, v.into() << PRECISION)
    }

    fn network_power_estimate() -> FilterEstimate {
        testing_estimate(StoragePower::from(100_u64 << 50), 0)
    }

    #[test]
    fn lower_bound_is_close_to_additive() {
        let epoch_reward = TokenAmount::from_whole(100);
        // not too much growth over ~3000 epoch projection in BR
        let reward_estimate = testing_estimate(epoch_reward.atto().clone(), 0);
        let power_estimate = network_power_estimate();

        let faulty_sector_a_power = StoragePower::from(1_u64 << 50);
        let faulty_sector_b_power = StoragePower::from(19_u64 << 50);
        let faulty_sector_c_power = StoragePower::from(63_u64 << 50);
        let total_fault_power: StoragePower =
            &faulty_sector_a_power + &faulty_sector_b_power + &faulty_sector_c_power;

        let sp = |power: &StoragePower| {
            pledge_penalty_for_termination_lower_bound(&reward_estimate, &power_estimate, power)
                .unwrap()
        };
        let sp_a = sp(&faulty_sector_a_power);
        let sp_b = sp(&faulty_sector_b_power);
        let sp_c = sp(&faulty_sector_c_power);
        let sp_all = sp(&total_fault_power);

        // Because we can introduce rounding error between 1 and zero for every penalty calculation
        // we can at best expect n calculations of 1 power to be within n of 1 calculation of n powers.
        let diff = sp_all.atto() - (sp_c.atto() + sp_a.atto() + sp_b.atto());
        assert!(diff >= BigInt::zero());
        assert!(diff < BigInt::from(3));
    }

    #[test]
    fn expected_reward_of_constant_network() {
        // 1 FIL per epoch shared by 2^60 bytes, one 2^50 share over one day
        let reward_estimate = testing_estimate(TokenAmount::from_whole(1).atto().clone(), 0);
        let power_estimate = testing_estimate(1_u64 << 60, 0);
        let br = expected_reward_for_power(
            &reward_estimate,
            &power_estimate,
            &StoragePower::from(1_u64 << 50),
            EPOCHS_IN_DAY,
        )
        .unwrap();
        // 2880 * 1e18 / 1024
        assert_eq!(br, TokenAmount::from_atto(2_812_500_000_000_000_000u64));
    }

    #[test]
    fn zero_network_power_falls_back_to_reward_estimate() {
        let reward_estimate = testing_estimate(12345, 7);
        let power_estimate = testing_estimate(0, 5);
        let br = expected_reward_for_power(
            &reward_estimate,
            &power_estimate,
            &StoragePower::from(1_u64 << 40),
            EPOCHS_IN_DAY,
        )
        .unwrap();
        assert_eq!(br, TokenAmount::from_atto(12345));
    }

    #[test]
    fn zero_reward_yields_zero() {
        let reward_estimate = testing_estimate(0, 0);
        let br = expected_reward_for_power(
            &reward_estimate,
            &network_power_estimate(),
            &StoragePower::from(1_u64 << 40),
            TERMINATION_PENALTY_LOWER_BOUND_PROJECTION_PERIOD,
        )
        .unwrap();
        assert!(br.is_zero());
    }

    #[test]
    fn shrinking_reward_is_clamped_at_zero() {
        // reward falls to zero well within the projection window
        let reward_estimate = testing_estimate(100, -1);
        let br = expected_reward_for_power(
            &reward_estimate,
            &testing_estimate(1, 0),
            &StoragePower::from(1_u64 << 40),
            TERMINATION_PENALTY_LOWER_BOUND_PROJECTION_PERIOD,
        )
        .unwrap();
        assert!(br.is_zero());
    }

    #[test]
    fn fresh_sector_pays_its_storage_pledge() {
        let twenty_day_reward = TokenAmount::from_whole(3);
        let penalty = pledge_penalty_for_termination(
            &TokenAmount::from_whole(1),
            0,
            &twenty_day_reward,
            &network_power_estimate(),
            &StoragePower::from(1_u64 << 30),
            &testing_estimate(1, 0),
            &TokenAmount::zero(),
            0,
        )
        .unwrap();
        assert_eq!(penalty, twenty_day_reward);
    }

    #[test]
    fn lower_bound_wins_over_small_pledge() {
        let reward_estimate = testing_estimate(TokenAmount::from_whole(20).atto().clone(), 0);
        let power_estimate = testing_estimate(1_u64 << 50, 0);
        let power = StoragePower::from(1_u64 << 40);
        let lower_bound =
            pledge_penalty_for_termination_lower_bound(&reward_estimate, &power_estimate, &power)
                .unwrap();
        let penalty = pledge_penalty_for_termination(
            &TokenAmount::from_atto(1),
            10,
            &TokenAmount::from_atto(1),
            &power_estimate,
            &power,
            &reward_estimate,
            &TokenAmount::zero(),
            0,
        )
        .unwrap();
        // 10080 epochs * 20 FIL / 1024
        assert_eq!(lower_bound, TokenAmount::from_atto(196_875_000_000_000_000_000u128));
        assert_eq!(penalty, lower_bound);
    }

    #[test]
    fn sub_unit_network_power_falls_back_to_reward_estimate() {
        // a position below one whole unit smooths to zero
        let power_estimate = FilterEstimate::new(BigInt::from(1) << 100u32, BigInt::from(1) << 140u32);
        // the fallback is the smoothed reward, not the raw Q.128 position
        let reward_estimate = FilterEstimate::new(
            (BigInt::from(777) << PRECISION) + (BigInt::from(1) << 127u32),
            BigInt::zero(),
        );
        let br = expected_reward_for_power(
            &reward_estimate,
            &power_estimate,
            &StoragePower::from(1_u64 << 40),
            TERMINATION_PENALTY_LOWER_BOUND_PROJECTION_PERIOD,
        )
        .unwrap();
        assert_eq!(br, TokenAmount::from_atto(777));
    }

    #[test]
    fn expected_reward_with_moving_network_power() {
        let reward_estimate = testing_estimate(15_000_000_000_000_000_000u128, -3_000_000_000_000i64);
        let power_estimate = testing_estimate(25_000_000_000_000_000_000u128, 40_000_000_000_000i64);
        let power = StoragePower::from(1_u64 << 35);

        let br = |duration| {
            expected_reward_for_power(&reward_estimate, &power_estimate, &power, duration).unwrap()
        };
        assert_eq!(
            br(TERMINATION_PENALTY_LOWER_BOUND_PROJECTION_PERIOD),
            TokenAmount::from_atto(205_942_494_160_483u64)
        );
        assert_eq!(
            br(20 * EPOCHS_IN_DAY),
            TokenAmount::from_atto(1_129_452_618_898_525u64)
        );
        assert_eq!(
            pledge_penalty_for_termination_lower_bound(&reward_estimate, &power_estimate, &power)
                .unwrap(),
            TokenAmount::from_atto(205_942_494_160_483u64)
        );
    }

    #[test]
    fn penalty_for_aged_sector() {
        let day_reward = TokenAmount::from_atto(1_000_000);
        let twenty_day_reward = TokenAmount::from_atto(20_000_000);
        let penalty = |age: ChainEpoch, replaced_day_reward: i64, replaced_age: ChainEpoch| {
            pledge_penalty_for_termination(
                &day_reward,
                age,
                &twenty_day_reward,
                &network_power_estimate(),
                &StoragePower::zero(),
                &testing_estimate(0, 0),
                &TokenAmount::from_atto(replaced_day_reward),
                replaced_age,
            )
            .unwrap()
        };
        // 20e6 + 1e6 * 10 days * 1/2
        assert_eq!(penalty(10 * EPOCHS_IN_DAY, 0, 0), TokenAmount::from_atto(25_000_000));
        // one epoch short of a day of ageing: 1e6 * 2879 / 5760 = 499826
        assert_eq!(penalty(EPOCHS_IN_DAY - 1, 0, 0), TokenAmount::from_atto(20_499_826));
        // capped at 140 days
        assert_eq!(penalty(200 * EPOCHS_IN_DAY, 0, 0), TokenAmount::from_atto(90_000_000));
        // replaced capacity only fills the remaining headroom under the cap
        assert_eq!(
            penalty(100 * EPOCHS_IN_DAY, 4_000_000, 100 * EPOCHS_IN_DAY),
            TokenAmount::from_atto(20_000_000 + 50_000_000 + 80_000_000)
        );
        assert_eq!(
            penalty(140 * EPOCHS_IN_DAY, 4_000_000, 100 * EPOCHS_IN_DAY),
            TokenAmount::from_atto(90_000_000)
        );
    }

    #[quickcheck]
    fn penalty_grows_with_age_until_the_cap(day_reward: u64, age_a: u32, age_b: u32) -> TestResult {
        let (young, old) = (
            ChainEpoch::from(age_a.min(age_b)),
            ChainEpoch::from(age_a.max(age_b)),
        );
        let day_reward = TokenAmount::from_atto(day_reward);
        let pledge = TokenAmount::from_atto(20u64);
        let power = StoragePower::from(1_u64 << 35);
        let reward_estimate = testing_estimate(TokenAmount::from_whole(20).atto().clone(), 0);
        let power_estimate = network_power_estimate();
        let penalty = |age| {
            pledge_penalty_for_termination(
                &day_reward,
                age,
                &pledge,
                &power_estimate,
                &power,
                &reward_estimate,
                &TokenAmount::zero(),
                0,
            )
            .unwrap()
        };
        let cap = TERMINATION_LIFETIME_CAP * EPOCHS_IN_DAY;
        if young >= cap {
            return TestResult::from_bool(penalty(young) == penalty(old));
        }
        TestResult::from_bool(penalty(young) <= penalty(old))
    }
}
