// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::FilterEstimate;
use crate::error::{Error, Result};
use crate::math::{self, PRECISION};
use crate::sector::ChainEpoch;
use num_bigint::BigInt;
use num_traits::{Signed as _, Zero as _};
use std::sync::LazyLock;

/// Numerator coefficients of the rational approximation of `ln(x)` on `[1, 2)`, Q.128.
static LN_NUM_COEF: LazyLock<Vec<BigInt>> = LazyLock::new(|| {
    math::poly_parse(&[
        "261417938209272870992496419296200268025",
        "7266615505142943436908456158054846846897",
        "32458783941900493142649393804518050491988",
        "17078670566130897220338060387082146864806",
        "-35150353308172866634071793531642638290419",
        "-20351202052858059355702509232125230498980",
        "-1563932590352680681114104005183375350999",
    ])
    .expect("ln numerator coefficients are valid integers")
});

/// Denominator coefficients of the rational approximation of `ln(x)` on `[1, 2)`, Q.128.
static LN_DENOM_COEF: LazyLock<Vec<BigInt>> = LazyLock::new(|| {
    math::poly_parse(&[
        "49928077726659937662124949977867279384",
        "2508163877009111928787629628566491583994",
        "21757751789594546643737445330202599887121",
        "53400635271583923415775576342898617051826",
        "41248834748603606604000911015235164348839",
        "9015227820322455780436733526367238305537",
        "340282366920938463463374607431768211456",
    ])
    .expect("ln denominator coefficients are valid integers")
});

/// `ln(2)` in Q.128
static LN_2: LazyLock<BigInt> = LazyLock::new(|| {
    "235865763225513294137944142764154484399"
        .parse()
        .expect("ln(2) is a valid integer")
});

/// Squared denominator velocities at or below this Q.128 threshold (`2^78`)
/// are treated as constant.
static EPSILON: LazyLock<BigInt> = LazyLock::new(|| BigInt::from(1) << 78);

/// The natural log of a positive Q.128 number, in Q.128.
pub fn ln(z: &BigInt) -> Result<BigInt> {
    if !z.is_positive() {
        return Err(Error::invalid_input(format!(
            "logarithm of non-positive value {z}"
        )));
    }
    // z = x * 2^k with x in [1, 2)
    let k = z.bits() as i64 - 1 - PRECISION as i64;
    let x = if k > 0 { z >> k } else { z << -k };

    Ok(BigInt::from(k) * &*LN_2 + ln_between_one_and_two(&x))
}

fn ln_between_one_and_two(x: &BigInt) -> BigInt {
    let num = math::poly_val(&LN_NUM_COEF, x) << PRECISION; // Q.256
    let denom = math::poly_val(&LN_DENOM_COEF, x); // Q.128
    math::div_euclid(&num, &denom) // Q.256 / Q.128 => Q.128
}

/// Extrapolates the cumulative sum of the ratio of two filter estimates over
/// the epochs `[relative_start, relative_start + delta)`.
///
/// When the denominator velocity is significant the integral of
/// `(p1 + v1 t) / (p2 + v2 t)` is taken in closed form, otherwise the
/// denominator is treated as constant and the numerator is sampled at the
/// midpoint of the window. The result is Q.128.
pub fn extrapolated_cum_sum_of_ratio(
    delta: ChainEpoch,
    relative_start: ChainEpoch,
    estimate_num: &FilterEstimate,
    estimate_denom: &FilterEstimate,
) -> Result<BigInt> {
    if delta < 0 {
        return Err(Error::invalid_input(format!(
            "negative projection duration {delta}"
        )));
    }
    let delta_t = BigInt::from(delta) << PRECISION; // Q.0 => Q.128
    let t0 = BigInt::from(relative_start) << PRECISION; // Q.0 => Q.128

    let position_1 = &estimate_num.position;
    let velocity_1 = &estimate_num.velocity;
    let position_2 = &estimate_denom.position;
    let velocity_2 = &estimate_denom.velocity;

    let squared_velocity_2 = (velocity_2 * velocity_2) >> PRECISION; // Q.256 => Q.128

    if squared_velocity_2 > *EPSILON {
        let x2a = ((velocity_2 * &t0) >> PRECISION) + position_2; // Q.128
        let x2b = ((velocity_2 * &delta_t) >> PRECISION) + &x2a; // Q.128
        let x2a = ln(&x2a)?;
        let x2b = ln(&x2b)?;

        let m1 = ((&x2b - &x2a) * position_1 * velocity_2) >> PRECISION; // Q.384 => Q.256

        let m2_l = (&x2a - &x2b) * position_2; // Q.256
        let m2_r = velocity_2 * &delta_t; // Q.256
        let m2 = ((m2_l + m2_r) * velocity_1) >> PRECISION; // Q.384 => Q.256

        return Ok(math::div_euclid(&(m2 + m1), &squared_velocity_2)); // Q.256 / Q.128 => Q.128
    }

    if position_2.is_zero() {
        return Err(Error::invalid_input(
            "ratio against a zero denominator estimate",
        ));
    }
    let half_delta_t = &delta_t >> 1u32; // Q.128
    let x1m = ((velocity_1 * (t0 + half_delta_t)) >> PRECISION) + position_1; // Q.128

    Ok(math::div_euclid(&(x1m * delta_t), position_2)) // Q.256 / Q.128 => Q.128
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::EPOCHS_IN_DAY;
    use crate::sector::StoragePower;
    use num::Integer as _;
    use num_traits::{Signed, Zero};

    const ERR_BOUND: u64 = 350;

    // Millionths of difference between val1 and val2
    // (val1 - val2) / val1 * 1e6
    // all inputs Q.128, output Q.0
    fn per_million_error(val_1: &BigInt, val_2: &BigInt) -> BigInt {
        let diff = (val_1 - val_2) << PRECISION;

        let ratio = diff.div_floor(val_1);
        let million = BigInt::from(1_000_000) << PRECISION;

        let diff_per_million = (ratio * million).abs();

        diff_per_million >> (2 * PRECISION)
    }

    // Trapezoid sum of the ratio, one epoch at a time.
    fn iterative_cum_sum_of_ratio(
        num: &FilterEstimate,
        denom: &FilterEstimate,
        t0: ChainEpoch,
        delta: ChainEpoch,
    ) -> BigInt {
        let mut ratio = BigInt::from(0u8);

        for i in 0..delta {
            let num_epsilon = num.extrapolate(t0 + i); // Q.256
            let denom_epsilon = denom.extrapolate(t0 + i) >> PRECISION; // Q.256 => Q.128
            let mut epsilon = num_epsilon.div_floor(&denom_epsilon); // Q.256 / Q.128 => Q.128

            if i != 0 && i != delta - 1 {
                epsilon *= 2; // Q.128 * Q.0 => Q.128
            }
            ratio += epsilon;
        }

        ratio.div_floor(&BigInt::from(2))
    }

    #[track_caller]
    fn assert_err_bound(
        num: &FilterEstimate,
        denom: &FilterEstimate,
        delta: ChainEpoch,
        t0: ChainEpoch,
        err_bound: BigInt,
    ) {
        let analytic = extrapolated_cum_sum_of_ratio(delta, t0, num, denom).unwrap();
        let iterative = iterative_cum_sum_of_ratio(num, denom, t0, delta);
        let actual_err = per_million_error(&analytic, &iterative);
        assert!(
            actual_err < err_bound,
            "Values are {actual_err} and {err_bound}"
        );
    }

    // Returns an estimate with position val and velocity 0
    fn testing_constant_estimate(val: BigInt) -> FilterEstimate {
        testing_estimate(val, BigInt::from(0u8))
    }

    // Returns an estimate with position x and velocity v
    fn testing_estimate(x: BigInt, v: BigInt) -> FilterEstimate {
        FilterEstimate::new(x << PRECISION, v << PRECISION)
    }

    #[test]
    fn natural_log() {
        let ln_inputs: Vec<BigInt> = math::poly_parse(&[
            "340282366920938463463374607431768211456", // Q.128 format of 1
            "924990000000000000000000000000000000000", // Q.128 format of e (rounded up in 5th decimal place to handle truncation)
            "34028236692093846346337460743176821145600000000000000000000", // Q.128 format of 100e18
            "6805647338418769269267492148635364229120000000000000000000000", // Q.128 format of 2e22
            "204169000000000000000000000000000000", // Q.128 format of 0.0006
            "34028236692093846346337460743",        // Q.128 format of 1e-10
        ])
        .unwrap();

        let expected_ln_outputs: Vec<BigInt> = math::poly_parse(&[
            "0",                                         // Q.128 format of 0 = ln(1)
            "340282366920938463463374607431768211456",   // Q.128 format of 1 = ln(e)
            "15670582109617661336106769654068947397831", // Q.128 format of 46.051... = ln(100e18)
            "17473506083804940763855390762239996622013", // Q.128 format of  51.35... = ln(2e22)
            "-2524410000000000000000000000000000000000", // Q.128 format of -7.41.. = ln(0.0006)
            "-7835291054808830668053384827034473698915", // Q.128 format of -23.02.. = ln(1e-10)
        ])
        .unwrap();

        assert_eq!(ln_inputs.len(), expected_ln_outputs.len());
        for (z, expected) in ln_inputs.iter().zip(&expected_ln_outputs) {
            let ln_of_z = ln(z).unwrap();
            assert_eq!(expected >> PRECISION, ln_of_z >> PRECISION);
        }
    }

    #[test]
    fn ln_of_one_is_exact_zero_in_whole_part() {
        let one = BigInt::from(1) << PRECISION;
        assert_eq!(ln(&one).unwrap() >> PRECISION, BigInt::zero());
        assert!(ln(&BigInt::zero()).is_err());
        assert!(ln(&BigInt::from(-1)).is_err());
    }

    #[test]
    fn constant_estimate() {
        let num_estimate = testing_constant_estimate(BigInt::from(4_000_000));
        let denom_estimate = testing_constant_estimate(BigInt::from(1));

        // 4e6/1 over 1000 epochs should give us 4e9
        let csr_1 =
            extrapolated_cum_sum_of_ratio(1000, 0, &num_estimate, &denom_estimate).unwrap()
                >> PRECISION;
        assert_eq!(BigInt::from(4 * 10_i64.pow(9)), csr_1);

        // if we change t0 nothing should change because velocity is 0
        let csr_2 = extrapolated_cum_sum_of_ratio(1000, 10_i64.pow(15), &num_estimate, &denom_estimate)
            .unwrap()
            >> PRECISION;

        assert_eq!(csr_1, csr_2);

        // 1e12 / 200e12 for 100 epochs should give ratio of 1/2
        let num_estimate = testing_constant_estimate(BigInt::from(10_i64.pow(12)));
        let denom_estimate = testing_constant_estimate(BigInt::from(200 * 10_i64.pow(12)));
        let csr_frac =
            extrapolated_cum_sum_of_ratio(100, 0, &num_estimate, &denom_estimate).unwrap();

        // If we didn't return Q.128 we'd just get zero
        assert_eq!(BigInt::from(0u8), &csr_frac >> PRECISION);

        // multiply by 10k and we'll get 5k
        // note: this is a bit sensitive to input, lots of numbers approach from below
        // (...99999) and so truncating division takes us off by one
        let product = csr_frac * (BigInt::from(10_000) << PRECISION); // Q.256
        assert_eq!(BigInt::from(5000), product >> (2 * PRECISION));
    }

    #[test]
    fn ln_reference_values() {
        let one = BigInt::from(1) << PRECISION;
        assert_eq!(ln(&one).unwrap(), BigInt::from(878));
        assert_eq!(
            ln(&(BigInt::from(10) << PRECISION)).unwrap(),
            "783529105480883069992391364683341031823"
                .parse::<BigInt>()
                .unwrap()
        );
        assert_eq!(
            ln(&(one / 3u32)).unwrap(),
            "-373838389916413661835611617730802210185"
                .parse::<BigInt>()
                .unwrap()
        );
    }

    #[test]
    fn moving_denominator_reference_values() {
        // squared denominator velocity far above 2^78, so the closed form is used
        let num_estimate = testing_estimate(
            BigInt::from(15_000_000_000_000_000_000u128),
            BigInt::from(-3_000_000_000_000i64),
        );
        let denom_estimate = testing_estimate(
            BigInt::from(25_000_000_000_000_000_000u128),
            BigInt::from(40_000_000_000_000i64),
        );
        assert_eq!(
            extrapolated_cum_sum_of_ratio(10_080, 0, &num_estimate, &denom_estimate).unwrap(),
            "2039555674492466028373567063011324159873639"
                .parse::<BigInt>()
                .unwrap()
        );
        assert_eq!(
            extrapolated_cum_sum_of_ratio(EPOCHS_IN_DAY, 5000, &num_estimate, &denom_estimate)
                .unwrap(),
            "581262394879411887680695633044153916997379"
                .parse::<BigInt>()
                .unwrap()
        );
    }

    #[test]
    fn zero_denominator_is_rejected() {
        let num_estimate = testing_constant_estimate(BigInt::from(1));
        let denom_estimate = FilterEstimate::default();
        assert!(matches!(
            extrapolated_cum_sum_of_ratio(10, 0, &num_estimate, &denom_estimate),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn negative_duration_is_rejected() {
        let estimate = testing_constant_estimate(BigInt::from(1));
        assert!(extrapolated_cum_sum_of_ratio(-1, 0, &estimate, &estimate).is_err());
    }

    #[test]
    fn both_positive_velocity() {
        let num_estimate = testing_estimate(BigInt::from(111), BigInt::from(12));
        let denom_estimate = testing_estimate(BigInt::from(3456), BigInt::from(8));
        assert_err_bound(
            &num_estimate,
            &denom_estimate,
            10_000,
            0,
            BigInt::from(ERR_BOUND),
        );
    }

    #[test]
    fn flipped_signs() {
        let num_estimate = testing_estimate(BigInt::from(1_000_000), BigInt::from(-100));
        let denom_estimate = testing_estimate(BigInt::from(70_000), BigInt::from(1000));
        assert_err_bound(
            &num_estimate,
            &denom_estimate,
            100_000,
            0,
            BigInt::from(ERR_BOUND),
        );
    }

    #[test]
    fn values_in_range() {
        let tens_of_fil = BigInt::from(50 * 10_i128.pow(18));
        let one_fil_per_sec = BigInt::from(25);
        let four_fil_per_second = BigInt::from(100);

        let slow_money = testing_estimate(tens_of_fil.clone(), one_fil_per_sec);
        let fast_money = testing_estimate(tens_of_fil, four_fil_per_second);

        let tens_of_ei_bs = StoragePower::from(10_i128.pow(19));
        let thousands_of_ei_bs = StoragePower::from(2 * 10_i128.pow(22));

        let one_byte_per_epoch_velocity = BigInt::from(1);
        let ten_pi_bs_per_day_velocity =
            BigInt::from(10 * 2_i128.pow(50)) / BigInt::from(EPOCHS_IN_DAY);
        let one_ei_bs_per_day_velocity =
            BigInt::from(2_i128.pow(60)) / BigInt::from(EPOCHS_IN_DAY);

        let delta = EPOCHS_IN_DAY;
        let t0 = 0;
        let err_bound = BigInt::from(ERR_BOUND);

        let test_cases: Vec<(StoragePower, BigInt)> = vec![
            (tens_of_ei_bs.clone(), one_byte_per_epoch_velocity.clone()),
            (tens_of_ei_bs.clone(), ten_pi_bs_per_day_velocity.clone()),
            (tens_of_ei_bs, one_ei_bs_per_day_velocity.clone()),
            (thousands_of_ei_bs.clone(), one_byte_per_epoch_velocity),
            (thousands_of_ei_bs.clone(), ten_pi_bs_per_day_velocity),
            (thousands_of_ei_bs, one_ei_bs_per_day_velocity),
        ];

        for (position, velocity) in test_cases {
            let power = testing_estimate(position, velocity);
            assert_err_bound(&slow_money, &power, delta, t0, err_bound.clone());
            assert_err_bound(&fast_money, &power, delta, t0, err_bound.clone());
        }
    }
}
