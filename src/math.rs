// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Fixed-point helpers shared by the smoothing and penalty code.
//!
//! Values tagged `Q.N` are integers scaled by `2^N`. Every multiplication of two
//! `Q.128` values yields a `Q.256` value and must be shifted back down by
//! [`PRECISION`] before being combined with another `Q.128` value.

use num::Integer as _;
use num_bigint::{BigInt, ParseBigIntError};
use num_traits::{Signed as _, Zero as _};

/// Binary precision of the smoothed estimates and of the ratio returned by
/// [`crate::smooth::extrapolated_cum_sum_of_ratio`].
pub const PRECISION: u64 = 128;

/// Parses a list of decimal strings into big integers, typically a table of
/// `Q.128` polynomial coefficients.
pub fn poly_parse(coefs: &[&str]) -> Result<Vec<BigInt>, ParseBigIntError> {
    coefs.iter().map(|c| c.parse()).collect()
}

/// Evaluates a polynomial at `x` using Horner's method.
///
/// Coefficients are ordered from the highest degree down to the constant term.
/// Both the coefficients and `x` are `Q.128`, as is the result.
pub fn poly_val(poly: &[BigInt], x: &BigInt) -> BigInt {
    let mut res = BigInt::zero();
    for coef in poly {
        res = ((res * x) >> PRECISION) + coef;
    }
    res
}

/// Euclidean division, i.e. the quotient for which the remainder is never negative.
///
/// This is the behaviour of Go's `big.Int.Div`, which the protocol formulas are
/// written against. For a non-negative dividend and a positive divisor it is
/// plain truncating division.
///
/// # Panics
/// Panics if `divisor` is zero. Callers check their denominators.
pub fn div_euclid(dividend: &BigInt, divisor: &BigInt) -> BigInt {
    let (quotient, remainder) = dividend.div_rem(divisor);
    if remainder.is_negative() {
        if divisor.is_positive() {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}
