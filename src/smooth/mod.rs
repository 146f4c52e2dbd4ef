// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod smooth_func;

pub use smooth_func::{extrapolated_cum_sum_of_ratio, ln};

use crate::math::PRECISION;
use crate::sector::ChainEpoch;
use num_bigint::BigInt;

/// Output of an alpha-beta filter: a smoothed position and its rate of change
/// per epoch, both in `Q.128`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterEstimate {
    pub position: BigInt,
    pub velocity: BigInt,
}

impl FilterEstimate {
    /// Creates an estimate from values that are already `Q.128`, as stored
    /// on chain.
    pub fn new(position: BigInt, velocity: BigInt) -> Self {
        FilterEstimate { position, velocity }
    }

    /// The position estimate, truncated to `Q.0`.
    pub fn estimate(&self) -> BigInt {
        &self.position >> PRECISION
    }

    /// Extrapolates the position `delta` epochs ahead, in `Q.256`.
    pub fn extrapolate(&self, delta: ChainEpoch) -> BigInt {
        let delta_t = BigInt::from(delta) << PRECISION;
        let position = &self.position << PRECISION;
        (&self.velocity * delta_t) + position
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for FilterEstimate {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self::new(quickcheck::Arbitrary::arbitrary(g), quickcheck::Arbitrary::arbitrary(g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_drops_the_fraction() {
        let half = BigInt::from(1) << (PRECISION - 1);
        let estimate = FilterEstimate::new((BigInt::from(7) << PRECISION) + half, BigInt::from(0));
        assert_eq!(estimate.estimate(), BigInt::from(7));
    }

    #[test]
    fn extrapolate_is_linear() {
        let estimate = FilterEstimate::new(BigInt::from(5) << PRECISION, BigInt::from(2) << PRECISION);
        assert_eq!(estimate.extrapolate(0), BigInt::from(5) << (2 * PRECISION));
        assert_eq!(estimate.extrapolate(10), BigInt::from(25) << (2 * PRECISION));
    }
}
