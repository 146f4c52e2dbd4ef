// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::Zero;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Number of attoFIL in one FIL.
pub const FILECOIN_PRECISION: u64 = 1_000_000_000_000_000_000;

/// Decimal places of the FIL rendering in [`TokenAmount::to_fil_string`].
pub const FIL_DISPLAY_DECIMALS: i64 = 10;

/// An amount of FIL, stored in attoFIL.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::From, derive_more::Into,
)]
pub struct TokenAmount(BigInt);

impl TokenAmount {
    pub fn from_atto(atto: impl Into<BigInt>) -> Self {
        Self(atto.into())
    }

    pub fn from_whole(fil: impl Into<BigInt>) -> Self {
        Self(fil.into() * FILECOIN_PRECISION)
    }

    pub fn atto(&self) -> &BigInt {
        &self.0
    }

    /// The amount in whole FIL, rounded half-to-even to
    /// [`FIL_DISPLAY_DECIMALS`] places, in plain decimal notation.
    pub fn to_fil_string(&self) -> String {
        BigDecimal::new(self.0.clone(), 18)
            .with_scale_round(FIL_DISPLAY_DECIMALS, RoundingMode::HalfEven)
            .to_plain_string()
    }
}

impl Zero for TokenAmount {
    fn zero() -> Self {
        Self(BigInt::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

/// Renders the raw attoFIL integer.
impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Add for TokenAmount {
    type Output = TokenAmount;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&TokenAmount> for &TokenAmount {
    type Output = TokenAmount;

    fn add(self, rhs: &TokenAmount) -> Self::Output {
        TokenAmount(&self.0 + &rhs.0)
    }
}

impl AddAssign for TokenAmount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Sum for TokenAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(TokenAmount::zero(), Add::add)
    }
}

impl std::str::FromStr for TokenAmount {
    type Err = num_bigint::ParseBigIntError;

    /// Parses a raw attoFIL integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for TokenAmount {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self(quickcheck::Arbitrary::arbitrary(g))
    }
}
