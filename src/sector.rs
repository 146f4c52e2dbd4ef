// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::econ::TokenAmount;
use crate::error::{Error, Result};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Epoch number of the chain state.
pub type ChainEpoch = i64;

/// Identifier of a sector, relative to its miner.
pub type SectorNumber = u64;

/// Storage power in bytes.
pub type StoragePower = BigInt;

/// Space-time product of deals, in byte-epochs.
pub type DealWeight = BigInt;

/// Sector quality, a `Q.20` multiplier of raw power
/// (see [`crate::policy::SECTOR_QUALITY_PRECISION`]).
pub type SectorQuality = BigInt;

/// Sector sizes supported by the network.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumString,
    strum::Display,
)]
#[repr(u64)]
pub enum SectorSize {
    #[strum(serialize = "2KiB")]
    _2KiB = 2 << 10,
    #[strum(serialize = "8MiB")]
    _8MiB = 8 << 20,
    #[strum(serialize = "512MiB")]
    _512MiB = 512 << 20,
    #[strum(serialize = "32GiB")]
    _32GiB = 32 << 30,
    #[default]
    #[strum(serialize = "64GiB")]
    _64GiB = 2 * (32 << 30),
}

impl SectorSize {
    pub fn bytes(self) -> u64 {
        self as u64
    }
}

impl TryFrom<u64> for SectorSize {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        match value {
            v if v == Self::_2KiB.bytes() => Ok(Self::_2KiB),
            v if v == Self::_8MiB.bytes() => Ok(Self::_8MiB),
            v if v == Self::_512MiB.bytes() => Ok(Self::_512MiB),
            v if v == Self::_32GiB.bytes() => Ok(Self::_32GiB),
            v if v == Self::_64GiB.bytes() => Ok(Self::_64GiB),
            other => Err(Error::invalid_input(format!(
                "unsupported sector size: {other} bytes"
            ))),
        }
    }
}

impl Serialize for SectorSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SectorSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

/// The economic fields of an on-chain sector that take part in the
/// termination penalty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectorOnChainInfo {
    pub sector_number: SectorNumber,
    /// Epoch during which the sector proof was accepted
    pub activation: ChainEpoch,
    /// Epoch during which the sector expires
    pub expiration: ChainEpoch,
    /// Integral of active deals over sector lifetime
    pub deal_weight: DealWeight,
    /// Integral of active verified deals over sector lifetime
    pub verified_deal_weight: DealWeight,
    /// Pledge collected to commit this sector
    pub initial_pledge: TokenAmount,
    /// Expected one day projection of reward for sector computed at activation time
    pub expected_day_reward: TokenAmount,
    /// Expected twenty day projection of reward for sector computed at activation time
    pub expected_storage_pledge: TokenAmount,
    /// Age of sector this sector replaced or zero
    pub replaced_sector_age: ChainEpoch,
    /// Day reward of sector this sector replace or zero
    pub replaced_day_reward: TokenAmount,
}

impl SectorOnChainInfo {
    /// Committed lifetime of the sector in epochs.
    pub fn duration(&self) -> Result<ChainEpoch> {
        self.expiration
            .checked_sub(self.activation)
            .ok_or_else(|| {
                Error::overflow(format!(
                    "expiration {} - activation {}",
                    self.expiration, self.activation
                ))
            })
    }

    /// Number of epochs the sector has been active at `current_epoch`.
    pub fn age_at(&self, current_epoch: ChainEpoch) -> Result<ChainEpoch> {
        let age = current_epoch.checked_sub(self.activation).ok_or_else(|| {
            Error::overflow(format!(
                "epoch {current_epoch} - activation {}",
                self.activation
            ))
        })?;
        if age < 0 {
            return Err(Error::invalid_input(format!(
                "sector activates at epoch {}, after evaluation epoch {current_epoch}",
                self.activation
            )));
        }
        Ok(age)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for SectorSize {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[
            Self::_2KiB,
            Self::_8MiB,
            Self::_512MiB,
            Self::_32GiB,
            Self::_64GiB,
        ])
        .expect("slice is not empty")
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for SectorOnChainInfo {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self {
            sector_number: quickcheck::Arbitrary::arbitrary(g),
            activation: quickcheck::Arbitrary::arbitrary(g),
            expiration: quickcheck::Arbitrary::arbitrary(g),
            deal_weight: quickcheck::Arbitrary::arbitrary(g),
            verified_deal_weight: quickcheck::Arbitrary::arbitrary(g),
            initial_pledge: quickcheck::Arbitrary::arbitrary(g),
            expected_day_reward: quickcheck::Arbitrary::arbitrary(g),
            expected_storage_pledge: quickcheck::Arbitrary::arbitrary(g),
            replaced_sector_age: quickcheck::Arbitrary::arbitrary(g),
            replaced_day_reward: quickcheck::Arbitrary::arbitrary(g),
        }
    }
}
