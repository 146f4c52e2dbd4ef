// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::error::{Error, Result};
use crate::math;
use crate::policy::{
    DEAL_WEIGHT_MULTIPLIER, QUALITY_BASE_MULTIPLIER, SECTOR_QUALITY_PRECISION,
    VERIFIED_DEAL_WEIGHT_MULTIPLIER,
};
use crate::sector::{
    ChainEpoch, DealWeight, SectorOnChainInfo, SectorQuality, SectorSize, StoragePower,
};
use num_bigint::BigInt;

/// DealWeight and VerifiedDealWeight are spacetime occupied by regular deals and verified deals in a sector.
/// Sum of DealWeight and VerifiedDealWeight should be less than or equal to total SpaceTime of a sector.
/// Sectors full of VerifiedDeals will have a SectorQuality of VerifiedDealWeightMultiplier/QualityBaseMultiplier.
/// Sectors full of Deals will have a SectorQuality of DealWeightMultiplier/QualityBaseMultiplier.
/// Sectors with neither will have a SectorQuality of QualityBaseMultiplier/QualityBaseMultiplier.
/// SectorQuality of a sector is a weighted average of multipliers based on their proportions.
pub fn quality_for_weight(
    size: SectorSize,
    duration: ChainEpoch,
    deal_weight: &DealWeight,
    verified_weight: &DealWeight,
) -> Result<SectorQuality> {
    if duration <= 0 {
        return Err(Error::invalid_input(format!(
            "sector duration must be positive, got {duration}"
        )));
    }
    let sector_space_time = BigInt::from(size.bytes()) * BigInt::from(duration);
    let total_deal_space_time = deal_weight + verified_weight;

    // the base weight goes negative when the deals claim more than the sector holds
    let weighted_base_space_time =
        (&sector_space_time - total_deal_space_time) * QUALITY_BASE_MULTIPLIER;
    let weighted_deal_space_time = deal_weight * DEAL_WEIGHT_MULTIPLIER;
    let weighted_verified_space_time = verified_weight * VERIFIED_DEAL_WEIGHT_MULTIPLIER;
    let weighted_sum_space_time =
        weighted_base_space_time + weighted_deal_space_time + weighted_verified_space_time;
    let scaled_up_weighted_sum_space_time: SectorQuality =
        weighted_sum_space_time << SECTOR_QUALITY_PRECISION;

    // two separate divisions, in this order
    let average = math::div_euclid(&scaled_up_weighted_sum_space_time, &sector_space_time);
    Ok(math::div_euclid(
        &average,
        &BigInt::from(QUALITY_BASE_MULTIPLIER),
    ))
}

/// Returns the power for a sector size and weight.
pub fn qa_power_for_weight(
    size: SectorSize,
    duration: ChainEpoch,
    deal_weight: &DealWeight,
    verified_weight: &DealWeight,
) -> Result<StoragePower> {
    let quality = quality_for_weight(size, duration, deal_weight, verified_weight)?;
    Ok((BigInt::from(size.bytes()) * quality) >> SECTOR_QUALITY_PRECISION)
}

/// Returns the quality-adjusted power for a sector.
pub fn qa_power_for_sector(size: SectorSize, sector: &SectorOnChainInfo) -> Result<StoragePower> {
    let duration = sector.duration()?;
    qa_power_for_weight(
        size,
        duration,
        &sector.deal_weight,
        &sector.verified_deal_weight,
    )
}
