// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{monies, power};
use crate::econ::TokenAmount;
use crate::error::Result;
use crate::sector::{ChainEpoch, SectorOnChainInfo, SectorSize};
use crate::smooth::FilterEstimate;
use num_traits::Zero as _;
use rayon::prelude::*;
use tracing::debug;

/// Penalty for terminating a single sector at `current_epoch`.
pub fn sector_termination_penalty(
    sector_size: SectorSize,
    current_epoch: ChainEpoch,
    reward_estimate: &FilterEstimate,
    network_qa_power_estimate: &FilterEstimate,
    sector: &SectorOnChainInfo,
) -> Result<TokenAmount> {
    let compute = || -> Result<TokenAmount> {
        let sector_power = power::qa_power_for_sector(sector_size, sector)?;
        let sector_age = sector.age_at(current_epoch)?;
        let fee = monies::pledge_penalty_for_termination(
            &sector.expected_day_reward,
            sector_age,
            &sector.expected_storage_pledge,
            network_qa_power_estimate,
            &sector_power,
            reward_estimate,
            &sector.replaced_day_reward,
            sector.replaced_sector_age,
        )?;
        debug!(
            sector = sector.sector_number,
            age = sector_age,
            power = %sector_power,
            penalty = %fee,
            "computed termination fee"
        );
        Ok(fee)
    };
    compute().map_err(|e| e.for_sector(sector.sector_number))
}

/// Total penalty for terminating all `sectors` at `current_epoch`.
///
/// Fails on the first sector whose penalty can't be computed, with the
/// error tagged by that sector's number.
pub fn termination_penalty(
    sector_size: SectorSize,
    current_epoch: ChainEpoch,
    reward_estimate: &FilterEstimate,
    network_qa_power_estimate: &FilterEstimate,
    sectors: &[SectorOnChainInfo],
) -> Result<TokenAmount> {
    let mut total_fee = TokenAmount::zero();
    for sector in sectors {
        total_fee += sector_termination_penalty(
            sector_size,
            current_epoch,
            reward_estimate,
            network_qa_power_estimate,
            sector,
        )?;
    }
    Ok(total_fee)
}

/// Same as [`termination_penalty`], with the sectors spread over the rayon
/// thread pool. Which failing sector is reported is unspecified when several
/// fail.
pub fn par_termination_penalty(
    sector_size: SectorSize,
    current_epoch: ChainEpoch,
    reward_estimate: &FilterEstimate,
    network_qa_power_estimate: &FilterEstimate,
    sectors: &[SectorOnChainInfo],
) -> Result<TokenAmount> {
    sectors
        .par_iter()
        .map(|sector| {
            sector_termination_penalty(
                sector_size,
                current_epoch,
                reward_estimate,
                network_qa_power_estimate,
                sector,
            )
        })
        .try_reduce(TokenAmount::zero, |a, b| Ok(a + b))
}
