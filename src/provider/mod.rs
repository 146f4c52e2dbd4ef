// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Sources of the chain state a termination penalty is computed from.

mod snapshot;

pub use snapshot::{Snapshot, SnapshotProvider};

use std::collections::HashSet;

use crate::blocks::{Tipset, TipsetKey};
use crate::econ::TokenAmount;
use crate::miner;
use crate::sector::{SectorNumber, SectorOnChainInfo, SectorSize};
use crate::smooth::FilterEstimate;
use anyhow::Context as _;
use async_trait::async_trait;
use tracing::{debug, info};

/// Batches at least this large are evaluated on the rayon thread pool.
pub const PARALLEL_THRESHOLD: usize = 256;

/// Read access to the chain state needed for termination penalties.
///
/// Every query is anchored to an explicit tipset so that all inputs of one
/// calculation come from the same state.
#[async_trait]
pub trait ChainDataProvider: Send + Sync {
    /// The tipset state queries are evaluated against.
    async fn chain_head(&self) -> anyhow::Result<Tipset>;

    async fn miner_sector_size(&self, miner: &str, tsk: &TipsetKey) -> anyhow::Result<SectorSize>;

    /// Returns [`None`] if the miner has no such sector.
    async fn sector_info(
        &self,
        miner: &str,
        sector_number: SectorNumber,
        tsk: &TipsetKey,
    ) -> anyhow::Result<Option<SectorOnChainInfo>>;

    /// `ThisEpochRewardSmoothed` of the reward actor.
    async fn reward_estimate(&self, tsk: &TipsetKey) -> anyhow::Result<FilterEstimate>;

    /// `ThisEpochQAPowerSmoothed` of the power actor.
    async fn network_qa_power_estimate(&self, tsk: &TipsetKey) -> anyhow::Result<FilterEstimate>;
}

/// Everything needed to price the termination of a set of sectors of one
/// miner at one tipset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PenaltyInputs {
    pub miner: String,
    pub head: Tipset,
    pub sector_size: SectorSize,
    pub reward_estimate: FilterEstimate,
    pub network_qa_power_estimate: FilterEstimate,
    pub sectors: Vec<SectorOnChainInfo>,
}

impl PenaltyInputs {
    /// Total termination penalty of all sectors at the head epoch.
    pub fn termination_penalty(&self) -> crate::error::Result<TokenAmount> {
        let penalty = if self.sectors.len() >= PARALLEL_THRESHOLD {
            miner::par_termination_penalty
        } else {
            miner::termination_penalty
        };
        penalty(
            self.sector_size,
            self.head.epoch(),
            &self.reward_estimate,
            &self.network_qa_power_estimate,
            &self.sectors,
        )
    }

    /// Penalty of each sector on its own, in input order.
    pub fn sector_penalties(&self) -> crate::error::Result<Vec<(SectorNumber, TokenAmount)>> {
        self.sectors
            .iter()
            .map(|sector| {
                miner::sector_termination_penalty(
                    self.sector_size,
                    self.head.epoch(),
                    &self.reward_estimate,
                    &self.network_qa_power_estimate,
                    sector,
                )
                .map(|penalty| (sector.sector_number, penalty))
            })
            .collect()
    }
}

/// Gathers the inputs for terminating `sector_numbers` of `miner` at the
/// provider's current head.
///
/// The miner's own sector size is used unless `sector_size_override` is set.
/// Repeated sector numbers are priced once, at their first position.
pub async fn load_penalty_inputs(
    provider: &dyn ChainDataProvider,
    miner: &str,
    sector_numbers: &[SectorNumber],
    sector_size_override: Option<SectorSize>,
) -> anyhow::Result<PenaltyInputs> {
    let head = provider
        .chain_head()
        .await
        .context("failed to get chain head")?;
    info!(epoch = head.epoch(), tipset = %head.key(), "loading penalty inputs");
    let tsk = head.key();

    let sector_size = match sector_size_override {
        Some(size) => size,
        None => provider
            .miner_sector_size(miner, tsk)
            .await
            .with_context(|| format!("failed to get sector size of miner {miner}"))?,
    };
    let reward_estimate = provider
        .reward_estimate(tsk)
        .await
        .context("failed to get reward estimate")?;
    let network_qa_power_estimate = provider
        .network_qa_power_estimate(tsk)
        .await
        .context("failed to get network power estimate")?;

    let mut seen = HashSet::with_capacity(sector_numbers.len());
    let mut sectors = Vec::with_capacity(sector_numbers.len());
    for &sector_number in sector_numbers {
        if !seen.insert(sector_number) {
            debug!(sector = sector_number, "skipping repeated sector");
            continue;
        }
        let sector = provider
            .sector_info(miner, sector_number, tsk)
            .await
            .with_context(|| format!("failed to get sector {sector_number} of miner {miner}"))?
            .with_context(|| format!("sector {sector_number} of miner {miner} not found"))?;
        debug!(
            sector = sector_number,
            activation = sector.activation,
            expiration = sector.expiration,
            "loaded sector"
        );
        sectors.push(sector);
    }

    Ok(PenaltyInputs {
        miner: miner.to_owned(),
        head,
        sector_size,
        reward_estimate,
        network_qa_power_estimate,
        sectors,
    })
}
