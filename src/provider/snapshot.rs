// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::{ChainDataProvider, PenaltyInputs};
use crate::blocks::{Tipset, TipsetKey};
use crate::sector::{ChainEpoch, SectorNumber, SectorOnChainInfo, SectorSize};
use crate::smooth::FilterEstimate;
use anyhow::Context as _;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A capture of the state needed for penalty calculations, stored as lotus
/// JSON so it can be assembled by hand from `lotus state` printouts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miner: Option<String>,
    pub height: ChainEpoch,
    #[serde(
        with = "crate::lotus_json",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sector_size: Option<SectorSize>,
    #[serde(with = "crate::lotus_json")]
    pub this_epoch_reward_smoothed: FilterEstimate,
    #[serde(with = "crate::lotus_json", rename = "ThisEpochQAPowerSmoothed")]
    pub this_epoch_qa_power_smoothed: FilterEstimate,
    #[serde(with = "crate::lotus_json", default)]
    pub sectors: Vec<SectorOnChainInfo>,
}

impl Snapshot {
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        serde_json::from_str(s).context("malformed snapshot")
    }

    pub fn to_json_string_pretty(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<PenaltyInputs> for Snapshot {
    fn from(inputs: PenaltyInputs) -> Self {
        let PenaltyInputs {
            miner,
            head,
            sector_size,
            reward_estimate,
            network_qa_power_estimate,
            sectors,
        } = inputs;
        Self {
            miner: Some(miner),
            height: head.epoch(),
            sector_size: Some(sector_size),
            this_epoch_reward_smoothed: reward_estimate,
            this_epoch_qa_power_smoothed: network_qa_power_estimate,
            sectors,
        }
    }
}

/// Serves queries from a [`Snapshot`] instead of a node.
///
/// A snapshot without a `SectorSize` reports 64GiB sectors.
#[derive(Clone, Debug)]
pub struct SnapshotProvider {
    snapshot: Snapshot,
}

impl SnapshotProvider {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        let snapshot = Snapshot::from_json_str(&json)
            .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
        Ok(Self::new(snapshot))
    }

    fn check_miner(&self, miner: &str) -> anyhow::Result<()> {
        match &self.snapshot.miner {
            Some(recorded) if recorded != miner => {
                anyhow::bail!("snapshot holds miner {recorded}, not {miner}")
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ChainDataProvider for SnapshotProvider {
    async fn chain_head(&self) -> anyhow::Result<Tipset> {
        Ok(Tipset::new(TipsetKey::default(), self.snapshot.height))
    }

    async fn miner_sector_size(&self, miner: &str, _: &TipsetKey) -> anyhow::Result<SectorSize> {
        self.check_miner(miner)?;
        Ok(self.snapshot.sector_size.unwrap_or_default())
    }

    async fn sector_info(
        &self,
        miner: &str,
        sector_number: SectorNumber,
        _: &TipsetKey,
    ) -> anyhow::Result<Option<SectorOnChainInfo>> {
        self.check_miner(miner)?;
        Ok(self
            .snapshot
            .sectors
            .iter()
            .find(|sector| sector.sector_number == sector_number)
            .cloned())
    }

    async fn reward_estimate(&self, _: &TipsetKey) -> anyhow::Result<FilterEstimate> {
        Ok(self.snapshot.this_epoch_reward_smoothed.clone())
    }

    async fn network_qa_power_estimate(&self, _: &TipsetKey) -> anyhow::Result<FilterEstimate> {
        Ok(self.snapshot.this_epoch_qa_power_smoothed.clone())
    }
}
