// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::blocks::TipsetKey;
use crate::lotus_json::{HasLotusJson, lotus_json_with_self};
use crate::sector::{SectorNumber, SectorOnChainInfo, SectorSize};
use crate::smooth::FilterEstimate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::{ApiInfo, RpcRequest};

pub const STATE_MINER_INFO: &str = "Filecoin.StateMinerInfo";
pub const STATE_SECTOR_GET_INFO: &str = "Filecoin.StateSectorGetInfo";
pub const STATE_READ_STATE: &str = "Filecoin.StateReadState";

/// ID address of the reward actor.
pub const REWARD_ACTOR_ADDR: &str = "f02";
/// ID address of the storage power actor.
pub const STORAGE_POWER_ACTOR_ADDR: &str = "f04";

/// The part of `StateMinerInfo` used here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MinerInfo {
    #[serde(with = "crate::lotus_json")]
    pub sector_size: SectorSize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RewardState {
    #[serde(with = "crate::lotus_json")]
    pub this_epoch_reward_smoothed: FilterEstimate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerState {
    #[serde(with = "crate::lotus_json", rename = "ThisEpochQAPowerSmoothed")]
    pub this_epoch_qa_power_smoothed: FilterEstimate,
}

lotus_json_with_self!(MinerInfo, RewardState, PowerState);

/// Output of `StateReadState`. The balance and code of the actor are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActorReadState<S> {
    pub state: S,
}

impl<S> HasLotusJson for ActorReadState<S>
where
    S: Serialize + DeserializeOwned,
{
    type LotusJson = Self;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        unimplemented!("tests are trivial for HasLotusJson<LotusJson = Self>")
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        self
    }

    fn from_lotus_json(lotus_json: Self::LotusJson) -> Self {
        lotus_json
    }
}

impl ApiInfo {
    pub fn state_miner_info_req(miner: String, tsk: TipsetKey) -> RpcRequest<MinerInfo> {
        RpcRequest::new(STATE_MINER_INFO, (miner, tsk))
    }

    pub fn state_sector_get_info_req(
        miner: String,
        sector_number: SectorNumber,
        tsk: TipsetKey,
    ) -> RpcRequest<Option<SectorOnChainInfo>> {
        RpcRequest::new(STATE_SECTOR_GET_INFO, (miner, sector_number, tsk))
    }

    pub fn reward_state_req(tsk: TipsetKey) -> RpcRequest<ActorReadState<RewardState>> {
        RpcRequest::new(STATE_READ_STATE, (REWARD_ACTOR_ADDR.to_owned(), tsk))
    }

    pub fn power_state_req(tsk: TipsetKey) -> RpcRequest<ActorReadState<PowerState>> {
        RpcRequest::new(STATE_READ_STATE, (STORAGE_POWER_ACTOR_ADDR.to_owned(), tsk))
    }
}
