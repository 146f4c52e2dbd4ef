// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use crate::econ::TokenAmount;
use crate::sector::{ChainEpoch, DealWeight, SectorNumber, SectorOnChainInfo};

/// The subset of lotus' `SectorOnChainInfo` read by the penalty calculation.
/// Other fields (`SealProof`, `SealedCID`, `DealIDs`, ...) are ignored.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectorOnChainInfoLotusJson {
    sector_number: SectorNumber,
    activation: ChainEpoch,
    expiration: ChainEpoch,
    #[serde(with = "crate::lotus_json")]
    deal_weight: DealWeight,
    #[serde(with = "crate::lotus_json")]
    verified_deal_weight: DealWeight,
    #[serde(with = "crate::lotus_json")]
    initial_pledge: TokenAmount,
    #[serde(with = "crate::lotus_json")]
    expected_day_reward: TokenAmount,
    #[serde(with = "crate::lotus_json")]
    expected_storage_pledge: TokenAmount,
    // absent or null on sectors that replaced nothing
    #[serde(default)]
    replaced_sector_age: Option<ChainEpoch>,
    #[serde(with = "crate::lotus_json", default)]
    replaced_day_reward: Option<TokenAmount>,
}

impl HasLotusJson for SectorOnChainInfo {
    type LotusJson = SectorOnChainInfoLotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        vec![(
            json!({
                "SectorNumber": 9,
                "Activation": 1000,
                "Expiration": 1_552_000,
                "DealWeight": "0",
                "VerifiedDealWeight": "123456789",
                "InitialPledge": "150000000000000000",
                "ExpectedDayReward": "2000000000000000",
                "ExpectedStoragePledge": "40000000000000000",
                "ReplacedSectorAge": 0,
                "ReplacedDayReward": "0"
            }),
            SectorOnChainInfo {
                sector_number: 9,
                activation: 1000,
                expiration: 1_552_000,
                deal_weight: DealWeight::from(0),
                verified_deal_weight: DealWeight::from(123_456_789),
                initial_pledge: TokenAmount::from_atto(150_000_000_000_000_000_u64),
                expected_day_reward: TokenAmount::from_atto(2_000_000_000_000_000_u64),
                expected_storage_pledge: TokenAmount::from_atto(40_000_000_000_000_000_u64),
                replaced_sector_age: 0,
                replaced_day_reward: TokenAmount::from_atto(0),
            },
        )]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        let SectorOnChainInfo {
            sector_number,
            activation,
            expiration,
            deal_weight,
            verified_deal_weight,
            initial_pledge,
            expected_day_reward,
            expected_storage_pledge,
            replaced_sector_age,
            replaced_day_reward,
        } = self;
        SectorOnChainInfoLotusJson {
            sector_number,
            activation,
            expiration,
            deal_weight,
            verified_deal_weight,
            initial_pledge,
            expected_day_reward,
            expected_storage_pledge,
            replaced_sector_age: Some(replaced_sector_age),
            replaced_day_reward: Some(replaced_day_reward),
        }
    }

    fn from_lotus_json(lotus_json: Self::LotusJson) -> Self {
        let SectorOnChainInfoLotusJson {
            sector_number,
            activation,
            expiration,
            deal_weight,
            verified_deal_weight,
            initial_pledge,
            expected_day_reward,
            expected_storage_pledge,
            replaced_sector_age,
            replaced_day_reward,
        } = lotus_json;
        SectorOnChainInfo {
            sector_number,
            activation,
            expiration,
            deal_weight,
            verified_deal_weight,
            initial_pledge,
            expected_day_reward,
            expected_storage_pledge,
            replaced_sector_age: replaced_sector_age.unwrap_or_default(),
            replaced_day_reward: replaced_day_reward.unwrap_or_default(),
        }
    }
}

#[test]
fn lotus_printout_with_extra_and_missing_fields() {
    use pretty_assertions::assert_eq;

    let sector = SectorOnChainInfo::from_lotus_json_value(json!({
        "SectorNumber": 3,
        "SealProof": 8,
        "SealedCID": {"/": "baeaaaaa"},
        "DealIDs": null,
        "Activation": 10,
        "Expiration": 20,
        "DealWeight": "1",
        "VerifiedDealWeight": "2",
        "InitialPledge": "3",
        "ExpectedDayReward": "4",
        "ExpectedStoragePledge": "5",
        "ReplacedDayReward": null,
        "SectorKeyCID": null,
        "SimpleQAPower": false
    }))
    .unwrap();
    assert_eq!(
        sector,
        SectorOnChainInfo {
            sector_number: 3,
            activation: 10,
            expiration: 20,
            deal_weight: DealWeight::from(1),
            verified_deal_weight: DealWeight::from(2),
            initial_pledge: TokenAmount::from_atto(3),
            expected_day_reward: TokenAmount::from_atto(4),
            expected_storage_pledge: TokenAmount::from_atto(5),
            replaced_sector_age: 0,
            replaced_day_reward: TokenAmount::from_atto(0),
        }
    );
}

#[test]
fn numbers_for_big_integers_are_rejected() {
    let err = SectorOnChainInfo::from_lotus_json_value(json!({
        "SectorNumber": 3,
        "Activation": 10,
        "Expiration": 20,
        "DealWeight": 1,
        "VerifiedDealWeight": "2",
        "InitialPledge": "3",
        "ExpectedDayReward": "4",
        "ExpectedStoragePledge": "5"
    }));
    assert!(err.is_err());
}
