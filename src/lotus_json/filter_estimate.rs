// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use crate::smooth::FilterEstimate;
use num_bigint::BigInt;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterEstimateLotusJson {
    #[serde(with = "crate::lotus_json")]
    position_estimate: BigInt,
    #[serde(with = "crate::lotus_json")]
    velocity_estimate: BigInt,
}

impl HasLotusJson for FilterEstimate {
    type LotusJson = FilterEstimateLotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        vec![(
            json!({
                "PositionEstimate": "1000000000000000000",
                "VelocityEstimate": "-500000000000000000"
            }),
            FilterEstimate::new(
                BigInt::from(1_000_000_000_000_000_000_i64),
                BigInt::from(-500_000_000_000_000_000_i64),
            ),
        )]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        let FilterEstimate { position, velocity } = self;
        FilterEstimateLotusJson {
            position_estimate: position,
            velocity_estimate: velocity,
        }
    }

    fn from_lotus_json(lotus_json: Self::LotusJson) -> Self {
        let FilterEstimateLotusJson {
            position_estimate,
            velocity_estimate,
        } = lotus_json;
        FilterEstimate::new(position_estimate, velocity_estimate)
    }
}
