// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;

use num_bigint::BigInt;

#[derive(Serialize, Deserialize, From)]
#[serde(transparent)]
pub struct BigIntLotusJson(#[serde(with = "stringify")] BigInt);

impl HasLotusJson for BigInt {
    type LotusJson = BigIntLotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        vec![
            (json!("1"), BigInt::from(1)),
            (json!("-340282366920938463463374607431768211456"), -(BigInt::from(1) << 128u32)),
        ]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        BigIntLotusJson(self)
    }

    fn from_lotus_json(BigIntLotusJson(big_int): Self::LotusJson) -> Self {
        big_int
    }
}
