// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::sector::ChainEpoch;
use cid::Cid;
use std::fmt;

/// The CIDs of the blocks of a tipset. An empty key means the current head
/// to a Lotus node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TipsetKey(Vec<Cid>);

impl TipsetKey {
    pub fn cids(&self) -> &[Cid] {
        &self.0
    }

    pub fn into_cids(self) -> Vec<Cid> {
        self.0
    }
}

impl From<Vec<Cid>> for TipsetKey {
    fn from(cids: Vec<Cid>) -> Self {
        Self(cids)
    }
}

impl fmt::Display for TipsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self
            .0
            .iter()
            .map(|cid| cid.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{s}]")
    }
}

/// The parts of a tipset that anchor state queries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tipset {
    key: TipsetKey,
    epoch: ChainEpoch,
}

impl Tipset {
    pub fn new(key: TipsetKey, epoch: ChainEpoch) -> Self {
        Self { key, epoch }
    }

    pub fn key(&self) -> &TipsetKey {
        &self.key
    }

    pub fn epoch(&self) -> ChainEpoch {
        self.epoch
    }
}

mod lotus_json {
    //! [Tipset] isn't just plain old data - it has an invariant (all block
    //! headers are valid) - so we only read the key and height from lotus.

    use super::*;
    use crate::lotus_json::*;
    use serde::{Deserialize, Serialize};
    #[cfg(test)]
    use serde_json::json;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct TipsetLotusJson {
        #[serde(with = "crate::lotus_json")]
        cids: TipsetKey,
        height: ChainEpoch,
    }

    impl HasLotusJson for Tipset {
        type LotusJson = TipsetLotusJson;

        #[cfg(test)]
        fn snapshots() -> Vec<(serde_json::Value, Self)> {
            vec![(
                json!({
                    "Cids": [{"/": "baeaaaaa"}],
                    "Height": 4_000_000
                }),
                Tipset::new(TipsetKey::from(vec![Cid::default()]), 4_000_000),
            )]
        }

        fn into_lotus_json(self) -> Self::LotusJson {
            let Tipset { key, epoch } = self;
            TipsetLotusJson {
                cids: key,
                height: epoch,
            }
        }

        fn from_lotus_json(TipsetLotusJson { cids, height }: Self::LotusJson) -> Self {
            Tipset::new(cids, height)
        }
    }

    #[test]
    fn snapshots() {
        assert_all_snapshots::<Tipset>();
    }

    #[test]
    fn block_headers_are_skipped() {
        let head = Tipset::from_lotus_json_value(json!({
            "Cids": [{"/": "baeaaaaa"}],
            "Blocks": [{"Miner": "f01000", "Height": 12}],
            "Height": 12
        }))
        .unwrap();
        assert_eq!(head.epoch(), 12);
        assert_eq!(head.key().cids(), &[Cid::default()]);
    }
}
