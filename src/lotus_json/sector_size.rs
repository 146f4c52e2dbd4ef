// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;
use crate::sector::SectorSize;

/// Lotus prints a sector size as its number of bytes.
pub struct SectorSizeLotusJson(SectorSize);

impl Serialize for SectorSizeLotusJson {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0.bytes())
    }
}

impl<'de> Deserialize<'de> for SectorSizeLotusJson {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SectorSize::try_from(u64::deserialize(deserializer)?)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

impl HasLotusJson for SectorSize {
    type LotusJson = SectorSizeLotusJson;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        vec![
            (json!(2048), SectorSize::_2KiB),
            (json!(34359738368_u64), SectorSize::_32GiB),
            (json!(68719476736_u64), SectorSize::_64GiB),
        ]
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        SectorSizeLotusJson(self)
    }

    fn from_lotus_json(SectorSizeLotusJson(size): Self::LotusJson) -> Self {
        size
    }
}

#[test]
fn unsupported_sizes_are_rejected() {
    assert!(SectorSize::from_lotus_json_value(json!(4096)).is_err());
    assert!(SectorSize::from_lotus_json_value(json!("32GiB")).is_err());
}
