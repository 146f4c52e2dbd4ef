// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;

/// Lotus prints empty lists as `null`.
pub struct VecLotusJson<T>(Vec<T>);

impl<T> HasLotusJson for Vec<T>
where
    T: HasLotusJson,
{
    type LotusJson = VecLotusJson<T::LotusJson>;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        unimplemented!("only Vec<TokenAmount> is tested, below")
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        VecLotusJson(self.into_iter().map(T::into_lotus_json).collect())
    }

    fn from_lotus_json(VecLotusJson(lotus_json): Self::LotusJson) -> Self {
        lotus_json.into_iter().map(T::from_lotus_json).collect()
    }
}

impl<T> Serialize for VecLotusJson<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0.is_empty() {
            true => serializer.serialize_none(),
            false => self.0.serialize(serializer),
        }
    }
}

impl<'de, T> Deserialize<'de> for VecLotusJson<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Vec<T>>::deserialize(deserializer)
            .map(Option::unwrap_or_default)
            .map(Self)
    }
}

#[test]
fn snapshots() {
    use crate::econ::TokenAmount;
    use pretty_assertions::assert_eq;
    assert_one_snapshot(
        json!(["1", "2"]),
        vec![TokenAmount::from_atto(1), TokenAmount::from_atto(2)],
    );
    assert_one_snapshot(json!(null), Vec::<TokenAmount>::new());
    // lotus sometimes prints an empty list rather than null
    assert_eq!(
        Vec::<TokenAmount>::from_lotus_json_value(json!([])).unwrap(),
        vec![]
    );
}

#[cfg(test)]
::quickcheck::quickcheck! {
    fn quickcheck(val: Vec<crate::econ::TokenAmount>) -> () {
        assert_unchanged_via_json(val)
    }
}
