// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::*;

impl<T> HasLotusJson for Option<T>
where
    T: HasLotusJson,
{
    type LotusJson = Option<T::LotusJson>;

    #[cfg(test)]
    fn snapshots() -> Vec<(serde_json::Value, Self)> {
        unimplemented!("only Option<TokenAmount> is tested, below")
    }

    fn into_lotus_json(self) -> Self::LotusJson {
        self.map(T::into_lotus_json)
    }

    fn from_lotus_json(lotus_json: Self::LotusJson) -> Self {
        lotus_json.map(T::from_lotus_json)
    }
}

#[test]
fn snapshots() {
    use crate::econ::TokenAmount;
    assert_one_snapshot(json!("42"), Some(TokenAmount::from_atto(42)));
    assert_one_snapshot(json!(null), None::<TokenAmount>);
}

#[cfg(test)]
::quickcheck::quickcheck! {
    fn quickcheck(val: Option<crate::econ::TokenAmount>) -> () {
        assert_unchanged_via_json(val)
    }
}
