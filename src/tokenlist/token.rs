use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TokenTag {
    Underlying,
    AtokenV2,
    AtokenV3,
}

/// One entry of the token list. Identity is `(chain_id, address)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub symbol: String,
    pub address: Address,
    pub tags: Vec<TokenTag>,
    pub decimals: u8,
    pub name: String,
    pub chain_id: u64,
}

impl TokenInfo {
    pub fn new(chain_id: u64, address: Address, symbol: String, name: String, decimals: u8, tag: TokenTag) -> Self {
        Self { symbol, address, tags: vec![tag], decimals, name, chain_id }
    }

    pub fn has_tag(&self, tag: TokenTag) -> bool {
        self.tags.contains(&tag)
    }
}
