use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Networks hosting at least one lending market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Network {
    Mainnet,
    Goerli,
    Polygon,
    Avalanche,
    ArbitrumOne,
    Harmony,
    Optimism,
    Fantom,
}

impl Network {
    pub const fn chain_id(self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Goerli => 5,
            Network::Polygon => 137,
            Network::Avalanche => 43114,
            Network::ArbitrumOne => 42161,
            Network::Harmony => 1666600000,
            Network::Optimism => 10,
            Network::Fantom => 250,
        }
    }

    pub const fn default_rpc_url(self) -> &'static str {
        match self {
            Network::Mainnet => "https://eth-mainnet.public.blastapi.io",
            Network::Goerli => "https://eth-goerli.public.blastapi.io",
            Network::Polygon => "https://polygon-rpc.com",
            Network::Avalanche => "https://api.avax.network/ext/bc/C/rpc",
            Network::ArbitrumOne => "https://arb1.arbitrum.io/rpc",
            Network::Harmony => "https://api.s0.t.hmny.io",
            Network::Optimism => "https://mainnet.optimism.io",
            Network::Fantom => "https://rpc.ftm.tools",
        }
    }

    /// Pocket Network relay chain id, when the portal serves this network
    pub const fn default_relay_id(self) -> Option<&'static str> {
        match self {
            Network::Avalanche => Some("0003"),
            Network::Mainnet => Some("0021"),
            Network::Fantom => Some("0049"),
            Network::Polygon => Some("0009"),
            Network::Optimism => Some("0053"),
            Network::Harmony => Some("0040"),
            Network::Goerli | Network::ArbitrumOne => None,
        }
    }
}

/// Immutable chain id -> endpoint / relay id tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkTable {
    rpc_urls: BTreeMap<u64, String>,
    relay_ids: BTreeMap<u64, String>,
}

impl NetworkTable {
    pub fn empty() -> Self {
        Self { rpc_urls: BTreeMap::new(), relay_ids: BTreeMap::new() }
    }

    pub fn with_rpc_url(mut self, chain_id: u64, rpc_url: impl Into<String>) -> Self {
        self.rpc_urls.insert(chain_id, rpc_url.into());
        self
    }

    pub fn with_relay_id(mut self, chain_id: u64, relay_id: impl Into<String>) -> Self {
        self.relay_ids.insert(chain_id, relay_id.into());
        self
    }

    pub fn rpc_url(&self, chain_id: u64) -> Option<&str> {
        self.rpc_urls.get(&chain_id).map(String::as_str)
    }

    pub fn relay_id(&self, chain_id: u64) -> Option<&str> {
        self.relay_ids.get(&chain_id).map(String::as_str)
    }
}

impl Default for NetworkTable {
    fn default() -> Self {
        Network::iter().fold(Self::empty(), |table, network| {
            let table = table.with_rpc_url(network.chain_id(), network.default_rpc_url());
            match network.default_relay_id() {
                Some(relay_id) => table.with_relay_id(network.chain_id(), relay_id),
                None => table,
            }
        })
    }
}
