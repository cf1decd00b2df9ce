use crate::chain::ChainReader;
use crate::markets::Network;
use crate::tokenlist::TokenTag;
use alloy_primitives::Address;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProtocolVersion {
    V2,
    V3,
}

impl ProtocolVersion {
    /// Tag carried by the interest bearing tokens of this version
    pub fn a_token_tag(self) -> TokenTag {
        match self {
            Self::V2 => TokenTag::AtokenV2,
            Self::V3 => TokenTag::AtokenV3,
        }
    }
}

/// Static description of one deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketDefinition {
    pub name: String,
    pub network: Network,
    pub ui_pool_data_provider: Address,
    pub lending_pool_address_provider: Address,
    pub version: ProtocolVersion,
    pub testnet: bool,
}

impl MarketDefinition {
    pub fn new(
        name: &str,
        network: Network,
        ui_pool_data_provider: Address,
        lending_pool_address_provider: Address,
        version: ProtocolVersion,
    ) -> Self {
        Self {
            name: name.to_string(),
            network,
            ui_pool_data_provider,
            lending_pool_address_provider,
            version,
            testnet: false,
        }
    }

    pub fn testnet(mut self) -> Self {
        self.testnet = true;
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.network.chain_id()
    }
}

/// A market bound to the read-only connection of its network.
#[derive(Clone)]
pub struct Market {
    pub definition: MarketDefinition,
    pub reader: Arc<dyn ChainReader>,
}

impl Market {
    pub fn new(definition: MarketDefinition, reader: Arc<dyn ChainReader>) -> Self {
        Self { definition, reader }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn chain_id(&self) -> u64 {
        self.definition.chain_id()
    }

    pub fn version(&self) -> ProtocolVersion {
        self.definition.version
    }
}

impl fmt::Debug for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Market").field("definition", &self.definition).finish_non_exhaustive()
    }
}
