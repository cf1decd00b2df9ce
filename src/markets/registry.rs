use crate::chain::{ChainReader, RpcChainReader};
use crate::markets::{Market, MarketDefinition, Network, NetworkTable, ProtocolVersion};
use alloy_primitives::address;
use eyre::{Result, WrapErr};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Known deployments, in the order their tokens are listed.
pub fn default_markets() -> Vec<MarketDefinition> {
    vec![
        MarketDefinition::new(
            "AaveV2Ethereum",
            Network::Mainnet,
            address!("30375522F67a6308630d49A694ca1491fA2D3BC6"),
            address!("B53C1a33016B2DC2fF3653530bfF1848a515c8c5"),
            ProtocolVersion::V2,
        ),
        MarketDefinition::new(
            "AaveV2EthereumAMM",
            Network::Mainnet,
            address!("30375522F67a6308630d49A694ca1491fA2D3BC6"),
            address!("acc030ef66f9dfeae9cbb0cd1b25654b82cfa8d5"),
            ProtocolVersion::V2,
        ),
        MarketDefinition::new(
            "AaveV2EthereumGoerli",
            Network::Goerli,
            address!("cCb7a1B6B5D72c4AA633B114537cD20612fDccbB"),
            address!("5E52dEc931FFb32f609681B8438A51c675cc232d"),
            ProtocolVersion::V2,
        )
        .testnet(),
        MarketDefinition::new(
            "AaveV3EthereumGoerli",
            Network::Goerli,
            address!("C576539371a2f425545B7BF4eb2a14Eee1944a1C"),
            address!("c4dCB5126a3AfEd129BC3668Ea19285A9f56D15D"),
            ProtocolVersion::V3,
        )
        .testnet(),
        MarketDefinition::new(
            "AaveV2Polygon",
            Network::Polygon,
            address!("0d24b23DBaB0dc1A6F58029bA94F94Ff0D5382c2"),
            address!("d05e3E715d945B59290df0ae8eF85c1BdB684744"),
            ProtocolVersion::V2,
        ),
        MarketDefinition::new(
            "AaveV3Polygon",
            Network::Polygon,
            address!("7006e5a16E449123a3F26920746d03337ff37340"),
            address!("a97684ead0e402dC232d5A977953DF7ECBaB3CDb"),
            ProtocolVersion::V3,
        ),
        MarketDefinition::new(
            "AaveV2Avalanche",
            Network::Avalanche,
            address!("a7da242e099136A71fF975B8D78b79AA543c9182"),
            address!("b6A86025F0FE1862B372cb0ca18CE3EDe02A318f"),
            ProtocolVersion::V2,
        ),
        MarketDefinition::new(
            "AaveV3Avalanche",
            Network::Avalanche,
            address!("1dDAF95C8f58d1283E9aE5e3C964b575D7cF7aE3"),
            address!("a97684ead0e402dC232d5A977953DF7ECBaB3CDb"),
            ProtocolVersion::V3,
        ),
        MarketDefinition::new(
            "AaveV3Arbitrum",
            Network::ArbitrumOne,
            address!("85272bf6DdCCBDea45Cf0535ea5C65bf91B480c4"),
            address!("a97684ead0e402dC232d5A977953DF7ECBaB3CDb"),
            ProtocolVersion::V3,
        ),
        MarketDefinition::new(
            "AaveV3Fantom",
            Network::Fantom,
            address!("46E1b32fA843da745D7AA0ae630b544D6af9fe81"),
            address!("a97684ead0e402dC232d5A977953DF7ECBaB3CDb"),
            ProtocolVersion::V3,
        ),
        MarketDefinition::new(
            "AaveV3Harmony",
            Network::Harmony,
            address!("f952959c0F7FBed55786749219FECd8cd0ec8441"),
            address!("a97684ead0e402dC232d5A977953DF7ECBaB3CDb"),
            ProtocolVersion::V3,
        ),
        MarketDefinition::new(
            "AaveV3Optimism",
            Network::Optimism,
            address!("472337F1C9c1C5497c23dD8060df8729f33b5543"),
            address!("a97684ead0e402dC232d5A977953DF7ECBaB3CDb"),
            ProtocolVersion::V3,
        ),
    ]
}

/// Ordered markets, each sharing its network's reader with the other markets on that network.
#[derive(Debug, Clone, Default)]
pub struct MarketRegistry {
    markets: Vec<Market>,
}

impl MarketRegistry {
    pub fn new(markets: Vec<Market>) -> Self {
        Self { markets }
    }

    /// Bind every definition to a reader built by `connect`, called once per network.
    pub fn build<F>(definitions: Vec<MarketDefinition>, networks: &NetworkTable, mut connect: F) -> Result<Self>
    where
        F: FnMut(Network, &str) -> Result<Arc<dyn ChainReader>>,
    {
        let mut readers: HashMap<Network, Arc<dyn ChainReader>> = HashMap::new();
        let mut markets = Vec::with_capacity(definitions.len());

        for definition in definitions {
            let network = definition.network;
            let reader = match readers.get(&network) {
                Some(reader) => Arc::clone(reader),
                None => {
                    let rpc_url = networks
                        .rpc_url(network.chain_id())
                        .ok_or_else(|| eyre::eyre!("No RPC endpoint configured for {} ({})", network, definition.name))?;
                    let reader = connect(network, rpc_url)?;
                    readers.insert(network, Arc::clone(&reader));
                    reader
                }
            };
            markets.push(Market::new(definition, reader));
        }

        info!("Market registry ready: {} markets on {} networks", markets.len(), readers.len());
        Ok(Self { markets })
    }

    /// Build the registry over JSON-RPC readers.
    pub fn connect(definitions: Vec<MarketDefinition>, networks: &NetworkTable, timeout: Duration) -> Result<Self> {
        Self::build(definitions, networks, |network, rpc_url| {
            let reader = RpcChainReader::new(rpc_url, timeout)
                .wrap_err_with(|| format!("Failed to create RPC client for {network}"))?;
            debug!("{}: connected to {}", network, reader.rpc_url());
            Ok(Arc::new(reader) as Arc<dyn ChainReader>)
        })
    }

    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}
