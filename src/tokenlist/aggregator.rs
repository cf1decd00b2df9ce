use crate::chain::Reserve;
use crate::constants::MAINNET_MKR;
use crate::markets::{Market, Network};
use crate::tokenlist::{TokenInfo, TokenTag};
use ahash::AHashSet;
use alloy_primitives::Address;
use eyre::{Result, WrapErr};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Contract addresses discovered per chain id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowList {
    contracts: BTreeMap<u64, BTreeSet<Address>>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `chain_id` is present even if none of its markets lists a reserve
    pub fn register_network(&mut self, chain_id: u64) {
        self.contracts.entry(chain_id).or_default();
    }

    pub fn insert(&mut self, chain_id: u64, contract: Address) {
        self.contracts.entry(chain_id).or_default().insert(contract);
    }

    pub fn contracts(&self, chain_id: u64) -> Option<&BTreeSet<Address>> {
        self.contracts.get(&chain_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &BTreeSet<Address>)> {
        self.contracts.iter().map(|(chain_id, contracts)| (*chain_id, contracts))
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

/// Output of one aggregation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregatedTokens {
    pub tokens: Vec<TokenInfo>,
    pub allow_list: AllowList,
}

/// Turns market reserves into token list entries.
///
/// Underlying assets are listed once per network; every market gets its own aToken entry.
#[derive(Debug, Default)]
pub struct TokenAggregator {
    tokens: Vec<TokenInfo>,
    seen_underlying: AHashSet<(u64, Address)>,
    allow_list: AllowList,
}

impl TokenAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate every market in order; the first failed read aborts the run.
    pub async fn aggregate(markets: &[Market]) -> Result<AggregatedTokens> {
        let mut aggregator = Self::new();
        for market in markets {
            aggregator.add_market(market).await?;
        }
        Ok(aggregator.finish())
    }

    pub async fn add_market(&mut self, market: &Market) -> Result<()> {
        let chain_id = market.chain_id();
        self.allow_list.register_network(chain_id);

        let reserves = market
            .reader
            .reserves(&market.definition)
            .await
            .wrap_err_with(|| format!("Failed to fetch reserves of {}", market.name()))?;
        info!("{}: {} reserves", market.name(), reserves.len());

        for reserve in &reserves {
            self.add_reserve(market, reserve).await?;
        }
        Ok(())
    }

    async fn add_reserve(&mut self, market: &Market, reserve: &Reserve) -> Result<()> {
        let chain_id = market.chain_id();

        if self.seen_underlying.insert((chain_id, reserve.underlying_asset)) {
            let name = if is_mainnet_mkr(chain_id, reserve.underlying_asset) {
                "MKR".to_string()
            } else {
                market
                    .reader
                    .erc20_name(reserve.underlying_asset)
                    .await
                    .wrap_err_with(|| format!("Failed to read name of {} on {}", reserve.underlying_asset, market.name()))?
            };
            debug!("{}: underlying {} ({})", market.name(), reserve.symbol, reserve.underlying_asset);

            self.tokens.push(TokenInfo::new(
                chain_id,
                reserve.underlying_asset,
                reserve.symbol.clone(),
                name,
                reserve.decimals,
                TokenTag::Underlying,
            ));
            self.allow_list.insert(chain_id, reserve.underlying_asset);
        }

        let a_token_symbol = market
            .reader
            .erc20_symbol(reserve.a_token_address)
            .await
            .wrap_err_with(|| format!("Failed to read symbol of {} on {}", reserve.a_token_address, market.name()))?;

        self.tokens.push(TokenInfo::new(
            chain_id,
            reserve.a_token_address,
            a_token_symbol,
            format!("Aave interest bearing {}", reserve.symbol),
            reserve.decimals,
            market.version().a_token_tag(),
        ));
        for contract in reserve.derivative_addresses() {
            self.allow_list.insert(chain_id, contract);
        }
        Ok(())
    }

    pub fn finish(self) -> AggregatedTokens {
        AggregatedTokens { tokens: self.tokens, allow_list: self.allow_list }
    }
}

/// MKR returns bytes32 metadata on mainnet, so its name is pinned.
fn is_mainnet_mkr(chain_id: u64, token: Address) -> bool {
    chain_id == Network::Mainnet.chain_id() && token == MAINNET_MKR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainReader;
    use crate::chain::mock_reader::{MockChainReader, mock_reserve};
    use crate::markets::{MarketDefinition, ProtocolVersion};
    use std::sync::Arc;

    fn definition(name: &str, network: Network, version: ProtocolVersion) -> MarketDefinition {
        MarketDefinition::new(name, network, Address::repeat_byte(0xa0), Address::repeat_byte(0xa1), version)
    }

    #[tokio::test]
    async fn test_single_market() {
        let usdc = Address::repeat_byte(0x01);
        let reader = MockChainReader::new()
            .with_market("V3Polygon", vec![mock_reserve(usdc, "USDC", 6, 0x10)])
            .with_token(usdc, "USD Coin (PoS)", "USDC")
            .with_token(Address::repeat_byte(0x10), "Aave Polygon USDC", "aPolUSDC");
        let market = Market::new(definition("V3Polygon", Network::Polygon, ProtocolVersion::V3), Arc::new(reader));

        let result = TokenAggregator::aggregate(&[market]).await.unwrap();
        assert_eq!(
            result.tokens,
            vec![
                TokenInfo::new(137, usdc, "USDC".into(), "USD Coin (PoS)".into(), 6, TokenTag::Underlying),
                TokenInfo::new(
                    137,
                    Address::repeat_byte(0x10),
                    "aPolUSDC".into(),
                    "Aave interest bearing USDC".into(),
                    6,
                    TokenTag::AtokenV3
                ),
            ]
        );

        let contracts = result.allow_list.contracts(137).unwrap();
        assert_eq!(contracts.len(), 4);
        assert!(contracts.contains(&usdc));
        assert!(contracts.contains(&Address::repeat_byte(0x11)));
        assert!(contracts.contains(&Address::repeat_byte(0x12)));
    }

    #[tokio::test]
    async fn test_shared_underlying_is_listed_once() {
        let dai = Address::repeat_byte(0x01);
        let reader: Arc<dyn ChainReader> = Arc::new(
            MockChainReader::new()
                .with_market("V2Ethereum", vec![mock_reserve(dai, "DAI", 18, 0x10)])
                .with_market("V2EthereumAMM", vec![mock_reserve(dai, "DAI", 18, 0x20)])
                .with_token(dai, "Dai Stablecoin", "DAI")
                .with_token(Address::repeat_byte(0x10), "Aave interest bearing DAI", "aDAI")
                .with_token(Address::repeat_byte(0x20), "Aave AMM Market DAI", "aAmmDAI"),
        );
        let markets = vec![
            Market::new(definition("V2Ethereum", Network::Mainnet, ProtocolVersion::V2), Arc::clone(&reader)),
            Market::new(definition("V2EthereumAMM", Network::Mainnet, ProtocolVersion::V2), Arc::clone(&reader)),
        ];

        let result = TokenAggregator::aggregate(&markets).await.unwrap();
        let underlying: Vec<_> = result.tokens.iter().filter(|t| t.has_tag(TokenTag::Underlying)).collect();
        let a_tokens: Vec<_> = result.tokens.iter().filter(|t| t.has_tag(TokenTag::AtokenV2)).collect();

        assert_eq!(result.tokens.len(), 3);
        assert_eq!(underlying.len(), 1);
        assert_eq!(underlying[0].address, dai);
        assert_eq!(a_tokens.len(), 2);
        assert_ne!(a_tokens[0].address, a_tokens[1].address);
        assert_eq!(result.allow_list.contracts(1).unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_same_underlying_on_different_networks() {
        let weth = Address::repeat_byte(0x01);
        let reader: Arc<dyn ChainReader> = Arc::new(
            MockChainReader::new()
                .with_market("V3Optimism", vec![mock_reserve(weth, "WETH", 18, 0x10)])
                .with_market("V3Arbitrum", vec![mock_reserve(weth, "WETH", 18, 0x20)])
                .with_token(weth, "Wrapped Ether", "WETH")
                .with_token(Address::repeat_byte(0x10), "Aave Optimism WETH", "aOptWETH")
                .with_token(Address::repeat_byte(0x20), "Aave Arbitrum WETH", "aArbWETH"),
        );
        let markets = vec![
            Market::new(definition("V3Optimism", Network::Optimism, ProtocolVersion::V3), Arc::clone(&reader)),
            Market::new(definition("V3Arbitrum", Network::ArbitrumOne, ProtocolVersion::V3), Arc::clone(&reader)),
        ];

        let result = TokenAggregator::aggregate(&markets).await.unwrap();
        let underlying: Vec<_> =
            result.tokens.iter().filter(|t| t.has_tag(TokenTag::Underlying)).map(|t| t.chain_id).collect();
        assert_eq!(underlying, vec![10, 42161]);
        assert_eq!(result.allow_list.len(), 2);
    }

    #[tokio::test]
    async fn test_mainnet_mkr_name_is_pinned() {
        let reader = Arc::new(
            MockChainReader::new()
                .with_market("V2Ethereum", vec![mock_reserve(MAINNET_MKR, "MKR", 18, 0x10)])
                .with_token(MAINNET_MKR, "Maker", "MKR")
                .with_token(Address::repeat_byte(0x10), "Aave interest bearing MKR", "aMKR"),
        );
        let market = Market::new(definition("V2Ethereum", Network::Mainnet, ProtocolVersion::V2), reader.clone());

        let result = TokenAggregator::aggregate(&[market]).await.unwrap();
        assert_eq!(result.tokens[0].name, "MKR");
        assert!(reader.name_lookups().is_empty());
    }

    #[tokio::test]
    async fn test_mkr_address_on_other_network_reads_name() {
        let reader = Arc::new(
            MockChainReader::new()
                .with_market("V3Fantom", vec![mock_reserve(MAINNET_MKR, "MKR", 18, 0x10)])
                .with_token(MAINNET_MKR, "Maker on Fantom", "MKR")
                .with_token(Address::repeat_byte(0x10), "Aave Fantom MKR", "aFanMKR"),
        );
        let market = Market::new(definition("V3Fantom", Network::Fantom, ProtocolVersion::V3), reader.clone());

        let result = TokenAggregator::aggregate(&[market]).await.unwrap();
        assert_eq!(result.tokens[0].name, "Maker on Fantom");
        assert_eq!(reader.name_lookups(), vec![MAINNET_MKR]);
    }

    #[tokio::test]
    async fn test_failed_read_aborts() {
        let usdc = Address::repeat_byte(0x01);
        // aToken symbol is missing
        let reader = MockChainReader::new()
            .with_market("V2Avalanche", vec![mock_reserve(usdc, "USDC.e", 6, 0x10)])
            .with_token(usdc, "USD Coin", "USDC.e");
        let market = Market::new(definition("V2Avalanche", Network::Avalanche, ProtocolVersion::V2), Arc::new(reader));

        let err = TokenAggregator::aggregate(&[market]).await.unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read symbol"));
    }

    #[tokio::test]
    async fn test_empty_market_registers_network() {
        let reader = MockChainReader::new().with_market("V3Harmony", vec![]);
        let market = Market::new(definition("V3Harmony", Network::Harmony, ProtocolVersion::V3), Arc::new(reader));

        let result = TokenAggregator::aggregate(&[market]).await.unwrap();
        assert!(result.tokens.is_empty());
        assert_eq!(result.allow_list.contracts(1666600000).map(|c| c.len()), Some(0));
    }
}
