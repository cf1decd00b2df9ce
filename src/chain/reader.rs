use crate::chain::ChainError;
use crate::markets::MarketDefinition;
use alloy_primitives::Address;
use async_trait::async_trait;

/// One supported asset of a market, as read from chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reserve {
    pub underlying_asset: Address,
    pub symbol: String,
    pub decimals: u8,
    pub a_token_address: Address,
    pub stable_debt_token_address: Address,
    pub variable_debt_token_address: Address,
}

impl Reserve {
    /// Every contract address owned by this reserve except the underlying asset.
    pub fn derivative_addresses(&self) -> [Address; 3] {
        [self.a_token_address, self.stable_debt_token_address, self.variable_debt_token_address]
    }
}

/// Read-only access to a single network.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Reserves of `market`, in the order the pool reports them.
    async fn reserves(&self, market: &MarketDefinition) -> Result<Vec<Reserve>, ChainError>;

    async fn erc20_name(&self, token: Address) -> Result<String, ChainError>;

    async fn erc20_symbol(&self, token: Address) -> Result<String, ChainError>;
}
