use crate::chain::{ChainError, ChainReader, Reserve};
use crate::markets::MarketDefinition;
use alloy_primitives::Address;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory `ChainReader` for tests. Unknown markets or tokens fail like a reverted call.
#[derive(Default)]
pub struct MockChainReader {
    pub reserves: HashMap<String, Vec<Reserve>>,
    pub names: HashMap<Address, String>,
    pub symbols: HashMap<Address, String>,
    pub name_lookups: Mutex<Vec<Address>>,
}

impl MockChainReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_market(mut self, market: &str, reserves: Vec<Reserve>) -> Self {
        self.reserves.insert(market.to_string(), reserves);
        self
    }

    pub fn with_token(mut self, token: Address, name: &str, symbol: &str) -> Self {
        self.names.insert(token, name.to_string());
        self.symbols.insert(token, symbol.to_string());
        self
    }

    pub fn name_lookups(&self) -> Vec<Address> {
        self.name_lookups.lock().unwrap().clone()
    }

    fn reverted(token: Address) -> ChainError {
        ChainError::Rpc { endpoint: "mock".to_string(), message: format!("execution reverted for {token}") }
    }
}

#[async_trait]
impl ChainReader for MockChainReader {
    async fn reserves(&self, market: &MarketDefinition) -> Result<Vec<Reserve>, ChainError> {
        self.reserves.get(&market.name).cloned().ok_or_else(|| ChainError::Rpc {
            endpoint: "mock".to_string(),
            message: format!("unknown market {}", market.name),
        })
    }

    async fn erc20_name(&self, token: Address) -> Result<String, ChainError> {
        self.name_lookups.lock().unwrap().push(token);
        self.names.get(&token).cloned().ok_or_else(|| Self::reverted(token))
    }

    async fn erc20_symbol(&self, token: Address) -> Result<String, ChainError> {
        self.symbols.get(&token).cloned().ok_or_else(|| Self::reverted(token))
    }
}

/// Reserve whose derivative addresses are derived from `seed` so tests stay readable.
pub fn mock_reserve(underlying: Address, symbol: &str, decimals: u8, seed: u8) -> Reserve {
    Reserve {
        underlying_asset: underlying,
        symbol: symbol.to_string(),
        decimals,
        a_token_address: Address::repeat_byte(seed),
        stable_debt_token_address: Address::repeat_byte(seed.wrapping_add(1)),
        variable_debt_token_address: Address::repeat_byte(seed.wrapping_add(2)),
    }
}
