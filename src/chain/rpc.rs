use crate::chain::abi::{
    IERC20Bytes32Metadata, IERC20Metadata, ILendingPool, ILendingPoolAddressesProvider, IPool, IPoolAddressesProvider,
    IUiPoolDataProvider,
};
use crate::chain::{ChainError, ChainReader, Reserve};
use crate::markets::{MarketDefinition, ProtocolVersion};
use alloy_primitives::{Address, Bytes, FixedBytes, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// `ChainReader` backed by plain `eth_call` JSON-RPC requests over HTTP.
#[derive(Debug, Clone)]
pub struct RpcChainReader {
    http_client: reqwest::Client,
    rpc_url: String,
}

impl RpcChainReader {
    pub fn new(rpc_url: impl Into<String>, timeout: Duration) -> Result<Self, ChainError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http_client, rpc_url: rpc_url.into() })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Call a view function and decode its return value
    async fn call<C: SolCall>(&self, to: Address, call: &C) -> Result<C::Return, ChainError> {
        let response = self.call_contract(to, call.abi_encode().into()).await?;
        C::abi_decode_returns(&response).map_err(|source| ChainError::Decode { call: C::SIGNATURE, address: to, source })
    }

    /// Make a contract call via RPC against the latest block
    async fn call_contract(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
        let request_body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_call",
            "params": [
                {
                    "to": format!("{:#x}", to),
                    "data": format!("0x{}", hex::encode(&data))
                },
                "latest"
            ],
            "id": 1
        });

        let response = self
            .http_client
            .post(&self.rpc_url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let response_json: Value = response.json().await?;

        if let Some(error) = response_json.get("error") {
            return Err(ChainError::Rpc { endpoint: self.rpc_url.clone(), message: error.to_string() });
        }

        let result = response_json
            .get("result")
            .and_then(|r| r.as_str())
            .ok_or_else(|| ChainError::MissingResult(self.rpc_url.clone()))?;

        let bytes = hex::decode(result.trim_start_matches("0x"))?;
        Ok(bytes.into())
    }

    async fn pool_address(&self, market: &MarketDefinition) -> Result<Address, ChainError> {
        let provider = market.lending_pool_address_provider;
        match market.version {
            ProtocolVersion::V2 => self.call(provider, &ILendingPoolAddressesProvider::getLendingPoolCall {}).await,
            ProtocolVersion::V3 => self.call(provider, &IPoolAddressesProvider::getPoolCall {}).await,
        }
    }

    /// Returns (configuration, aToken, stable debt token, variable debt token)
    async fn reserve_data(
        &self,
        version: ProtocolVersion,
        pool: Address,
        asset: Address,
    ) -> Result<(U256, Address, Address, Address), ChainError> {
        Ok(match version {
            ProtocolVersion::V2 => {
                let data = self.call(pool, &ILendingPool::getReserveDataCall { asset }).await?;
                (data.configuration, data.aTokenAddress, data.stableDebtTokenAddress, data.variableDebtTokenAddress)
            }
            ProtocolVersion::V3 => {
                let data = self.call(pool, &IPool::getReserveDataCall { asset }).await?;
                (data.configuration, data.aTokenAddress, data.stableDebtTokenAddress, data.variableDebtTokenAddress)
            }
        })
    }
}

#[async_trait]
impl ChainReader for RpcChainReader {
    async fn reserves(&self, market: &MarketDefinition) -> Result<Vec<Reserve>, ChainError> {
        let assets = self
            .call(
                market.ui_pool_data_provider,
                &IUiPoolDataProvider::getReservesListCall { provider: market.lending_pool_address_provider },
            )
            .await?;
        let pool = self.pool_address(market).await?;
        debug!("{}: pool {} lists {} reserves", market.name, pool, assets.len());

        let mut reserves = Vec::with_capacity(assets.len());
        for asset in assets {
            let (configuration, a_token, stable_debt, variable_debt) = self.reserve_data(market.version, pool, asset).await?;
            let symbol = self.erc20_symbol(asset).await?;

            reserves.push(Reserve {
                underlying_asset: asset,
                symbol,
                decimals: decimals_from_configuration(configuration),
                a_token_address: a_token,
                stable_debt_token_address: stable_debt,
                variable_debt_token_address: variable_debt,
            });
        }

        Ok(reserves)
    }

    async fn erc20_name(&self, token: Address) -> Result<String, ChainError> {
        let response = self.call_contract(token, IERC20Metadata::nameCall {}.abi_encode().into()).await?;
        decode_metadata::<IERC20Metadata::nameCall, IERC20Bytes32Metadata::nameCall>(token, &response)
    }

    async fn erc20_symbol(&self, token: Address) -> Result<String, ChainError> {
        let response = self.call_contract(token, IERC20Metadata::symbolCall {}.abi_encode().into()).await?;
        decode_metadata::<IERC20Metadata::symbolCall, IERC20Bytes32Metadata::symbolCall>(token, &response)
    }
}

/// Reserve decimals live in bits 48..55 of the configuration bitmap (v2 and v3).
pub fn decimals_from_configuration(configuration: U256) -> u8 {
    ((configuration.as_limbs()[0] >> 48) & 0xff) as u8
}

/// Decode a `string` return value, falling back to the legacy `bytes32` layout.
fn decode_metadata<S, B>(token: Address, response: &[u8]) -> Result<String, ChainError>
where
    S: SolCall<Return = String>,
    B: SolCall<Return = FixedBytes<32>>,
{
    match S::abi_decode_returns(response) {
        Ok(value) => Ok(value),
        Err(source) => match B::abi_decode_returns(response) {
            Ok(word) => Ok(bytes32_to_string(&word)),
            Err(_) => Err(ChainError::Decode { call: S::SIGNATURE, address: token, source }),
        },
    }
}

fn bytes32_to_string(word: &FixedBytes<32>) -> String {
    let end = word.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&word[..end]).into_owned()
}
