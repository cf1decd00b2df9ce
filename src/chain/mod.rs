/// Chain Layer
///
/// Read-only access to the networks hosting the lending markets:
/// - `sol!` ABI bindings for the pool, data provider and ERC20 contracts
/// - the `ChainReader` boundary used by the aggregator
/// - an `eth_call` JSON-RPC implementation over HTTP

pub mod abi;
pub mod error;
pub mod reader;
pub mod rpc;

#[cfg(test)]
pub mod mock_reader;

pub use error::ChainError;
pub use reader::{ChainReader, Reserve};
pub use rpc::RpcChainReader;
