// Pipeline layers, leaves first
pub mod chain;      // Chain Layer: eth_call reads of reserves and ERC20 metadata
pub mod markets;    // Registry Layer: networks, market descriptors, per-network readers
pub mod tokenlist;  // Token List Layer: aggregation, document, validation, publishing
pub mod allowlist;  // Notifier Layer: relay portal allow-list updates

pub mod config;
pub mod constants;
pub mod generator;

// Common utilities
pub mod utils;

// Re-export key components from each layer
pub use chain::{ChainError, ChainReader, Reserve, RpcChainReader};
pub use markets::{Market, MarketDefinition, MarketRegistry, Network, NetworkTable, ProtocolVersion, default_markets};
pub use tokenlist::{
    AggregatedTokens, AllowList, PublishOutcome, Publisher, TokenAggregator, TokenInfo, TokenList, TokenListError,
    TokenTag, Version,
};
pub use allowlist::{AllowListNotifier, NotifierError, NotifierSettings};
pub use config::GeneratorConfig;
pub use generator::{TokenListGenerator, TokenListGeneratorBuilder};
