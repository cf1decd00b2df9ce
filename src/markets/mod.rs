/// Market Registry
///
/// Immutable tables describing where the lending markets live:
/// - supported networks with their RPC endpoints and relay ids
/// - market descriptors (data provider, addresses provider, protocol version)
/// - the registry binding each market to its network's reader

pub mod market;
pub mod network;
pub mod registry;

pub use market::{Market, MarketDefinition, ProtocolVersion};
pub use network::{Network, NetworkTable};
pub use registry::{MarketRegistry, default_markets};
