/// Allow-List Notifier
///
/// Forwards the contracts discovered during aggregation to the relay portal,
/// keyed by the portal's own blockchain ids.

pub mod notifier;
pub mod payload;

pub use notifier::{AllowListNotifier, NotifierError, NotifierSettings};
pub use payload::{AddContractRequest, ContractAllowList, GatewaySettings};
