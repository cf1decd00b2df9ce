use crate::markets::NetworkTable;
use crate::tokenlist::AllowList;
use alloy_primitives::Address;
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContractAllowList {
    pub blockchain_id: String,
    pub contracts: Vec<Address>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GatewaySettings {
    pub contracts_allowlist: Vec<ContractAllowList>,
}

/// Body of the portal `add-contract` settings call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AddContractRequest {
    pub id: String,
    pub gateway_settings: GatewaySettings,
}

impl AddContractRequest {
    /// Translate chain ids to relay ids; chains the relay network does not serve are left out.
    pub fn new(gateway_id: &str, allow_list: &AllowList, networks: &NetworkTable) -> Self {
        let contracts_allowlist = allow_list
            .iter()
            .filter_map(|(chain_id, contracts)| match networks.relay_id(chain_id) {
                Some(relay_id) => Some(ContractAllowList {
                    blockchain_id: relay_id.to_string(),
                    contracts: contracts.iter().copied().collect(),
                }),
                None => {
                    debug!("No relay id for chain {}, skipping {} contracts", chain_id, contracts.len());
                    None
                }
            })
            .collect();

        Self { id: gateway_id.to_string(), gateway_settings: GatewaySettings { contracts_allowlist } }
    }
}
