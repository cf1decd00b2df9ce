use alloy_primitives::{Address, address};

/// Maker token on Ethereum mainnet
pub const MAINNET_MKR: Address = address!("0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2");

pub const DEFAULT_OUTPUT_PATH: &str = "tokenlist.json";

pub const DEFAULT_CONFIG_PATH: &str = "tokenlist.toml";

pub const POKT_SETTINGS_ENDPOINT: &str = "https://settings-api.portal.pokt.network/v1/settings/add-contract";

pub const POKT_GATEWAY_ID: &str = "62b3314e123e6f00397f19ca";
