use crate::allowlist::NotifierSettings;
use crate::constants::{DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_PATH, POKT_GATEWAY_ID, POKT_SETTINGS_ENDPOINT};
use crate::markets::{MarketDefinition, Network, NetworkTable, default_markets};
use crate::utils::config_loader::{ConfigLoader, LoadConfigError, OptionalConfigLoader, load_from_file, load_optional_from_file};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Root of `tokenlist.toml`. Every section is optional.
#[derive(Clone, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub generator: GeneratorSection,
    /// Network name -> RPC endpoint overrides
    #[serde(default)]
    pub rpc: BTreeMap<String, String>,
    #[serde(default)]
    pub allowlist: AllowListSection,
}

#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct GeneratorSection {
    pub output_path: String,
    pub include_testnets: bool,
    pub http_timeout_secs: u64,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self { output_path: DEFAULT_OUTPUT_PATH.to_string(), include_testnets: true, http_timeout_secs: 30 }
    }
}

#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct AllowListSection {
    pub enabled: bool,
    pub endpoint: String,
    pub gateway_id: String,
    pub token: Option<String>,
}

impl Default for AllowListSection {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: POKT_SETTINGS_ENDPOINT.to_string(),
            gateway_id: POKT_GATEWAY_ID.to_string(),
            token: None,
        }
    }
}

impl GeneratorConfig {
    /// Load `config_path`, which must exist, or the optional default `tokenlist.toml`.
    pub async fn load(config_path: Option<String>) -> Result<Self, LoadConfigError> {
        if let Some(config_path) = config_path {
            return Self::load_section_from_file(config_path).await;
        }

        let config = Self::load_optional_section_from_file(DEFAULT_CONFIG_PATH.to_string()).await?;
        Ok(config.unwrap_or_else(|| {
            info!("No {DEFAULT_CONFIG_PATH}, using built-in defaults");
            Self::default()
        }))
    }

    /// Apply environment overrides (`TOKENLIST_OUTPUT`, `POKT_TOKEN`)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(output_path) = std::env::var("TOKENLIST_OUTPUT") {
            self.generator.output_path = output_path;
        }

        // an unresolved `${VAR}` placeholder counts as no token
        let configured = self.allowlist.token.take().filter(|token| !token.contains("${"));
        self.allowlist.token = configured.or_else(|| std::env::var("POKT_TOKEN").ok());
        self
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.generator.output_path)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.generator.http_timeout_secs)
    }

    /// Default network table with the `[rpc]` overrides applied
    pub fn network_table(&self) -> Result<NetworkTable, LoadConfigError> {
        self.rpc.iter().try_fold(NetworkTable::default(), |table, (name, rpc_url)| {
            let network = Network::from_str(name)
                .map_err(|_| LoadConfigError::ConfigError(format!("Unknown network `{name}` in [rpc]")))?;
            Ok(table.with_rpc_url(network.chain_id(), rpc_url))
        })
    }

    pub fn market_definitions(&self) -> Vec<MarketDefinition> {
        default_markets().into_iter().filter(|market| self.generator.include_testnets || !market.testnet).collect()
    }

    /// `None` when the allow-list update is disabled
    pub fn notifier_settings(&self) -> Option<NotifierSettings> {
        self.allowlist.enabled.then(|| NotifierSettings {
            endpoint: self.allowlist.endpoint.clone(),
            gateway_id: self.allowlist.gateway_id.clone(),
            token: self.allowlist.token.clone(),
        })
    }
}

#[async_trait]
impl ConfigLoader for GeneratorConfig {
    type SectionType = GeneratorConfig;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        load_from_file(file_name).await
    }
}

#[async_trait]
impl OptionalConfigLoader for GeneratorConfig {
    type SectionType = GeneratorConfig;

    async fn load_optional_section_from_file(file_name: String) -> Result<Option<Self::SectionType>, LoadConfigError> {
        load_optional_from_file(file_name).await
    }
}
