use crate::allowlist::AddContractRequest;
use crate::markets::NetworkTable;
use crate::tokenlist::AllowList;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("allow-list endpoint answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotifierSettings {
    pub endpoint: String,
    pub gateway_id: String,
    /// Bearer credential; sent empty when missing
    pub token: Option<String>,
}

/// Pushes discovered contracts to the relay portal's gateway allow-list.
#[derive(Clone, Debug)]
pub struct AllowListNotifier {
    client: Client,
    settings: NotifierSettings,
    networks: NetworkTable,
}

impl AllowListNotifier {
    pub fn new(settings: NotifierSettings, networks: NetworkTable, timeout: Duration) -> Result<Self, NotifierError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, settings, networks })
    }

    pub async fn notify(&self, allow_list: &AllowList) -> Result<(), NotifierError> {
        let request = AddContractRequest::new(&self.settings.gateway_id, allow_list, &self.networks);
        let token = self.settings.token.as_deref().unwrap_or_else(|| {
            warn!("No allow-list token configured, sending unauthenticated request");
            ""
        });

        let response = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifierError::Status { status: status.as_u16(), body });
        }

        info!(
            "Allow-list updated for {} relay chains",
            request.gateway_settings.contracts_allowlist.len()
        );
        Ok(())
    }
}
