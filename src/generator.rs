use crate::allowlist::AllowListNotifier;
use crate::constants::DEFAULT_OUTPUT_PATH;
use crate::markets::MarketRegistry;
use crate::tokenlist::{PublishOutcome, Publisher, TokenAggregator};
use eyre::{Result, WrapErr};
use std::path::PathBuf;
use tracing::info;

/// One generation run: aggregate every market, publish on change, then update the allow-list.
#[derive(Debug)]
pub struct TokenListGenerator {
    registry: MarketRegistry,
    publisher: Publisher,
    notifier: Option<AllowListNotifier>,
}

impl TokenListGenerator {
    pub fn new(registry: MarketRegistry, publisher: Publisher, notifier: Option<AllowListNotifier>) -> Self {
        Self { registry, publisher, notifier }
    }

    pub async fn run(&self) -> Result<PublishOutcome> {
        info!("Aggregating tokens from {} markets", self.registry.len());
        let aggregated = TokenAggregator::aggregate(self.registry.markets()).await?;
        info!("Aggregated {} tokens", aggregated.tokens.len());

        let outcome = self
            .publisher
            .publish(aggregated.tokens)
            .await
            .wrap_err_with(|| format!("Failed to publish {}", self.publisher.output_path().display()))?;

        if let (PublishOutcome::Published { .. }, Some(notifier)) = (&outcome, &self.notifier) {
            notifier.notify(&aggregated.allow_list).await.wrap_err("Failed to update the allow-list")?;
        }

        Ok(outcome)
    }

    pub fn registry(&self) -> &MarketRegistry {
        &self.registry
    }

    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }
}

pub struct TokenListGeneratorBuilder {
    registry: MarketRegistry,
    output_path: Option<PathBuf>,
    notifier: Option<AllowListNotifier>,
}

impl TokenListGeneratorBuilder {
    pub fn new() -> Self {
        Self { registry: MarketRegistry::default(), output_path: None, notifier: None }
    }

    pub fn with_registry(mut self, registry: MarketRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    pub fn with_notifier(mut self, notifier: Option<AllowListNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn build(self) -> TokenListGenerator {
        let output_path = self.output_path.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
        TokenListGenerator::new(self.registry, Publisher::new(output_path), self.notifier)
    }
}

impl Default for TokenListGeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
