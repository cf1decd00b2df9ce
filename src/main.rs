use aave_tokenlist::constants::DEFAULT_CONFIG_PATH;
use aave_tokenlist::{AllowListNotifier, GeneratorConfig, MarketRegistry, PublishOutcome, TokenListGeneratorBuilder};
use eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run().await?;
    info!("finished");
    Ok(())
}

async fn run() -> Result<()> {
    let config_path = std::env::var("TOKENLIST_CONFIG").ok();
    let config = GeneratorConfig::load(config_path.clone())
        .await
        .wrap_err_with(|| format!("Failed to load {}", config_path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH)))?
        .with_env_overrides();

    let networks = config.network_table()?;
    let registry = MarketRegistry::connect(config.market_definitions(), &networks, config.http_timeout())?;
    let notifier = config
        .notifier_settings()
        .map(|settings| AllowListNotifier::new(settings, networks.clone(), config.http_timeout()))
        .transpose()?;

    let generator = TokenListGeneratorBuilder::new()
        .with_registry(registry)
        .with_output_path(config.output_path())
        .with_notifier(notifier)
        .build();

    match generator.run().await? {
        PublishOutcome::UpToDate => info!("tokenlist already up to date"),
        PublishOutcome::Published { version, token_count } => {
            info!("Published token list v{version} with {token_count} tokens")
        }
    }
    Ok(())
}

