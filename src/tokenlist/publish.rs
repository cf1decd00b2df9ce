use crate::tokenlist::{PublishedTokenList, TokenInfo, TokenList, TokenListError, Version};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The aggregated tokens equal the published ones; nothing was written
    UpToDate,
    Published { version: Version, token_count: usize },
}

/// Compares freshly aggregated tokens with the published list and rewrites it on change.
#[derive(Clone, Debug)]
pub struct Publisher {
    output_path: PathBuf,
}

impl Publisher {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self { output_path: output_path.into() }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub async fn publish(&self, tokens: Vec<TokenInfo>) -> Result<PublishOutcome, TokenListError> {
        self.publish_at(tokens, Utc::now()).await
    }

    pub async fn publish_at(&self, tokens: Vec<TokenInfo>, timestamp: DateTime<Utc>) -> Result<PublishOutcome, TokenListError> {
        let previous = PublishedTokenList::load(&self.output_path).await?;

        // order sensitive, every field compared
        if previous.tokens == tokens {
            info!("{} already up to date", self.output_path.display());
            return Ok(PublishOutcome::UpToDate);
        }

        let version = Version::next(previous.version.as_ref());
        let token_count = tokens.len();
        let list = TokenList::new(tokens, version, timestamp);
        list.validate()?;
        list.write_atomic(&self.output_path).await?;

        info!("Published {} v{} with {} tokens", self.output_path.display(), version, token_count);
        Ok(PublishOutcome::Published { version, token_count })
    }
}
