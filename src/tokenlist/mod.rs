/// Token List Layer
///
/// This layer is responsible for:
/// - Aggregating market reserves into deduplicated token entries
/// - The versioned token list document and its schema rules
/// - Diffing against the published list and writing it on change

pub mod aggregator;
pub mod document;
pub mod error;
pub mod publish;
pub mod token;
pub mod validation;


pub use aggregator::{AggregatedTokens, AllowList, TokenAggregator};
pub use document::{PublishedTokenList, TagDefinition, TokenList, Version};
pub use error::TokenListError;
pub use publish::{PublishOutcome, Publisher};
pub use token::{TokenInfo, TokenTag};
pub use validation::{ValidationIssue, validate};
