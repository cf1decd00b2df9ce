use crate::tokenlist::validation;
use crate::tokenlist::{TokenInfo, TokenListError, TokenTag};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

pub const LIST_NAME: &str = "Aave token list";
pub const LOGO_URI: &str = "ipfs://QmWzL3TSmkMhbqGBEwyeFyWVvLmEo3F44HBMFnmTUiTfp1";
pub const KEYWORDS: [&str; 3] = ["audited", "verified", "aave"];
pub const VERSION_MAJOR: u64 = 2;
pub const VERSION_MINOR: u64 = 0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Version following `previous`; a list that was never published counts as patch 0.
    pub fn next(previous: Option<&Version>) -> Self {
        Self { major: VERSION_MAJOR, minor: VERSION_MINOR, patch: previous.map_or(0, |version| version.patch) + 1 }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDefinition {
    pub name: String,
    pub description: String,
}

impl TagDefinition {
    pub fn for_tag(tag: TokenTag) -> Self {
        let (name, description) = match tag {
            TokenTag::Underlying => ("underlyingAsset", "Tokens that are used as underlying assets in the Aave protocol"),
            TokenTag::AtokenV2 => ("aToken V2", "Tokens that earn interest on the Aave Protocol V2"),
            TokenTag::AtokenV3 => ("aToken V3", "Tokens that earn interest on the Aave Protocol V3"),
        };
        Self { name: name.to_string(), description: description.to_string() }
    }
}

/// The published document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenList {
    pub name: String,
    #[serde(rename = "logoURI")]
    pub logo_uri: String,
    pub keywords: Vec<String>,
    pub tags: BTreeMap<String, TagDefinition>,
    pub timestamp: String,
    pub version: Version,
    pub tokens: Vec<TokenInfo>,
}

impl TokenList {
    pub fn new(tokens: Vec<TokenInfo>, version: Version, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: LIST_NAME.to_string(),
            logo_uri: LOGO_URI.to_string(),
            keywords: KEYWORDS.iter().map(|k| k.to_string()).collect(),
            tags: TokenTag::iter().map(|tag| (tag.to_string(), TagDefinition::for_tag(tag))).collect(),
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            version,
            tokens,
        }
    }

    pub fn validate(&self) -> Result<(), TokenListError> {
        let document = serde_json::to_value(self)?;
        validation::validate(&document).map_err(TokenListError::Validation)
    }

    /// Pretty-printed JSON, two space indent and a trailing newline
    pub fn to_pretty_json(&self) -> Result<String, TokenListError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Replace the file at `path` through a temporary sibling so readers never see a partial list.
    pub async fn write_atomic(&self, path: &Path) -> Result<(), TokenListError> {
        let json = self.to_pretty_json()?;
        let tmp_path = tmp_path(path);

        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|source| TokenListError::Write { path: tmp_path.clone(), source })?;
        if let Err(source) = tokio::fs::rename(&tmp_path, path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(TokenListError::Write { path: path.to_path_buf(), source });
        }
        Ok(())
    }
}

/// The parts of a previously written list that the next run depends on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PublishedTokenList {
    #[serde(default)]
    pub version: Option<Version>,
    #[serde(default)]
    pub tokens: Vec<TokenInfo>,
}

impl PublishedTokenList {
    /// Load the list at `path`; a missing file reads as an empty, never published list.
    pub async fn load(path: &Path) -> Result<Self, TokenListError> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(TokenListError::Read { path: path.to_path_buf(), source }),
        };

        serde_json::from_str(&contents).map_err(|source| TokenListError::Malformed { path: path.to_path_buf(), source })
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}
