use crate::tokenlist::validation::ValidationIssue;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TokenListError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a token list: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("token list failed validation with {} errors:\n{}", .0.len(), format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().map(|issue| format!("  {issue}")).collect::<Vec<_>>().join("\n")
}
