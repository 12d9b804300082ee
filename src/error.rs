//! Error handling for country indicator collection
//!
//! Defines typed errors for the library layers while the binary keeps
//! a unified anyhow-based Result for context chaining.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while talking to the indicator API
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("request failed for {country}, {indicator}: {source}")]
    Request {
        country: String,
        indicator: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned status {status} for {country}, {indicator}")]
    Status {
        country: String,
        indicator: String,
        status: u16,
    },

    #[error("invalid API response for {country}, {indicator}: {message}")]
    InvalidResponse {
        country: String,
        indicator: String,
        message: String,
    },
}

/// Errors raised while joining per-indicator datasets
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MergeError {
    #[error("One or both datasets are empty")]
    EmptyDataset,

    #[error("at least two datasets are required to merge, got {0}")]
    NotEnoughDatasets(usize),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for command-level operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = CollectError::Status {
            country: "USA".to_string(),
            indicator: "SP.POP.TOTL".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "API returned status 503 for USA, SP.POP.TOTL"
        );
    }

    #[test]
    fn test_merge_error_message_matches_cli_output() {
        assert_eq!(
            MergeError::EmptyDataset.to_string(),
            "One or both datasets are empty"
        );
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: Result<()> = Err(anyhow::Error::new(ConfigError::Validation(
            "no countries configured".to_string(),
        )))
        .context("failed to load config");
        let err = result.expect_err("expected error");
        assert!(err.to_string().contains("failed to load config"));
        assert!(format!("{:?}", err).contains("no countries configured"));
    }
}
