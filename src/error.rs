// src/error.rs
//! Error taxonomy for the analysis pipeline.
//!
//! Orchestrators recover from `SourceUnavailable` locally (log + next
//! source); everything else propagates to the caller. Zero news articles
//! for an asset and per-article scorer hiccups are deliberately *not*
//! errors anywhere in this crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// One provider failed (network, status, malformed payload, unknown
    /// name). Recovered by the fallback cascade; logged at warn level.
    /// The provider name is display-only; naming the field `source` would
    /// make thiserror treat it as the error's cause.
    #[error("source `{name}` unavailable: {reason}")]
    SourceUnavailable { name: String, reason: String },

    /// Every configured price source failed. Fatal for the run.
    #[error("all configured price sources failed")]
    AllSourcesExhausted,

    /// The result assembler was invoked without any price data.
    #[error("no price data collected for requested assets: {assets:?}")]
    MissingData { assets: Vec<String> },

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request failed before a payload could be inspected.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provider payload did not match the expected shape.
    #[error("payload parse error: {0}")]
    Parse(String),
}

impl AnalyzerError {
    /// Fold an adapter-level cause into a recoverable per-source failure.
    pub fn source_unavailable(name: &str, err: impl std::fmt::Display) -> Self {
        AnalyzerError::SourceUnavailable {
            name: name.to_string(),
            reason: err.to_string(),
        }
    }
}

pub type Result<T, E = AnalyzerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_name_is_display_only_not_a_cause() {
        let err = AnalyzerError::source_unavailable("coincap", "timed out");
        assert_eq!(err.to_string(), "source `coincap` unavailable: timed out");
        assert!(std::error::Error::source(&err).is_none());
    }
}
