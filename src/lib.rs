//! Crypto Market Sentiment Analyzer — library crate.
//!
//! Pipeline: collect prices (fallback cascade) and news (all sources),
//! deduplicate, rank by relevance, score sentiment with the configured
//! lexicon scorers, and assemble a serialization-ready report.
//!
//! See `README.md` for quickstart and configuration.

pub mod analyzer;
pub mod collect;
pub mod config;
pub mod dedup;
pub mod error;
pub mod relevance;
pub mod report;
pub mod sentiment;
pub mod types;

pub use analyzer::Analyzer;
pub use config::Config;
pub use error::{AnalyzerError, Result};
pub use report::{AnalysisReport, ReportStats};
pub use types::{Article, PriceSnapshot, SentimentLabel, SentimentResult};
