// src/config.rs
//! TOML configuration: tracked assets, provider cascades, endpoints,
//! news filtering knobs and sentiment scorer selection.
//!
//! The whole config is an explicit value passed into each component at
//! construction; there is no process-wide mutable state. API keys are
//! taken from the environment (`NEWSAPI_API_KEY`, `GUARDIAN_API_KEY`),
//! overriding anything present in the file.

use crate::error::AnalyzerError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const ENV_CONFIG_PATH: &str = "ANALYZER_CONFIG_PATH";

const ENV_NEWSAPI_KEY: &str = "NEWSAPI_API_KEY";
const ENV_GUARDIAN_KEY: &str = "GUARDIAN_API_KEY";

/// One tracked asset. Immutable, loaded once.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AssetConfig {
    pub symbol: String,
    pub name: String,
    pub ticker: String,
    #[serde(default)]
    pub search_terms: Vec<String>,
}

/// Cascade + pacing settings shared by the price and news sides.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub primary: String,
    #[serde(default)]
    pub fallbacks: Vec<String>,
    /// Seconds to sleep before each request to this provider family.
    #[serde(default)]
    pub rate_limit_delay: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl ApiConfig {
    /// Primary first, then fallbacks, in priority order.
    pub fn cascade(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.fallbacks.iter().map(|s| s.as_str()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_max_articles")]
    pub max_articles_per_asset: usize,
    #[serde(default = "default_min_article_length")]
    pub min_article_length: usize,
    #[serde(default = "default_recent_window_hours")]
    pub recent_window_hours: i64,
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default)]
    pub quality_sources: Vec<String>,
    #[serde(default)]
    pub rss_feeds: Vec<String>,
}

fn default_max_articles() -> usize {
    10
}
fn default_min_article_length() -> usize {
    100
}
fn default_recent_window_hours() -> i64 {
    48
}
fn default_similarity_threshold() -> f64 {
    0.8
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentimentConfig {
    pub scorers: Vec<String>,
    #[serde(default = "default_neutral_score")]
    pub neutral_default_score: f64,
}

fn default_neutral_score() -> f64 {
    5.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub assets: Vec<AssetConfig>,
    pub price_api: ApiConfig,
    pub news_api: ApiConfig,
    #[serde(default)]
    pub endpoints: HashMap<String, EndpointConfig>,
    pub news: NewsConfig,
    pub sentiment: SentimentConfig,
}

impl Config {
    /// Load from `$ANALYZER_CONFIG_PATH`, falling back to `config.toml`.
    pub fn load_default() -> Result<Self, AnalyzerError> {
        let path = std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::from_path(Path::new(&path))
    }

    pub fn from_path(path: &Path) -> Result<Self, AnalyzerError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AnalyzerError::Config(format!("reading config at {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, AnalyzerError> {
        let mut cfg: Config =
            toml::from_str(s).map_err(|e| AnalyzerError::Config(e.to_string()))?;
        cfg.apply_env_keys();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Env API keys win over file-provided ones.
    fn apply_env_keys(&mut self) {
        for (endpoint, var) in [("newsapi", ENV_NEWSAPI_KEY), ("guardian", ENV_GUARDIAN_KEY)] {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    self.endpoints
                        .entry(endpoint.to_string())
                        .or_default()
                        .api_key = Some(key);
                }
            }
        }
    }

    fn validate(&self) -> Result<(), AnalyzerError> {
        if self.assets.is_empty() {
            return Err(AnalyzerError::Config("no assets configured".into()));
        }
        if self.price_api.primary.trim().is_empty() {
            return Err(AnalyzerError::Config("no primary price source".into()));
        }
        if self.news_api.primary.trim().is_empty() {
            return Err(AnalyzerError::Config("no primary news source".into()));
        }
        if self.sentiment.scorers.is_empty() {
            return Err(AnalyzerError::Config("no sentiment scorers configured".into()));
        }
        for name in &self.sentiment.scorers {
            if crate::sentiment::ScorerKind::from_name(name).is_none() {
                return Err(AnalyzerError::Config(format!("unknown sentiment scorer `{name}`")));
            }
        }
        let t = self.news.similarity_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(AnalyzerError::Config(format!(
                "similarity_threshold {t} outside (0, 1]"
            )));
        }
        Ok(())
    }

    pub fn asset_symbols(&self) -> Vec<String> {
        self.assets.iter().map(|a| a.symbol.clone()).collect()
    }

    pub fn asset_by_symbol(&self, symbol: &str) -> Option<&AssetConfig> {
        self.assets
            .iter()
            .find(|a| a.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn endpoint(&self, name: &str) -> Option<&EndpointConfig> {
        self.endpoints.get(name)
    }

    pub fn search_terms(&self, symbol: &str) -> &[String] {
        self.asset_by_symbol(symbol)
            .map(|a| a.search_terms.as_slice())
            .unwrap_or(&[])
    }
}
