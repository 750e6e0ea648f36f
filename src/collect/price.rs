// src/collect/price.rs
//! Price-side fallback orchestrator: first-success-wins over an ordered
//! cascade. Any per-source failure (network, status, malformed payload,
//! unknown provider name) is logged at warn level and the next source is
//! tried; only a fully exhausted cascade is an error.

use crate::collect::providers::{coincap, coingecko, cryptocompare};
use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::types::PriceSnapshot;
use std::collections::HashMap;
use tracing::{info, warn};

/// Closed set of price providers, dispatched by configured name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    CoinGecko,
    CoinCap,
    CryptoCompare,
}

impl PriceSource {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            coingecko::NAME => Some(PriceSource::CoinGecko),
            coincap::NAME => Some(PriceSource::CoinCap),
            cryptocompare::NAME => Some(PriceSource::CryptoCompare),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PriceSource::CoinGecko => coingecko::NAME,
            PriceSource::CoinCap => coincap::NAME,
            PriceSource::CryptoCompare => cryptocompare::NAME,
        }
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        cfg: &Config,
        symbols: &[String],
    ) -> Result<HashMap<String, PriceSnapshot>> {
        match self {
            PriceSource::CoinGecko => coingecko::fetch(client, cfg, symbols).await,
            PriceSource::CoinCap => coincap::fetch(client, cfg, symbols).await,
            PriceSource::CryptoCompare => cryptocompare::fetch(client, cfg, symbols).await,
        }
    }
}

/// Walk the configured cascade and return the first source's snapshots.
pub async fn collect_prices(
    client: &reqwest::Client,
    cfg: &Config,
) -> Result<HashMap<String, PriceSnapshot>> {
    let symbols = cfg.asset_symbols();

    for name in cfg.price_api.cascade() {
        let Some(source) = PriceSource::from_name(name) else {
            warn!(source = name, "unknown price source, skipping");
            continue;
        };
        match source.fetch(client, cfg, &symbols).await {
            Ok(snapshots) if !snapshots.is_empty() => {
                info!(
                    source = name,
                    assets = snapshots.len(),
                    "price data collected"
                );
                return Ok(snapshots);
            }
            Ok(_) => {
                warn!(source = name, "price source returned no records, trying next");
            }
            Err(e) => {
                let e = AnalyzerError::source_unavailable(name, e);
                warn!(source = name, error = %e, "price source failed, trying next");
            }
        }
    }

    Err(AnalyzerError::AllSourcesExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn cfg(primary: &str, fallbacks: &str) -> Config {
        Config::from_toml_str(&format!(
            r#"
[[assets]]
symbol = "bitcoin"
name = "Bitcoin"
ticker = "BTC"
search_terms = ["bitcoin"]

[price_api]
primary = "{primary}"
fallbacks = {fallbacks}
rate_limit_delay = 0.0
timeout_secs = 2

[news_api]
primary = "rss"

[news]

[sentiment]
scorers = ["compound"]
"#
        ))
        .unwrap()
    }

    #[test]
    fn source_names_round_trip() {
        assert_eq!(PriceSource::from_name("coingecko"), Some(PriceSource::CoinGecko));
        assert_eq!(PriceSource::from_name("coincap"), Some(PriceSource::CoinCap));
        assert_eq!(
            PriceSource::from_name("cryptocompare"),
            Some(PriceSource::CryptoCompare)
        );
        assert_eq!(PriceSource::from_name("oracle-of-delphi"), None);
    }

    #[tokio::test]
    async fn unknown_sources_exhaust_to_error() {
        let cfg = cfg("nonexistent", r#"["also-nonexistent"]"#);
        let client = reqwest::Client::new();
        let err = collect_prices(&client, &cfg).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::AllSourcesExhausted));
    }
}
