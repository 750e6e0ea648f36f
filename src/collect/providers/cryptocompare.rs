// src/collect/providers/cryptocompare.rs
//! CryptoCompare adapter: last-resort price source. The price endpoint
//! only returns a spot price, so change/volume/cap are zero-filled and
//! `last_updated` is the collection instant.

use crate::collect::pace;
use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::types::PriceSnapshot;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const NAME: &str = "cryptocompare";
const PRICE_PATH: &str = "/data/price";

#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(rename = "USD")]
    usd: f64,
}

pub async fn fetch(
    client: &reqwest::Client,
    cfg: &Config,
    symbols: &[String],
) -> Result<HashMap<String, PriceSnapshot>> {
    let endpoint = cfg
        .endpoint(NAME)
        .ok_or_else(|| AnalyzerError::Config("cryptocompare endpoint not configured".into()))?;
    let url = format!("{}{}", endpoint.base_url.trim_end_matches('/'), PRICE_PATH);

    let mut out = HashMap::new();
    for symbol in symbols {
        let Some(asset) = cfg.asset_by_symbol(symbol) else {
            continue;
        };
        pace(cfg.price_api.rate_limit_delay).await;
        let body = client
            .get(&url)
            .query(&[("fsym", asset.ticker.as_str()), ("tsyms", "USD")])
            .timeout(Duration::from_secs(cfg.price_api.timeout_secs))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        out.insert(symbol.clone(), parse_price(&body, cfg, symbol, Utc::now())?);
    }
    Ok(out)
}

pub fn parse_price(
    body: &str,
    cfg: &Config,
    symbol: &str,
    now: DateTime<Utc>,
) -> Result<PriceSnapshot> {
    let asset = cfg
        .asset_by_symbol(symbol)
        .ok_or_else(|| AnalyzerError::Parse(format!("asset `{symbol}` not configured")))?;
    let row: PriceRow =
        serde_json::from_str(body).map_err(|e| AnalyzerError::Parse(e.to_string()))?;
    Ok(PriceSnapshot {
        symbol: symbol.to_string(),
        name: asset.name.clone(),
        ticker: asset.ticker.clone(),
        price_usd: row.usd,
        change_24h: 0.0,
        change_pct_24h: 0.0,
        volume_24h: 0.0,
        market_cap: 0.0,
        last_updated: now,
        source: NAME.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config::from_toml_str(
            r#"
[[assets]]
symbol = "bitcoin"
name = "Bitcoin"
ticker = "BTC"
search_terms = ["bitcoin"]

[price_api]
primary = "cryptocompare"

[news_api]
primary = "rss"

[news]

[sentiment]
scorers = ["compound"]
"#,
        )
        .unwrap()
    }

    #[test]
    fn parses_spot_price_and_zero_fills() {
        let now = Utc::now();
        let snap = parse_price(r#"{"USD": 49750.25}"#, &cfg(), "bitcoin", now).unwrap();
        assert_eq!(snap.price_usd, 49750.25);
        assert_eq!(snap.change_24h, 0.0);
        assert_eq!(snap.volume_24h, 0.0);
        assert_eq!(snap.last_updated, now);
    }

    #[test]
    fn missing_usd_field_fails() {
        assert!(parse_price(r#"{"EUR": 1.0}"#, &cfg(), "bitcoin", Utc::now()).is_err());
    }
}
