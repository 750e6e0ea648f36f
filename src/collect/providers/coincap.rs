// src/collect/providers/coincap.rs
//! CoinCap adapter: one request per asset. CoinCap serializes numbers as
//! strings; parsing them is part of this adapter's normalization duty.

use crate::collect::pace;
use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::types::PriceSnapshot;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const NAME: &str = "coincap";
const ASSETS_PATH: &str = "/assets";

#[derive(Debug, Deserialize)]
struct AssetEnvelope {
    data: AssetData,
}

#[derive(Debug, Deserialize)]
struct AssetData {
    #[serde(rename = "priceUsd")]
    price_usd: String,
    #[serde(rename = "changePercent24Hr")]
    change_percent_24h: String,
    #[serde(rename = "volumeUsd24Hr")]
    volume_usd_24h: String,
    #[serde(rename = "marketCapUsd")]
    market_cap_usd: String,
    updated: String,
}

pub async fn fetch(
    client: &reqwest::Client,
    cfg: &Config,
    symbols: &[String],
) -> Result<HashMap<String, PriceSnapshot>> {
    let endpoint = cfg
        .endpoint(NAME)
        .ok_or_else(|| AnalyzerError::Config("coincap endpoint not configured".into()))?;

    let mut out = HashMap::new();
    for symbol in symbols {
        let url = format!(
            "{}{}/{}",
            endpoint.base_url.trim_end_matches('/'),
            ASSETS_PATH,
            symbol
        );
        pace(cfg.price_api.rate_limit_delay).await;
        let body = client
            .get(&url)
            .timeout(Duration::from_secs(cfg.price_api.timeout_secs))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        if let Some(snapshot) = parse_asset(&body, cfg, symbol)? {
            out.insert(symbol.clone(), snapshot);
        }
    }
    Ok(out)
}

/// Parse one asset payload; unknown symbols map to `None`.
pub fn parse_asset(body: &str, cfg: &Config, symbol: &str) -> Result<Option<PriceSnapshot>> {
    let Some(asset) = cfg.asset_by_symbol(symbol) else {
        return Ok(None);
    };
    let envelope: AssetEnvelope =
        serde_json::from_str(body).map_err(|e| AnalyzerError::Parse(e.to_string()))?;
    let d = envelope.data;

    let parse_num = |field: &str, v: &str| -> Result<f64> {
        v.parse::<f64>()
            .map_err(|e| AnalyzerError::Parse(format!("{field} for {symbol}: {e}")))
    };
    let change_pct = parse_num("changePercent24Hr", &d.change_percent_24h)?;
    let last_updated = DateTime::parse_from_rfc3339(&d.updated)
        .map_err(|e| AnalyzerError::Parse(format!("updated for {symbol}: {e}")))?
        .with_timezone(&Utc);

    Ok(Some(PriceSnapshot {
        symbol: symbol.to_string(),
        name: asset.name.clone(),
        ticker: asset.ticker.clone(),
        price_usd: parse_num("priceUsd", &d.price_usd)?,
        // CoinCap only exposes the percentage; the absolute change mirrors it.
        change_24h: change_pct,
        change_pct_24h: change_pct,
        volume_24h: parse_num("volumeUsd24Hr", &d.volume_usd_24h)?,
        market_cap: parse_num("marketCapUsd", &d.market_cap_usd)?,
        last_updated,
        source: NAME.to_string(),
    }))
}
