// src/collect/providers/coingecko.rs
//! CoinGecko adapter: one batch request against the markets endpoint.

use crate::collect::pace;
use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::types::PriceSnapshot;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const NAME: &str = "coingecko";
const MARKETS_PATH: &str = "/coins/markets";

/// All fields required: a row missing any of them invalidates the draw
/// and fails the whole source.
#[derive(Debug, Deserialize)]
struct MarketRow {
    id: String,
    current_price: f64,
    price_change_24h: f64,
    price_change_percentage_24h: f64,
    total_volume: f64,
    market_cap: f64,
    last_updated: String,
}

pub async fn fetch(
    client: &reqwest::Client,
    cfg: &Config,
    symbols: &[String],
) -> Result<HashMap<String, PriceSnapshot>> {
    let endpoint = cfg
        .endpoint(NAME)
        .ok_or_else(|| AnalyzerError::Config("coingecko endpoint not configured".into()))?;
    let url = format!("{}{}", endpoint.base_url.trim_end_matches('/'), MARKETS_PATH);

    pace(cfg.price_api.rate_limit_delay).await;
    let body = client
        .get(&url)
        .query(&[
            ("vs_currency", "usd"),
            ("ids", &symbols.join(",")),
            ("order", "market_cap_desc"),
            ("per_page", &symbols.len().to_string()),
            ("page", "1"),
            ("price_change_percentage", "24h"),
        ])
        .timeout(Duration::from_secs(cfg.price_api.timeout_secs))
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    parse_markets(&body, cfg)
}

/// Parse a markets payload; only rows for configured assets are kept.
pub fn parse_markets(body: &str, cfg: &Config) -> Result<HashMap<String, PriceSnapshot>> {
    let rows: Vec<MarketRow> =
        serde_json::from_str(body).map_err(|e| AnalyzerError::Parse(e.to_string()))?;

    let mut out = HashMap::new();
    for row in rows {
        let Some(asset) = cfg.asset_by_symbol(&row.id) else {
            continue;
        };
        let last_updated = DateTime::parse_from_rfc3339(&row.last_updated)
            .map_err(|e| AnalyzerError::Parse(format!("last_updated for {}: {e}", row.id)))?
            .with_timezone(&Utc);
        out.insert(
            row.id.clone(),
            PriceSnapshot {
                symbol: row.id,
                name: asset.name.clone(),
                ticker: asset.ticker.clone(),
                price_usd: row.current_price,
                change_24h: row.price_change_24h,
                change_pct_24h: row.price_change_percentage_24h,
                volume_24h: row.total_volume,
                market_cap: row.market_cap,
                last_updated,
                source: NAME.to_string(),
            },
        );
    }
    Ok(out)
}
