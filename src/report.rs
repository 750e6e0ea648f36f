// src/report.rs
//! Final report assembly: prices, ranked articles, and sentiment keyed by
//! asset symbol, plus run-level statistics.

use crate::error::{AnalyzerError, Result};
use crate::sentiment::{AssetSentiment, ScorerKind};
use crate::types::{Article, PriceSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Run-level rollup over every asset in the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportStats {
    pub total_assets: usize,
    pub total_articles: usize,
    pub mean_composite_score: f64,
    pub bullish_assets: usize,
}

/// Everything one run produces, in serialization-ready form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub prices: HashMap<String, PriceSnapshot>,
    pub articles: HashMap<String, Vec<Article>>,
    pub sentiment: HashMap<String, AssetSentiment>,
    pub stats: ReportStats,
}

/// Assemble the report. A run with no price data at all is not worth
/// emitting; assets missing a sentiment entry get the neutral default so
/// the report covers every priced asset.
pub fn assemble(
    prices: HashMap<String, PriceSnapshot>,
    articles: HashMap<String, Vec<Article>>,
    mut sentiment: HashMap<String, AssetSentiment>,
    scorers: &[ScorerKind],
) -> Result<AnalysisReport> {
    if prices.is_empty() {
        return Err(AnalyzerError::MissingData {
            assets: articles.keys().cloned().collect(),
        });
    }

    for symbol in prices.keys() {
        sentiment
            .entry(symbol.clone())
            .or_insert_with(|| AssetSentiment::neutral(scorers));
    }

    // All three rollups range over the priced assets; sentiment entries
    // for assets no price source returned do not skew the denominators.
    let total_assets = prices.len();
    let total_articles = articles.values().map(Vec::len).sum();
    let mut composite_sum = 0.0;
    let mut bullish_assets = 0;
    for symbol in prices.keys() {
        let s = &sentiment[symbol];
        composite_sum += s.composite_score;
        if s.composite_label.is_bullish() {
            bullish_assets += 1;
        }
    }
    let mean_composite_score = composite_sum / total_assets as f64;

    Ok(AnalysisReport {
        generated_at: Utc::now(),
        prices,
        articles,
        sentiment,
        stats: ReportStats {
            total_assets,
            total_articles,
            mean_composite_score,
            bullish_assets,
        },
    })
}
