// src/analyzer.rs
//! Top-level pipeline: prices, then per-asset news → dedup → relevance →
//! sentiment, then report assembly.

use crate::collect::{self, news, price};
use crate::config::Config;
use crate::error::Result;
use crate::report::{self, AnalysisReport};
use crate::sentiment::{self, AssetSentiment, ScorerKind};
use crate::types::Article;
use crate::{dedup, relevance};
use anyhow::Context;
use chrono::Utc;
use std::collections::HashMap;
use tracing::info;

pub struct Analyzer {
    cfg: Config,
    client: reqwest::Client,
    scorers: Vec<ScorerKind>,
}

impl Analyzer {
    pub fn new(cfg: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(collect::USER_AGENT)
            .build()?;
        let scorers = sentiment::scorers_from_config(&cfg.sentiment)?;
        Ok(Self {
            cfg,
            client,
            scorers,
        })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// One full analysis run.
    pub async fn run(&self) -> anyhow::Result<AnalysisReport> {
        info!(assets = self.cfg.assets.len(), "starting analysis run");

        let prices = price::collect_prices(&self.client, &self.cfg)
            .await
            .context("collecting price data")?;

        let mut articles: HashMap<String, Vec<Article>> = HashMap::new();
        let mut asset_sentiment: HashMap<String, AssetSentiment> = HashMap::new();

        for asset in &self.cfg.assets {
            let raw = news::collect_news(&self.client, &self.cfg, asset).await;
            let raw_count = raw.len();

            let deduped = dedup::dedupe(raw, self.cfg.news.similarity_threshold);
            let now = Utc::now();
            let stats = dedup::collection_stats(&deduped, now, self.cfg.news.recent_window_hours);
            info!(
                asset = %asset.symbol,
                collected = raw_count,
                unique = stats.total_articles,
                recent = stats.recent_articles,
                sources = stats.by_source.len(),
                "articles deduplicated"
            );

            let relevant = relevance::filter_relevant(deduped, &asset.search_terms);
            let mut ranked = relevance::rank(
                relevant,
                &asset.search_terms,
                now,
                &self.cfg.news.quality_sources,
                self.cfg.news.max_articles_per_asset,
            );

            let summary = sentiment::analyze_articles(
                &self.scorers,
                &mut ranked,
                self.cfg.sentiment.neutral_default_score,
            );
            info!(
                asset = %asset.symbol,
                articles = summary.articles_analyzed,
                composite = summary.composite_score,
                label = summary.composite_label.as_str(),
                "sentiment aggregated"
            );

            articles.insert(asset.symbol.clone(), ranked);
            asset_sentiment.insert(asset.symbol.clone(), summary);
        }

        let report = report::assemble(prices, articles, asset_sentiment, &self.scorers)
            .context("assembling report")?;
        info!(
            assets = report.stats.total_assets,
            articles = report.stats.total_articles,
            bullish = report.stats.bullish_assets,
            "analysis run complete"
        );
        Ok(report)
    }
}
