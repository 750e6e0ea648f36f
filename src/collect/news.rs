// src/collect/news.rs
//! News-side orchestrator. Unlike the price cascade this collects from
//! every configured source: the primary first, syndication feeds always,
//! then the remaining fallbacks. A failing source costs its articles,
//! never the run.

use crate::collect::providers::{guardian, newsapi, rss};
use crate::config::{AssetConfig, Config};
use crate::error::Result;
use crate::types::Article;
use tracing::{info, warn};

/// Closed set of news providers, dispatched by configured name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsSource {
    NewsApi,
    Guardian,
    Rss,
}

impl NewsSource {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            newsapi::NAME => Some(NewsSource::NewsApi),
            guardian::NAME => Some(NewsSource::Guardian),
            rss::NAME => Some(NewsSource::Rss),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NewsSource::NewsApi => newsapi::NAME,
            NewsSource::Guardian => guardian::NAME,
            NewsSource::Rss => rss::NAME,
        }
    }

    async fn fetch(
        &self,
        client: &reqwest::Client,
        cfg: &Config,
        search_terms: &[String],
        max_articles: usize,
    ) -> Result<Vec<Article>> {
        match self {
            NewsSource::NewsApi => newsapi::fetch(client, cfg, search_terms, max_articles).await,
            NewsSource::Guardian => guardian::fetch(client, cfg, search_terms, max_articles).await,
            NewsSource::Rss => rss::fetch(client, cfg, search_terms, max_articles).await,
        }
    }
}

/// The query order for one asset: primary, then feeds, then fallbacks,
/// each source at most once.
fn query_order(cfg: &Config) -> Vec<NewsSource> {
    let mut order = Vec::new();
    for name in cfg.news_api.cascade() {
        match NewsSource::from_name(name) {
            Some(source) if !order.contains(&source) => order.push(source),
            Some(_) => {}
            None => warn!(source = name, "unknown news source, skipping"),
        }
    }
    // Feeds ride along even when only API sources are configured; they
    // slot in right after the primary.
    if !cfg.news.rss_feeds.is_empty() && !order.contains(&NewsSource::Rss) {
        order.insert(order.len().min(1), NewsSource::Rss);
    }
    order
}

/// Gather raw articles for one asset from every reachable source.
pub async fn collect_news(
    client: &reqwest::Client,
    cfg: &Config,
    asset: &AssetConfig,
) -> Vec<Article> {
    let max_articles = cfg.news.max_articles_per_asset;
    let mut articles = Vec::new();

    for source in query_order(cfg) {
        match source.fetch(client, cfg, &asset.search_terms, max_articles).await {
            Ok(batch) => {
                info!(
                    asset = %asset.symbol,
                    source = source.name(),
                    count = batch.len(),
                    "news collected"
                );
                articles.extend(batch);
            }
            Err(e) => {
                warn!(
                    asset = %asset.symbol,
                    source = source.name(),
                    error = %e,
                    "news source failed, continuing"
                );
            }
        }
    }

    articles
}
