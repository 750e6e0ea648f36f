// src/collect/providers/rss.rs
//! Syndication feed adapter: low reliability, broad coverage. Fetches
//! every configured feed, keeps entries that mention a search term and
//! were published inside the recent window.

use crate::collect::{normalize_text, pace};
use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::types::Article;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use quick_xml::de::from_str;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const NAME: &str = "rss";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    title: Option<String>,
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

pub async fn fetch(
    client: &reqwest::Client,
    cfg: &Config,
    search_terms: &[String],
    max_articles: usize,
) -> Result<Vec<Article>> {
    if cfg.news.rss_feeds.is_empty() {
        return Err(AnalyzerError::Config("no rss feeds configured".into()));
    }

    let now = Utc::now();
    let mut articles = Vec::new();
    for feed_url in &cfg.news.rss_feeds {
        if articles.len() >= max_articles {
            break;
        }
        pace(cfg.news_api.rate_limit_delay).await;
        let result = client
            .get(feed_url)
            .timeout(Duration::from_secs(cfg.news_api.timeout_secs))
            .send()
            .await
            .and_then(|r| r.error_for_status());
        let body = match result {
            Ok(resp) => match resp.text().await {
                Ok(b) => b,
                Err(e) => {
                    warn!(feed = feed_url, error = %e, "rss body read failed");
                    continue;
                }
            },
            Err(e) => {
                warn!(feed = feed_url, error = %e, "rss feed fetch failed");
                continue;
            }
        };

        match parse_feed(
            &body,
            search_terms,
            cfg.news.min_article_length,
            cfg.news.recent_window_hours,
            now,
        ) {
            Ok(mut batch) => {
                debug!(feed = feed_url, count = batch.len(), "rss entries kept");
                let room = max_articles - articles.len();
                batch.truncate(room);
                articles.append(&mut batch);
            }
            Err(e) => warn!(feed = feed_url, error = %e, "rss feed parse failed"),
        }
    }

    Ok(articles)
}

/// Parse one feed document and keep term-relevant, recent, non-empty
/// entries. The channel title becomes the article source.
pub fn parse_feed(
    xml: &str,
    search_terms: &[String],
    min_article_length: usize,
    recent_window_hours: i64,
    now: DateTime<Utc>,
) -> Result<Vec<Article>> {
    let rss: Rss = from_str(xml).map_err(|e| AnalyzerError::Parse(e.to_string()))?;
    let source = rss
        .channel
        .title
        .map(|t| normalize_text(&t))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "RSS Feed".to_string());
    let cutoff = now - ChronoDuration::hours(recent_window_hours);

    let mut out = Vec::new();
    for item in rss.channel.item {
        let title = normalize_text(&item.title.unwrap_or_default());
        let description = normalize_text(&item.description.unwrap_or_default());

        let title_lower = title.to_lowercase();
        let description_lower = description.to_lowercase();
        let relevant = search_terms.iter().any(|t| {
            let t = t.to_lowercase();
            !t.is_empty() && (title_lower.contains(&t) || description_lower.contains(&t))
        });
        if !relevant {
            continue;
        }
        if description.len() < min_article_length {
            continue;
        }

        let published_at = item
            .pub_date
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc2822(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(now);
        if published_at < cutoff {
            continue;
        }

        out.push(Article {
            title,
            content: description.clone(),
            description,
            url: item.link.unwrap_or_default(),
            source: source.clone(),
            published_at,
            sentiment_score: None,
            sentiment_label: None,
        });
    }
    Ok(out)
}
