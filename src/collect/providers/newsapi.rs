// src/collect/providers/newsapi.rs
//! NewsAPI adapter: one `everything` query per search term over the
//! recent window. Per-term failures are logged and skipped; the adapter
//! only fails outright when the endpoint is unconfigured.

use crate::collect::pace;
use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::types::Article;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

pub const NAME: &str = "newsapi";
const SEARCH_PATH: &str = "/everything";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<WireArticle>,
}

#[derive(Debug, Deserialize)]
struct WireArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(default)]
    source: WireSource,
}

#[derive(Debug, Default, Deserialize)]
struct WireSource {
    name: Option<String>,
}

pub async fn fetch(
    client: &reqwest::Client,
    cfg: &Config,
    search_terms: &[String],
    max_articles: usize,
) -> Result<Vec<Article>> {
    let endpoint = cfg
        .endpoint(NAME)
        .ok_or_else(|| AnalyzerError::Config("newsapi endpoint not configured".into()))?;
    let api_key = endpoint.api_key.clone().unwrap_or_default();
    let url = format!("{}{}", endpoint.base_url.trim_end_matches('/'), SEARCH_PATH);

    let now = Utc::now();
    let from = now - ChronoDuration::hours(cfg.news.recent_window_hours);

    let mut articles = Vec::new();
    for term in search_terms {
        if articles.len() >= max_articles {
            break;
        }
        pace(cfg.news_api.rate_limit_delay).await;
        let result = client
            .get(&url)
            .query(&[
                ("q", term.as_str()),
                ("language", "en"),
                ("pageSize", &max_articles.min(100).to_string()),
                ("apiKey", &api_key),
                ("from", &from.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
                ("to", &now.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
            ])
            .timeout(Duration::from_secs(cfg.news_api.timeout_secs))
            .send()
            .await
            .and_then(|r| r.error_for_status());

        let body = match result {
            Ok(resp) => match resp.text().await {
                Ok(b) => b,
                Err(e) => {
                    warn!(term, error = %e, "newsapi body read failed");
                    continue;
                }
            },
            Err(e) => {
                warn!(term, error = %e, "newsapi query failed");
                continue;
            }
        };

        match parse_response(&body, cfg.news.min_article_length, now) {
            Ok(mut batch) => {
                let room = max_articles - articles.len();
                batch.truncate(room);
                articles.append(&mut batch);
            }
            Err(e) => warn!(term, error = %e, "newsapi payload parse failed"),
        }
    }

    Ok(articles)
}

/// Map a search payload into articles, dropping near-empty snippets.
pub fn parse_response(
    body: &str,
    min_article_length: usize,
    now: DateTime<Utc>,
) -> Result<Vec<Article>> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| AnalyzerError::Parse(e.to_string()))?;

    let mut out = Vec::new();
    for wire in response.articles {
        let description = wire.description.unwrap_or_default();
        let content = match wire.content {
            Some(c) if !c.is_empty() => c,
            _ => description.clone(),
        };
        if content.len() < min_article_length {
            continue;
        }
        let published_at = wire
            .published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(now);
        out.push(Article {
            title: wire.title.unwrap_or_default(),
            description,
            content,
            url: wire.url.unwrap_or_default(),
            source: wire.source.name.unwrap_or_else(|| "Unknown".to_string()),
            published_at,
            sentiment_score: None,
            sentiment_label: None,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "status": "ok",
        "articles": [
            {
                "title": "Bitcoin price surges",
                "description": "BTC gains ground",
                "content": "Bitcoin climbed sharply today as institutional inflows continued across major exchanges worldwide.",
                "url": "https://news.example/btc-surge",
                "publishedAt": "2026-08-01T10:00:00Z",
                "source": { "name": "Example Wire" }
            },
            {
                "title": "Too short",
                "description": "x",
                "content": "x",
                "url": "https://news.example/short",
                "publishedAt": "2026-08-01T10:00:00Z",
                "source": { "name": "Example Wire" }
            }
        ]
    }"#;

    #[test]
    fn maps_articles_and_drops_short_snippets() {
        let now = Utc::now();
        let out = parse_response(FIXTURE, 50, now).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Bitcoin price surges");
        assert_eq!(out[0].source, "Example Wire");
        assert_eq!(out[0].published_at.to_rfc3339(), "2026-08-01T10:00:00+00:00");
    }

    #[test]
    fn description_backfills_missing_content() {
        let body = r#"{"articles": [{
            "title": "T",
            "description": "a description that is plenty long enough to pass the filter",
            "url": "https://news.example/d",
            "source": { "name": "W" }
        }]}"#;
        let out = parse_response(body, 20, Utc::now()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].content, out[0].description);
    }

    #[test]
    fn bad_timestamp_falls_back_to_now() {
        let body = FIXTURE.replace("2026-08-01T10:00:00Z", "not-a-date");
        let now = Utc::now();
        let out = parse_response(&body, 50, now).unwrap();
        assert_eq!(out[0].published_at, now);
    }

    #[test]
    fn malformed_payload_is_a_parse_error() {
        assert!(parse_response("<html>rate limited</html>", 50, Utc::now()).is_err());
    }
}
