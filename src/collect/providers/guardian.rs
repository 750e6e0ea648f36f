// src/collect/providers/guardian.rs
//! Guardian Open Platform adapter. Crypto tickers collide with ordinary
//! words, so each term is quoted and anchored with "cryptocurrency".

use crate::collect::pace;
use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::types::Article;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

pub const NAME: &str = "guardian";
const SEARCH_PATH: &str = "/search";
const SOURCE_NAME: &str = "The Guardian";

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<WireResult>,
}

#[derive(Debug, Deserialize)]
struct WireResult {
    #[serde(rename = "webTitle")]
    web_title: Option<String>,
    #[serde(rename = "webUrl")]
    web_url: Option<String>,
    #[serde(rename = "webPublicationDate")]
    web_publication_date: Option<String>,
    #[serde(default)]
    fields: WireFields,
}

#[derive(Debug, Default, Deserialize)]
struct WireFields {
    headline: Option<String>,
    #[serde(rename = "trailText")]
    trail_text: Option<String>,
    #[serde(rename = "bodyText")]
    body_text: Option<String>,
}

pub async fn fetch(
    client: &reqwest::Client,
    cfg: &Config,
    search_terms: &[String],
    max_articles: usize,
) -> Result<Vec<Article>> {
    let endpoint = cfg
        .endpoint(NAME)
        .ok_or_else(|| AnalyzerError::Config("guardian endpoint not configured".into()))?;
    let api_key = endpoint.api_key.clone().unwrap_or_default();
    let url = format!("{}{}", endpoint.base_url.trim_end_matches('/'), SEARCH_PATH);

    let now = Utc::now();
    let from = now - ChronoDuration::hours(cfg.news.recent_window_hours);

    let mut articles = Vec::new();
    for term in search_terms {
        if articles.len() >= max_articles {
            break;
        }
        let query = format!("\"{term}\" cryptocurrency");
        pace(cfg.news_api.rate_limit_delay).await;
        let result = client
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("from-date", &from.format("%Y-%m-%d").to_string()),
                ("to-date", &now.format("%Y-%m-%d").to_string()),
                ("show-fields", "headline,trailText,bodyText"),
                ("page-size", "50"),
                ("order-by", "newest"),
                ("api-key", &api_key),
            ])
            .timeout(Duration::from_secs(cfg.news_api.timeout_secs))
            .send()
            .await
            .and_then(|r| r.error_for_status());

        let body = match result {
            Ok(resp) => match resp.text().await {
                Ok(b) => b,
                Err(e) => {
                    warn!(term, error = %e, "guardian body read failed");
                    continue;
                }
            },
            Err(e) => {
                warn!(term, error = %e, "guardian query failed");
                continue;
            }
        };

        match parse_response(&body, cfg.news.min_article_length, now) {
            Ok(mut batch) => {
                let room = max_articles - articles.len();
                batch.truncate(room);
                articles.append(&mut batch);
            }
            Err(e) => warn!(term, error = %e, "guardian payload parse failed"),
        }
    }

    Ok(articles)
}

pub fn parse_response(
    body: &str,
    min_article_length: usize,
    now: DateTime<Utc>,
) -> Result<Vec<Article>> {
    let envelope: SearchEnvelope =
        serde_json::from_str(body).map_err(|e| AnalyzerError::Parse(e.to_string()))?;

    let mut out = Vec::new();
    for wire in envelope.response.results {
        let title = wire
            .fields
            .headline
            .clone()
            .or(wire.web_title)
            .unwrap_or_default();
        let trail = wire.fields.trail_text.unwrap_or_default();
        let content = wire
            .fields
            .body_text
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| if trail.is_empty() { title.clone() } else { trail.clone() });
        if content.len() < min_article_length {
            continue;
        }
        let published_at = wire
            .web_publication_date
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(now);
        out.push(Article {
            description: if trail.is_empty() { title.clone() } else { trail },
            title,
            content,
            url: wire.web_url.unwrap_or_default(),
            source: SOURCE_NAME.to_string(),
            published_at,
            sentiment_score: None,
            sentiment_label: None,
        });
    }
    Ok(out)
}
