// src/relevance.rs
//! Relevance scoring over deduplicated articles: additive term-match
//! weights, a linear recency decay and a flat source-quality bonus.

use crate::types::Article;
use chrono::{DateTime, Utc};

pub const TITLE_MATCH_WEIGHT: f64 = 3.0;
pub const DESCRIPTION_MATCH_WEIGHT: f64 = 2.0;
pub const CONTENT_MATCH_WEIGHT: f64 = 1.0;
pub const RECENCY_BONUS_MAX: f64 = 0.5;
pub const RECENCY_WINDOW_HOURS: f64 = 24.0;
pub const QUALITY_SOURCE_BONUS: f64 = 0.3;

/// Additive relevance score for one article against one asset's terms.
///
/// Each term counts once, at its best position: title beats description
/// beats content. Score is monotonically non-decreasing in the number of
/// distinct matched terms.
pub fn relevance_score(
    article: &Article,
    search_terms: &[String],
    now: DateTime<Utc>,
    quality_sources: &[String],
) -> f64 {
    let title = article.title.to_lowercase();
    let description = article.description.to_lowercase();
    let content = article.content.to_lowercase();

    let mut score = 0.0;
    for term in search_terms {
        let term = term.to_lowercase();
        if term.is_empty() {
            continue;
        }
        if title.contains(&term) {
            score += TITLE_MATCH_WEIGHT;
        } else if description.contains(&term) {
            score += DESCRIPTION_MATCH_WEIGHT;
        } else if content.contains(&term) {
            score += CONTENT_MATCH_WEIGHT;
        }
    }

    score += recency_bonus(article.published_at, now);

    let source = article.source.to_lowercase();
    if quality_sources
        .iter()
        .any(|q| !q.is_empty() && source.contains(&q.to_lowercase()))
    {
        score += QUALITY_SOURCE_BONUS;
    }

    score
}

/// Linear decay from `RECENCY_BONUS_MAX` at publication to zero at 24h.
/// Future timestamps clamp to the maximum.
fn recency_bonus(published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let hours = (now - published_at).num_seconds() as f64 / 3600.0;
    let hours = hours.max(0.0);
    (RECENCY_WINDOW_HOURS - hours).max(0.0) / RECENCY_WINDOW_HOURS * RECENCY_BONUS_MAX
}

/// Sort descending by relevance (stable: ties keep input order) and keep
/// the top `max_articles`.
pub fn rank(
    mut articles: Vec<Article>,
    search_terms: &[String],
    now: DateTime<Utc>,
    quality_sources: &[String],
    max_articles: usize,
) -> Vec<Article> {
    let mut scored: Vec<(f64, Article)> = articles
        .drain(..)
        .map(|a| (relevance_score(&a, search_terms, now, quality_sources), a))
        .collect();
    scored.sort_by(|(sa, _), (sb, _)| sb.partial_cmp(sa).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(max_articles)
        .map(|(_, a)| a)
        .collect()
}

/// Keep only articles matching at least one term anywhere.
/// Used when scoring; ranking keeps zero-match articles (they sort last).
pub fn filter_relevant(articles: Vec<Article>, search_terms: &[String]) -> Vec<Article> {
    articles
        .into_iter()
        .filter(|a| {
            let title = a.title.to_lowercase();
            let description = a.description.to_lowercase();
            let content = a.content.to_lowercase();
            search_terms.iter().any(|t| {
                let t = t.to_lowercase();
                !t.is_empty()
                    && (title.contains(&t) || description.contains(&t) || content.contains(&t))
            })
        })
        .collect()
}
