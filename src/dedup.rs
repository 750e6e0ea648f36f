// src/dedup.rs
//! Exact and near-duplicate removal over the combined article set of one
//! asset. URL identity first, then word-set Jaccard similarity between
//! normalized titles. Accepted articles keep their input order.

use crate::types::{Article, CollectionStats};
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};

/// Articles whose normalized titles exceed this similarity are duplicates.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Editorial prefixes stripped before titles are compared.
const TITLE_PREFIXES: [&str; 5] = ["breaking:", "update:", "news:", "latest:", "alert:"];

pub fn normalize_url(url: &str) -> String {
    url.trim().to_lowercase()
}

/// Case-fold, trim, and strip leading editorial prefixes (repeatedly, so
/// "breaking: update: ..." collapses too).
pub fn normalize_title(title: &str) -> String {
    let mut t = title.trim().to_lowercase();
    loop {
        let mut stripped = false;
        for prefix in TITLE_PREFIXES {
            if let Some(rest) = t.strip_prefix(prefix) {
                t = rest.trim_start().to_string();
                stripped = true;
            }
        }
        if !stripped {
            break;
        }
    }
    t
}

/// Word-set Jaccard similarity over whitespace tokens.
/// Two empty word sets compare as 0, not 1.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let wa: HashSet<&str> = a.split_whitespace().collect();
    let wb: HashSet<&str> = b.split_whitespace().collect();
    if wa.is_empty() || wb.is_empty() {
        return 0.0;
    }
    let intersection = wa.intersection(&wb).count() as f64;
    let union = wa.union(&wb).count() as f64;
    intersection / union
}

/// Remove exact (URL) and near (title) duplicates, first occurrence wins.
pub fn dedupe(articles: Vec<Article>, similarity_threshold: f64) -> Vec<Article> {
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut accepted_titles: Vec<String> = Vec::new();
    let mut kept = Vec::with_capacity(articles.len());

    for article in articles {
        let url = normalize_url(&article.url);
        if !url.is_empty() && seen_urls.contains(&url) {
            continue;
        }

        let title = normalize_title(&article.title);
        let near_dup = accepted_titles
            .iter()
            .any(|t| title_similarity(t, &title) > similarity_threshold);
        if near_dup {
            continue;
        }

        if !url.is_empty() {
            seen_urls.insert(url);
        }
        accepted_titles.push(title);
        kept.push(article);
    }

    kept
}

/// Counts over a deduplicated set; `recent` means published inside the
/// configured window ending at `now`.
pub fn collection_stats(
    articles: &[Article],
    now: DateTime<Utc>,
    recent_window_hours: i64,
) -> CollectionStats {
    let cutoff = now - Duration::hours(recent_window_hours);
    let mut by_source: HashMap<String, usize> = HashMap::new();
    let mut recent = 0usize;
    for a in articles {
        *by_source.entry(a.source.clone()).or_insert(0) += 1;
        if a.published_at >= cutoff {
            recent += 1;
        }
    }
    CollectionStats {
        total_articles: articles.len(),
        recent_articles: recent,
        by_source,
    }
}
