// src/types.rs
//! Shared data model for the analysis pipeline.
//!
//! All timestamps are `DateTime<Utc>`; adapters convert at the boundary so
//! no naive or mixed-offset values ever reach dedup or recency scoring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One news article in the common shape every source adapter normalizes to.
///
/// Created by an adapter; `sentiment_score`/`sentiment_label` are attached
/// later by the sentiment aggregator and never change after assembly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub content: String,
    pub url: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_label: Option<SentimentLabel>,
}

impl Article {
    /// Concatenated text used for sentiment analysis.
    pub fn analysis_text(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.content)
    }
}

/// Point-in-time market data for one asset. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceSnapshot {
    pub symbol: String,
    pub name: String,
    pub ticker: String,
    pub price_usd: f64,
    pub change_24h: f64,
    pub change_pct_24h: f64,
    pub volume_24h: f64,
    pub market_cap: f64,
    pub last_updated: DateTime<Utc>,
    pub source: String,
}

/// Six-bucket sentiment label over the 0–10 score scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    VeryBullish,
    Bullish,
    NeutralBullish,
    Neutral,
    NeutralBearish,
    Bearish,
}

impl SentimentLabel {
    /// The single score→label mapping used everywhere in the crate.
    /// Bucket lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            SentimentLabel::VeryBullish
        } else if score >= 6.0 {
            SentimentLabel::Bullish
        } else if score >= 4.0 {
            SentimentLabel::NeutralBullish
        } else if score >= 2.0 {
            SentimentLabel::Neutral
        } else if score >= 0.5 {
            SentimentLabel::NeutralBearish
        } else {
            SentimentLabel::Bearish
        }
    }

    pub fn is_bullish(&self) -> bool {
        matches!(
            self,
            SentimentLabel::VeryBullish | SentimentLabel::Bullish | SentimentLabel::NeutralBullish
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::VeryBullish => "very_bullish",
            SentimentLabel::Bullish => "bullish",
            SentimentLabel::NeutralBullish => "neutral_bullish",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::NeutralBearish => "neutral_bearish",
            SentimentLabel::Bearish => "bearish",
        }
    }
}

/// Output of one scorer on one text, or a per-scorer average.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentimentResult {
    pub score: f64,
    pub label: SentimentLabel,
    pub confidence: f64,
    pub scorer: String,
    /// Scorer-specific diagnostics (polarity/subjectivity or
    /// compound plus positive/negative/neutral mass).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub diagnostics: HashMap<String, f64>,
}

impl SentimentResult {
    /// Defined-neutral result at the given baseline score.
    pub fn neutral(scorer: &str, score: f64) -> Self {
        Self {
            score,
            label: SentimentLabel::Neutral,
            confidence: 0.0,
            scorer: scorer.to_string(),
            diagnostics: HashMap::new(),
        }
    }
}

/// Derived counts over a deduplicated article set. Never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CollectionStats {
    pub total_articles: usize,
    pub recent_articles: usize,
    pub by_source: HashMap<String, usize>,
}
