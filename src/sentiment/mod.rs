// src/sentiment/mod.rs
//! Scorer dispatch and per-asset aggregation.
//!
//! Scorers are a closed set selected by configured name. Aggregation:
//! average each scorer's per-article scores, then take the unweighted mean
//! of the scorer averages as the asset composite. Every label — per
//! article, per scorer, per asset — derives from the numeric score through
//! `SentimentLabel::from_score`; labels are never averaged or voted on.

pub mod compound;
pub mod polarity;

use crate::config::SentimentConfig;
use crate::error::AnalyzerError;
use crate::types::{Article, SentimentLabel, SentimentResult};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Closed set of sentiment scorers, dispatched by configured name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerKind {
    Compound,
    Polarity,
}

impl ScorerKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "compound" => Some(ScorerKind::Compound),
            "polarity" => Some(ScorerKind::Polarity),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScorerKind::Compound => compound::SCORER_NAME,
            ScorerKind::Polarity => polarity::SCORER_NAME,
        }
    }

    pub fn score(&self, text: &str) -> anyhow::Result<SentimentResult> {
        match self {
            ScorerKind::Compound => compound::score(text),
            ScorerKind::Polarity => polarity::score(text),
        }
    }
}

/// Build the scorer set from configuration. Names were already validated
/// at config load; an unknown name here is a config error all the same.
pub fn scorers_from_config(cfg: &SentimentConfig) -> Result<Vec<ScorerKind>, AnalyzerError> {
    cfg.scorers
        .iter()
        .map(|name| {
            ScorerKind::from_name(name)
                .ok_or_else(|| AnalyzerError::Config(format!("unknown sentiment scorer `{name}`")))
        })
        .collect()
}

/// One scorer's per-asset average.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScorerAverage {
    pub scorer: String,
    pub score: f64,
    pub label: SentimentLabel,
    pub confidence: f64,
}

/// Composite sentiment for one asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetSentiment {
    pub composite_score: f64,
    pub composite_label: SentimentLabel,
    pub articles_analyzed: usize,
    pub per_scorer: Vec<ScorerAverage>,
}

impl AssetSentiment {
    /// The zero-article asset: composite 5.0, neutral, nothing analyzed.
    pub fn neutral(scorers: &[ScorerKind]) -> Self {
        Self {
            composite_score: 5.0,
            composite_label: SentimentLabel::Neutral,
            articles_analyzed: 0,
            per_scorer: scorers
                .iter()
                .map(|s| ScorerAverage {
                    scorer: s.name().to_string(),
                    score: 5.0,
                    label: SentimentLabel::Neutral,
                    confidence: 0.0,
                })
                .collect(),
        }
    }
}

/// Substitute the neutral default when a scorer fails on one article.
/// Logged, never raised; sibling articles and scorers are unaffected.
fn fold_article_result(
    result: anyhow::Result<SentimentResult>,
    scorer: &str,
    article_url: &str,
    neutral_default: f64,
) -> SentimentResult {
    match result {
        Ok(r) => r,
        Err(e) => {
            error!(scorer, url = article_url, error = %e, "scorer failed, substituting neutral default");
            let mut r = SentimentResult::neutral(scorer, neutral_default);
            r.label = SentimentLabel::from_score(neutral_default);
            r
        }
    }
}

/// Score every article with every configured scorer and aggregate.
///
/// Attaches the per-article mean score (across scorers) and its derived
/// label to each article; this is the only place articles are mutated
/// after collection.
pub fn analyze_articles(
    scorers: &[ScorerKind],
    articles: &mut [Article],
    neutral_default: f64,
) -> AssetSentiment {
    if articles.is_empty() {
        return AssetSentiment::neutral(scorers);
    }

    // results[scorer][article]
    let mut results: Vec<Vec<SentimentResult>> = Vec::with_capacity(scorers.len());
    for scorer in scorers {
        let per_article = articles
            .iter()
            .map(|a| {
                fold_article_result(
                    scorer.score(&a.analysis_text()),
                    scorer.name(),
                    &a.url,
                    neutral_default,
                )
            })
            .collect();
        results.push(per_article);
    }

    // Per-article attachment: mean of the scorers' scores for that article.
    for (i, article) in articles.iter_mut().enumerate() {
        let sum: f64 = results.iter().map(|per| per[i].score).sum();
        let mean = sum / scorers.len() as f64;
        article.sentiment_score = Some(mean);
        article.sentiment_label = Some(SentimentLabel::from_score(mean));
    }

    let per_scorer: Vec<ScorerAverage> = scorers
        .iter()
        .zip(&results)
        .map(|(scorer, per_article)| {
            let n = per_article.len() as f64;
            let score = per_article.iter().map(|r| r.score).sum::<f64>() / n;
            let confidence = per_article.iter().map(|r| r.confidence).sum::<f64>() / n;
            ScorerAverage {
                scorer: scorer.name().to_string(),
                score,
                label: SentimentLabel::from_score(score),
                confidence,
            }
        })
        .collect();

    let composite_score =
        per_scorer.iter().map(|s| s.score).sum::<f64>() / per_scorer.len() as f64;

    AssetSentiment {
        composite_score,
        composite_label: SentimentLabel::from_score(composite_score),
        articles_analyzed: articles.len(),
        per_scorer,
    }
}
