// src/sentiment/polarity.rs
//! Polarity-style lexicon scorer.
//!
//! Averages per-word polarity/subjectivity over lexicon hits; polarity in
//! [-1, 1] maps to the 0–10 scale via `(p + 1) * 5`. This scorer's
//! documented neutral baseline for empty text is score 0.0 with a neutral
//! label (it deliberately differs from the compound scorer's 5.0; each
//! scorer is internally consistent).

use crate::types::{SentimentLabel, SentimentResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

pub const SCORER_NAME: &str = "polarity";

#[derive(Debug, Clone, Copy, Deserialize)]
struct WordSentiment {
    polarity: f64,
    subjectivity: f64,
}

static LEXICON: Lazy<HashMap<String, WordSentiment>> = Lazy::new(|| {
    let raw = include_str!("../../lexicon/polarity.json");
    serde_json::from_str::<HashMap<String, WordSentiment>>(raw).expect("valid polarity lexicon")
});

static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("url regex"));
static RE_NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("non-word regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Lower-case, drop URLs, then drop everything that is not a word
/// character (this scorer ignores punctuation entirely).
fn preprocess(text: &str) -> String {
    let text = text.to_lowercase();
    let text = RE_URL.replace_all(&text, "");
    let text = RE_NON_WORD.replace_all(&text, " ");
    RE_WS.replace_all(&text, " ").trim().to_string()
}

pub fn score(text: &str) -> anyhow::Result<SentimentResult> {
    if text.trim().is_empty() {
        // Documented baseline: 0.0 / neutral / zero confidence.
        return Ok(SentimentResult::neutral(SCORER_NAME, 0.0));
    }

    let cleaned = preprocess(text);
    let mut polarity_sum = 0.0;
    let mut subjectivity_sum = 0.0;
    let mut hits = 0usize;

    for token in cleaned.split_whitespace() {
        if let Some(w) = LEXICON.get(token) {
            polarity_sum += w.polarity;
            subjectivity_sum += w.subjectivity;
            hits += 1;
        }
    }

    let (polarity, subjectivity) = if hits > 0 {
        (polarity_sum / hits as f64, subjectivity_sum / hits as f64)
    } else {
        (0.0, 0.0)
    };

    let score = ((polarity + 1.0) * 5.0).clamp(0.0, 10.0);
    let confidence = (polarity.abs() + subjectivity).min(1.0);

    let mut diagnostics = HashMap::new();
    diagnostics.insert("polarity".to_string(), polarity);
    diagnostics.insert("subjectivity".to_string(), subjectivity);

    Ok(SentimentResult {
        score,
        label: SentimentLabel::from_score(score),
        confidence,
        scorer: SCORER_NAME.to_string(),
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_uses_zero_baseline() {
        let r = score("").unwrap();
        assert_eq!(r.score, 0.0);
        assert_eq!(r.label, SentimentLabel::Neutral);
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn positive_words_map_above_midpoint() {
        let r = score("Bitcoin surges to a record").unwrap();
        assert!(r.score > 5.0, "got {}", r.score);
        assert!(r.label.is_bullish());
    }

    #[test]
    fn negative_words_map_below_midpoint() {
        let r = score("Exchange crash sparks panic and fear").unwrap();
        assert!(r.score < 5.0, "got {}", r.score);
    }

    #[test]
    fn unmatched_text_sits_at_midpoint() {
        let r = score("the committee met on tuesday").unwrap();
        assert_eq!(r.score, 5.0);
        assert_eq!(r.diagnostics.get("polarity"), Some(&0.0));
    }

    #[test]
    fn affine_map_is_clamped() {
        let r = score("worst worst worst").unwrap();
        assert!(r.score >= 0.0);
        assert_eq!(r.label, SentimentLabel::Bearish);
    }

    #[test]
    fn confidence_blends_polarity_and_subjectivity() {
        let r = score("great success").unwrap();
        let p = r.diagnostics["polarity"];
        let s = r.diagnostics["subjectivity"];
        assert!((r.confidence - (p.abs() + s).min(1.0)).abs() < 1e-9);
    }
}
