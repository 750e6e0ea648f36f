// src/sentiment/compound.rs
//! Compound-style lexicon scorer.
//!
//! Sums per-word valences (with a short-range negation flip), squashes the
//! sum into a compound value in (-1, 1) and maps it to the 0–10 scale.
//! Empty or whitespace-only text is defined-neutral at score 5.0.

use crate::types::{SentimentLabel, SentimentResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

pub const SCORER_NAME: &str = "compound";

static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../../lexicon/compound.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid compound lexicon")
});

static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("url regex"));
static RE_SPECIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.!?,;:\-()']").expect("special-char regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Lower-case, drop URLs, drop special characters (sentence punctuation
/// stays, it carries signal for negation windows), collapse whitespace.
fn preprocess(text: &str) -> String {
    let text = text.to_lowercase();
    let text = RE_URL.replace_all(&text, "");
    let text = RE_SPECIAL.replace_all(&text, " ");
    RE_WS.replace_all(&text, " ").trim().to_string()
}

/// Alphanumeric tokens, apostrophes kept so contractions like "isn't"
/// survive for the negator check.
fn tokenize(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(|t| t.trim_matches('\'').to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "isn't"
            | "wasn't"
            | "aren't"
            | "won't"
            | "can't"
            | "cannot"
            | "without"
    )
}

/// Score one text. Infallible in practice; the `Result` keeps the scorer
/// contract uniform for the aggregator's failure policy.
pub fn score(text: &str) -> anyhow::Result<SentimentResult> {
    if text.trim().is_empty() {
        return Ok(neutral());
    }

    let cleaned = preprocess(text);
    let tokens = tokenize(&cleaned);
    if tokens.is_empty() {
        return Ok(neutral());
    }

    let mut sum: i32 = 0;
    let mut positive_hits = 0usize;
    let mut negative_hits = 0usize;

    for i in 0..tokens.len() {
        let base = *LEXICON.get(tokens[i].as_str()).unwrap_or(&0);
        if base == 0 {
            continue;
        }
        // Flip valence when a negator sits within the previous 3 tokens.
        let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
        let adj = if negated { -base } else { base };
        sum += adj;
        if adj > 0 {
            positive_hits += 1;
        } else {
            negative_hits += 1;
        }
    }

    let compound = f64::from(sum) / (f64::from(sum) * f64::from(sum) + 15.0).sqrt();
    let positive = positive_hits as f64 / tokens.len() as f64;
    let negative = negative_hits as f64 / tokens.len() as f64;
    let neutral_mass = (1.0 - positive - negative).max(0.0);

    let score = ((compound + 1.0) * 5.0).clamp(0.0, 10.0);
    let confidence = (compound.abs() * (1.0 - neutral_mass)).clamp(0.0, 1.0);

    let mut diagnostics = HashMap::new();
    diagnostics.insert("compound".to_string(), compound);
    diagnostics.insert("positive".to_string(), positive);
    diagnostics.insert("negative".to_string(), negative);
    diagnostics.insert("neutral".to_string(), neutral_mass);

    Ok(SentimentResult {
        score,
        label: SentimentLabel::from_score(score),
        confidence,
        scorer: SCORER_NAME.to_string(),
        diagnostics,
    })
}

fn neutral() -> SentimentResult {
    let mut r = SentimentResult::neutral(SCORER_NAME, 5.0);
    r.diagnostics.insert("compound".to_string(), 0.0);
    r.diagnostics.insert("neutral".to_string(), 1.0);
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_neutral_at_five() {
        let r = score("   ").unwrap();
        assert_eq!(r.score, 5.0);
        assert_eq!(r.label, SentimentLabel::Neutral);
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn bullish_headline_scores_above_neutral() {
        let r = score("Bitcoin price surges").unwrap();
        assert!(r.score > 6.0, "got {}", r.score);
        assert!(r.label.is_bullish());
        assert!(r.confidence > 0.0);
    }

    #[test]
    fn bearish_headline_scores_below_neutral() {
        let r = score("Exchange collapse triggers panic selloff").unwrap();
        assert!(r.score < 4.0, "got {}", r.score);
    }

    #[test]
    fn negation_flips_valence() {
        let plain = score("markets rally").unwrap();
        let negated = score("markets did not rally").unwrap();
        assert!(plain.score > 5.0);
        assert!(negated.score < 5.0);
    }

    #[test]
    fn urls_do_not_contribute() {
        let with_url = score("bitcoin surges https://crash-plunge-panic.example/fraud").unwrap();
        let without = score("bitcoin surges").unwrap();
        assert!((with_url.score - without.score).abs() < 1e-9);
    }

    #[test]
    fn score_stays_in_bounds() {
        let r = score(
            "crash crash crash plunge plunge fraud scam panic collapse bankruptcy",
        )
        .unwrap();
        assert!((0.0..=10.0).contains(&r.score));
        assert!((0.0..=1.0).contains(&r.confidence));
        assert_eq!(r.label, SentimentLabel::Bearish);
    }

    #[test]
    fn no_lexicon_hits_means_midpoint() {
        let r = score("the committee met on tuesday").unwrap();
        assert_eq!(r.score, 5.0);
    }
}
