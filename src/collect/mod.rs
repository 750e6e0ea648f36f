// src/collect/mod.rs
//! Data collection: provider adapters plus the two fallback orchestrators
//! (first-success-wins for prices, collect-from-all for news).

pub mod news;
pub mod price;
pub mod providers;

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

pub const USER_AGENT: &str = "CryptoMarketSentimentAnalyzer/0.1.0";

/// Pacing delay inserted before each request to a provider family.
pub(crate) async fn pace(delay_secs: f64) {
    if delay_secs > 0.0 {
        tokio::time::sleep(Duration::from_secs_f64(delay_secs)).await;
    }
}

/// Normalize provider text: decode HTML entities, strip tags, normalize
/// curly quotes, collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    static RE_TAGS: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
    static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

    let mut out = html_escape::decode_html_entities(s).to_string();
    out = RE_TAGS.replace_all(&out, "").to_string();
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");
    out = RE_WS.replace_all(&out, " ").to_string();
    out.trim().to_string()
}
