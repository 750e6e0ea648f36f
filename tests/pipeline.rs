//! End-to-end pipeline tests against mocked price and news endpoints.

use chrono::Utc;
use crypto_sentiment_analyzer::{Analyzer, Config};
use httpmock::{Method::GET, MockServer};

fn cfg(base_url: &str) -> Config {
    Config::from_toml_str(&format!(
        r#"
[[assets]]
symbol = "bitcoin"
name = "Bitcoin"
ticker = "BTC"
search_terms = ["bitcoin", "btc"]

[price_api]
primary = "coingecko"
rate_limit_delay = 0.0
timeout_secs = 5

[news_api]
primary = "rss"
rate_limit_delay = 0.0
timeout_secs = 5

[news]
max_articles_per_asset = 10
min_article_length = 50
similarity_threshold = 0.8
quality_sources = ["coindesk"]
rss_feeds = ["{base_url}/feed"]

[sentiment]
scorers = ["compound", "polarity"]

[endpoints.coingecko]
base_url = "{base_url}"
"#
    ))
    .unwrap()
}

fn coingecko_body() -> String {
    format!(
        r#"[{{
            "id": "bitcoin",
            "current_price": 50000.5,
            "price_change_24h": 1200.0,
            "price_change_percentage_24h": 2.4,
            "total_volume": 35000000000.0,
            "market_cap": 980000000000.0,
            "last_updated": "{}"
        }}]"#,
        Utc::now().to_rfc3339()
    )
}

fn feed_body() -> String {
    let now = Utc::now().to_rfc2822();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Crypto Wire</title>
    <item>
      <title>Bitcoin Surges Past $50k as ETFs Rally</title>
      <link>https://wire.example/btc-surge</link>
      <pubDate>{now}</pubDate>
      <description>Bitcoin surged to a record high as ETF inflows lifted the market and traders cheered the rally.</description>
    </item>
    <item>
      <title>Breaking: Bitcoin Surges Past $50k as ETFs Rally</title>
      <link>https://aggregator.example/btc-surge-repost</link>
      <pubDate>{now}</pubDate>
      <description>Bitcoin surged to a record high as ETF inflows lifted the market and traders cheered the rally.</description>
    </item>
    <item>
      <title>Central bank leaves rates unchanged</title>
      <link>https://wire.example/rates</link>
      <pubDate>{now}</pubDate>
      <description>Policymakers held interest rates steady on Thursday, citing a balanced outlook for growth.</description>
    </item>
  </channel>
</rss>"#
    )
}

#[tokio::test]
async fn full_run_deduplicates_and_leans_bullish() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/coins/markets");
        then.status(200)
            .header("content-type", "application/json")
            .body(coingecko_body());
    });
    server.mock(|when, then| {
        when.method(GET).path("/feed");
        then.status(200)
            .header("content-type", "application/rss+xml")
            .body(feed_body());
    });

    let analyzer = Analyzer::new(cfg(&server.base_url())).unwrap();
    let report = analyzer.run().await.unwrap();

    assert_eq!(report.prices["bitcoin"].price_usd, 50000.5);
    assert_eq!(report.prices["bitcoin"].source, "coingecko");

    // The repost collapses onto the original; the rates story is filtered
    // out before it ever reaches ranking.
    let articles = &report.articles["bitcoin"];
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].url, "https://wire.example/btc-surge");
    assert_eq!(articles[0].source, "Crypto Wire");
    assert!(articles[0].sentiment_score.is_some());

    let sentiment = &report.sentiment["bitcoin"];
    assert_eq!(sentiment.articles_analyzed, 1);
    assert!(
        sentiment.composite_score > 5.0,
        "expected bullish lean, got {}",
        sentiment.composite_score
    );
    assert!(sentiment.composite_label.is_bullish());
    assert_eq!(sentiment.per_scorer.len(), 2);

    assert_eq!(report.stats.total_assets, 1);
    assert_eq!(report.stats.total_articles, 1);
    assert_eq!(report.stats.bullish_assets, 1);
}

#[tokio::test]
async fn news_outage_degrades_to_neutral_not_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/coins/markets");
        then.status(200)
            .header("content-type", "application/json")
            .body(coingecko_body());
    });
    server.mock(|when, then| {
        when.method(GET).path("/feed");
        then.status(502);
    });

    let analyzer = Analyzer::new(cfg(&server.base_url())).unwrap();
    let report = analyzer.run().await.unwrap();

    assert_eq!(report.prices["bitcoin"].price_usd, 50000.5);
    assert!(report.articles["bitcoin"].is_empty());

    let sentiment = &report.sentiment["bitcoin"];
    assert_eq!(sentiment.articles_analyzed, 0);
    assert_eq!(sentiment.composite_score, 5.0);
    assert_eq!(report.stats.bullish_assets, 0);
}
