//! Offline tests for the price fallback cascade against mocked endpoints.

use chrono::Utc;
use crypto_sentiment_analyzer::collect::price::collect_prices;
use crypto_sentiment_analyzer::error::AnalyzerError;
use crypto_sentiment_analyzer::Config;
use httpmock::{Method::GET, MockServer};

fn cfg(base_url: &str) -> Config {
    Config::from_toml_str(&format!(
        r#"
[[assets]]
symbol = "bitcoin"
name = "Bitcoin"
ticker = "BTC"
search_terms = ["bitcoin"]

[price_api]
primary = "coingecko"
fallbacks = ["coincap"]
rate_limit_delay = 0.0
timeout_secs = 5

[news_api]
primary = "rss"

[news]

[sentiment]
scorers = ["compound"]

[endpoints.coingecko]
base_url = "{base_url}"

[endpoints.coincap]
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

fn coincap_body() -> String {
    format!(
        r#"{{
            "data": {{
                "priceUsd": "49750.25",
                "changePercent24Hr": "1.9",
                "volumeUsd24Hr": "30000000000.0",
                "marketCapUsd": "975000000000.0",
                "updated": "{}"
            }}
        }}"#,
        Utc::now().to_rfc3339()
    )
}

#[tokio::test]
async fn primary_success_skips_fallbacks() {
    let server = MockServer::start();
    let primary = server.mock(|when, then| {
        when.method(GET).path("/coins/markets");
        then.status(200)
            .header("content-type", "application/json")
            .body(coingecko_body());
    });
    let fallback = server.mock(|when, then| {
        when.method(GET).path("/assets/bitcoin");
        then.status(200)
            .header("content-type", "application/json")
            .body(coincap_body());
    });

    let client = reqwest::Client::new();
    let prices = collect_prices(&client, &cfg(&server.base_url())).await.unwrap();

    primary.assert();
    fallback.assert_hits(0);
    assert_eq!(prices["bitcoin"].source, "coingecko");
    assert_eq!(prices["bitcoin"].price_usd, 50000.5);
}

#[tokio::test]
async fn failing_primary_falls_back() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/coins/markets");
        then.status(500).body("upstream exploded");
    });
    let fallback = server.mock(|when, then| {
        when.method(GET).path("/assets/bitcoin");
        then.status(200)
            .header("content-type", "application/json")
            .body(coincap_body());
    });

    let client = reqwest::Client::new();
    let prices = collect_prices(&client, &cfg(&server.base_url())).await.unwrap();

    fallback.assert();
    assert_eq!(prices["bitcoin"].source, "coincap");
    assert_eq!(prices["bitcoin"].price_usd, 49750.25);
}

#[tokio::test]
async fn malformed_primary_payload_falls_back() {
    let server = MockServer::start();
    // 200 with a row missing required fields still fails the source.
    server.mock(|when, then| {
        when.method(GET).path("/coins/markets");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"id": "bitcoin", "current_price": 50000.5}]"#);
    });
    let fallback = server.mock(|when, then| {
        when.method(GET).path("/assets/bitcoin");
        then.status(200)
            .header("content-type", "application/json")
            .body(coincap_body());
    });

    let client = reqwest::Client::new();
    let prices = collect_prices(&client, &cfg(&server.base_url())).await.unwrap();

    fallback.assert();
    assert_eq!(prices["bitcoin"].source, "coincap");
}

#[tokio::test]
async fn exhausted_cascade_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/coins/markets");
        then.status(503);
    });
    server.mock(|when, then| {
        when.method(GET).path("/assets/bitcoin");
        then.status(503);
    });

    let client = reqwest::Client::new();
    let err = collect_prices(&client, &cfg(&server.base_url()))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::AllSourcesExhausted));
}
