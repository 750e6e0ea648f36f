//! Crypto Market Sentiment Analyzer — binary entrypoint.
//!
//! Runs one analysis pass over the configured assets and prints the
//! report as pretty JSON on stdout. Logs go to stderr.

use anyhow::Context;
use crypto_sentiment_analyzer::{Analyzer, Config};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::from_path(path.as_ref()).context("loading config")?,
        None => Config::load_default().context("loading config")?,
    };

    let analyzer = Analyzer::new(cfg)?;
    let report = analyzer.run().await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
