//! Connects to the market-data feed and subscribes to NIFTY 50 (IDX_I:13)
//! and HDFC Bank (NSE_EQ:1333) for inspecting live packets.
//!
//! # Usage
//!
//! ```sh
//! export MARKETLINK_CLIENT_ID="your-client-id"
//! export MARKETLINK_ACCESS_TOKEN="your-access-token"
//! cargo run --bin ws_check --features cli
//! ```

use std::env;
use std::time::Duration;

use marketlink_rs::feed::facade::market::MarketDataMode;
use marketlink_rs::feed::{Instrument, MarketFeedClient};
use marketlink_rs::types::enums::ExchangeSegment;

#[tokio::main]
async fn main() -> marketlink_rs::error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let client_id = env::var("MARKETLINK_CLIENT_ID").expect("set MARKETLINK_CLIENT_ID env var before running");
    let access_token =
        env::var("MARKETLINK_ACCESS_TOKEN").expect("set MARKETLINK_ACCESS_TOKEN env var before running");

    let client = MarketFeedClient::new(&client_id, &access_token)?;

    client.on_ticker(|t| println!("ticker: {t:?}"));
    client.on_full(|f| println!("full: {f:?}"));
    client.on_error(|e| eprintln!("feed error: {e}"));

    println!("Connecting to the market-data feed...");
    client.connect(Duration::from_secs(30)).await?;

    println!("Subscribing to IDX_I:13 NIFTY 50 (Ticker)...");
    client
        .subscribe(&[Instrument::new(ExchangeSegment::IDX_I, 13)], MarketDataMode::Ticker)
        .await?;

    println!("Subscribing to NSE_EQ:1333 HDFC Bank (Full)...");
    client
        .subscribe(&[Instrument::new(ExchangeSegment::NSE_EQ, 1333)], MarketDataMode::Full)
        .await?;

    println!("Listening for 10 seconds...");
    println!("(Note: data only arrives during market hours)\n");
    tokio::time::sleep(Duration::from_secs(10)).await;

    let stats = client.stats().await;
    println!("stats: {stats:?}");

    client.disconnect().await;
    println!("Done.");

    Ok(())
}
