//! Binary to open the OANDA pricing stream for a few instruments and print
//! prices for inspecting live data.
//!
//! # Usage
//!
//! ```sh
//! export OANDA_TOKEN="your-api-token"
//! export OANDA_ACCOUNT_ID="101-001-1234567-001"
//! export OANDA_INSTRUMENTS="EUR_USD,USD_JPY"   # optional
//! cargo run --bin stream_check --features cli
//! ```

use std::env;
use std::time::Duration;

use oanda_rs::client::OandaClient;
use oanda_rs::config::Environment;
use oanda_rs::types::pricing::PricingStreamRequest;
use tokio::time;

#[tokio::main]
async fn main() -> oanda_rs::error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let token = env::var("OANDA_TOKEN").expect("set OANDA_TOKEN env var before running");
    let account_id =
        env::var("OANDA_ACCOUNT_ID").expect("set OANDA_ACCOUNT_ID env var before running");
    let instruments =
        env::var("OANDA_INSTRUMENTS").unwrap_or_else(|_| "EUR_USD,USD_JPY".to_owned());

    let client = OandaClient::new(token, Environment::Practice)?;

    println!("Opening pricing stream for {instruments}…");
    let request = PricingStreamRequest::new(instruments.split(','));
    let mut feed = client.stream_pricing(&account_id, &request).await?;

    println!("Listening for prices for 10 seconds…");
    println!("(Note: no prices arrive while the market is closed, only heartbeats)\n");

    let deadline = time::sleep(Duration::from_secs(10));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => {
                println!("\n10 seconds elapsed, closing…");
                break;
            }
            price = feed.recv() => {
                match price {
                    Some(p) => println!("{p:#?}"),
                    None => {
                        match feed.err() {
                            Some(e) => eprintln!("Stream stopped: {e}"),
                            None => println!("Stream ended"),
                        }
                        break;
                    }
                }
            }
        }
    }

    feed.close().await;
    println!("Done.");

    Ok(())
}
