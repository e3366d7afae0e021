//! # oanda-rs
//!
//! A Rust client library for the [OANDA v20 API](https://developer.oanda.com/rest-live-v20/introduction/).
//!
//! The centrepiece is the streaming [`Feed`](stream::Feed): a price or
//! transaction stream decoded into typed events, watched by a heartbeat
//! timer, and shut down cleanly on close, error, or silence.
//!
//! ## Quick Start
//!
//! ```no_run
//! use oanda_rs::client::OandaClient;
//! use oanda_rs::config::Environment;
//! use oanda_rs::types::pricing::PricingStreamRequest;
//!
//! #[tokio::main]
//! async fn main() -> oanda_rs::error::Result<()> {
//!     let client = OandaClient::new("your-api-token", Environment::Practice)?;
//!     let mut feed = client
//!         .stream_pricing("101-001-1234567-001", &PricingStreamRequest::new(["EUR_USD"]))
//!         .await?;
//!     while let Some(price) = feed.recv().await {
//!         println!("{price:?}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod stream;
pub mod types;

/// Re-export the main client type at crate root for convenience.
pub use client::OandaClient;
/// Re-export the error types and Result alias.
pub use error::{FeedError, OandaError, Result};
/// Re-export the streaming feed handle.
pub use stream::{Feed, FeedControl};
