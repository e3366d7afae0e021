//! REST and streaming endpoint implementations.
//!
//! Each sub-module adds high-level `async` methods to
//! [`OandaClient`](crate::client::OandaClient) via `impl` blocks. All methods
//! handle JSON serialization, HTTP transport, and error mapping automatically.
//!
//! ## Usage
//!
//! ```no_run
//! use oanda_rs::OandaClient;
//! use oanda_rs::config::Environment;
//!
//! # #[tokio::main]
//! # async fn main() -> oanda_rs::Result<()> {
//! let client = OandaClient::new("token", Environment::Practice)?;
//! let recent = client
//!     .get_transactions_since_id("101-001-1234567-001", "6")
//!     .await?;
//! println!("{} transactions", recent.transactions.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Endpoints | Description |
//! |---|---|---|
//! | [`pricing`] | 2 | Price snapshot, streaming price feed |
//! | [`transactions`] | 4 | Single / range / since-ID lookups, streaming transaction feed |

pub mod pricing;
pub mod transactions;
