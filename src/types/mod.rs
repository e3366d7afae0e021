//! Request and response types for the OANDA v20 API.
//!
//! ## Organization
//!
//! - [`enums`]: Shared enumerations (transaction types, price status, etc.)
//! - [`pricing`]: Price ticks, pricing heartbeats, and pricing snapshots
//! - [`transactions`]: Account transactions, transaction heartbeats, and
//!   history responses
//!
//! All enums are re-exported at the module root via `pub use enums::*`.

pub mod enums;
pub mod pricing;
pub mod transactions;

pub use enums::*;
