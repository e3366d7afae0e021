//! Constants for the OANDA v20 API.
//!
//! Contains base URLs, request headers, and streaming defaults. These are
//! used internally by [`OandaClient`](crate::client::OandaClient) and the
//! streaming feed, but are also exported for advanced usage.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Base URLs
// ---------------------------------------------------------------------------

/// REST base URL of the fxTrade Practice environment.
pub const PRACTICE_API_URL: &str = "https://api-fxpractice.oanda.com";

/// Streaming base URL of the fxTrade Practice environment.
pub const PRACTICE_STREAM_URL: &str = "https://stream-fxpractice.oanda.com";

/// REST base URL of the fxTrade (live) environment.
pub const LIVE_API_URL: &str = "https://api-fxtrade.oanda.com";

/// Streaming base URL of the fxTrade (live) environment.
pub const LIVE_STREAM_URL: &str = "https://stream-fxtrade.oanda.com";

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

/// Header selecting the date/time format of responses.
pub const ACCEPT_DATETIME_FORMAT: &str = "Accept-Datetime-Format";

/// Date/time format requested on every call.
pub const DATETIME_FORMAT_RFC3339: &str = "RFC3339";

// ---------------------------------------------------------------------------
// Streaming
// ---------------------------------------------------------------------------

/// Streaming feed defaults.
pub mod stream {
    use super::Duration;

    /// Value of the `type` field that marks a heartbeat record.
    pub const HEARTBEAT_TYPE: &str = "HEARTBEAT";

    /// Record terminator on the wire.
    pub const RECORD_TERMINATOR: u8 = b'\n';

    /// Interval at which the server emits heartbeats.
    pub const SERVER_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

    /// Default silence interval after which a feed is declared dead: two
    /// [`SERVER_HEARTBEAT_INTERVAL`]s.
    pub const DEFAULT_HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default capacity of the consumer-facing event channel.
    pub const DEFAULT_BUFFER_SIZE: usize = 64;

    /// Capacity of the internal error channel (one slot per stage).
    pub const ERROR_CHANNEL_CAPACITY: usize = 3;
}
