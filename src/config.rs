//! Client environment and streaming feed configuration.

use std::time::Duration;

use crate::constants::{
    LIVE_API_URL, LIVE_STREAM_URL, PRACTICE_API_URL, PRACTICE_STREAM_URL, stream,
};

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// The OANDA environment a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    /// fxTrade Practice (demo accounts).
    #[default]
    Practice,
    /// fxTrade (live accounts).
    Live,
}

impl Environment {
    /// Base URL for REST requests.
    pub fn api_url(self) -> &'static str {
        match self {
            Self::Practice => PRACTICE_API_URL,
            Self::Live => LIVE_API_URL,
        }
    }

    /// Base URL for streaming requests.
    pub fn stream_url(self) -> &'static str {
        match self {
            Self::Practice => PRACTICE_STREAM_URL,
            Self::Live => LIVE_STREAM_URL,
        }
    }
}

// ---------------------------------------------------------------------------
// Feed configuration
// ---------------------------------------------------------------------------

/// Configuration for a streaming [`Feed`](crate::stream::Feed).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use oanda_rs::config::FeedConfig;
///
/// let config = FeedConfig::default()
///     .buffer_size(256)
///     .heartbeat_timeout(Duration::from_secs(15))
///     .initial_grace(Duration::from_secs(30));
/// assert_eq!(config.buffer_size, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Capacity of the consumer-facing event channel (minimum 1).
    pub buffer_size: usize,
    /// Silence interval after which the feed is declared dead. Also the
    /// period of the liveness check.
    pub heartbeat_timeout: Duration,
    /// Delay before the first liveness check. A stream that delivers nothing
    /// at all fails once this elapses.
    pub initial_grace: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            buffer_size: stream::DEFAULT_BUFFER_SIZE,
            heartbeat_timeout: stream::DEFAULT_HEARTBEAT_TIMEOUT,
            initial_grace: stream::DEFAULT_HEARTBEAT_TIMEOUT,
        }
    }
}

impl FeedConfig {
    /// Set the event channel capacity. Values below 1 are raised to 1.
    /// Default: 64.
    pub fn buffer_size(mut self, n: usize) -> Self {
        self.buffer_size = n.max(1);
        self
    }

    /// Set the heartbeat timeout. If the initial grace still equals the old
    /// timeout it follows the new value. Default: 10 s.
    pub fn heartbeat_timeout(mut self, timeout: Duration) -> Self {
        if self.initial_grace == self.heartbeat_timeout {
            self.initial_grace = timeout;
        }
        self.heartbeat_timeout = timeout;
        self
    }

    /// Set the delay before the first liveness check. Default: the heartbeat
    /// timeout.
    pub fn initial_grace(mut self, grace: Duration) -> Self {
        self.initial_grace = grace;
        self
    }

    /// Effective channel capacity (`buffer_size`, at least 1).
    pub(crate) fn capacity(&self) -> usize {
        self.buffer_size.max(1)
    }
}
