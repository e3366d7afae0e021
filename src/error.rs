//! Error types for the `oanda-rs` crate.
//!
//! All fallible client operations return [`Result<T>`], which is an alias for
//! `std::result::Result<T, OandaError>`.
//!
//! [`OandaError`] covers:
//! - **API errors**: Structured error responses from the v20 API
//! - **HTTP status errors**: Unexpected status codes with an unparseable body
//! - **HTTP transport errors**: Network, TLS, timeout failures
//! - **JSON errors**: Deserialization failures
//! - **URL errors**: Malformed URL construction
//! - **Invalid arguments**: Client-side validation errors
//!
//! A running streaming feed reports its terminal condition separately, as a
//! [`FeedError`], through [`Feed::err`](crate::stream::Feed::err).

use std::fmt;
use std::time::Duration;

/// Error response returned by the v20 API.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    /// Human-readable description of the error.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Machine-readable reject reason (e.g. `"INSTRUMENT_NOT_TRADEABLE"`).
    #[serde(default)]
    pub error_code: Option<String>,
    /// ID of the most recent transaction for the account, when reported.
    #[serde(default, rename = "lastTransactionID")]
    pub last_transaction_id: Option<String>,
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_code {
            Some(code) => write!(
                f,
                "[{code}] {}",
                self.error_message.as_deref().unwrap_or("No message")
            ),
            None => f.write_str(self.error_message.as_deref().unwrap_or("No message")),
        }
    }
}

/// All possible errors produced by the `oanda-rs` client.
#[derive(Debug, thiserror::Error)]
pub enum OandaError {
    /// An error response returned by the v20 REST or streaming API.
    #[error("API error (HTTP {status}): {body}")]
    Api {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The parsed error body.
        body: ApiErrorBody,
    },

    /// The server returned an unexpected HTTP status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The response body text.
        body: String,
    },

    /// A network or transport-level error from `reqwest`.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to deserialize a JSON response body.
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error building or parsing a URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The caller provided an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl OandaError {
    /// HTTP status of the failed request, if the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Api { status, .. } | Self::HttpStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OandaError>;

/// Terminal condition of a streaming feed.
///
/// Only the first condition observed by the feed controller is kept; a feed
/// closed by its owner without any prior failure reports no error at all.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Reading the response body failed before the feed was cancelled.
    #[error("read response stream failed: {0}")]
    Transport(#[source] std::io::Error),

    /// A record could not be decoded; the stream framing is no longer trusted.
    #[error("failed to decode stream record: {source}")]
    Decode {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
        /// The offending record, lossily converted to UTF-8.
        record: String,
    },

    /// No record of any kind arrived within the heartbeat timeout.
    #[error("heartbeat was broken: no record received for {0:?}")]
    HeartbeatTimeout(Duration),

    /// The server ended the response body.
    #[error("stream closed by server")]
    Disconnected,
}

impl FeedError {
    /// `true` for [`FeedError::HeartbeatTimeout`].
    pub fn is_heartbeat_timeout(&self) -> bool {
        matches!(self, Self::HeartbeatTimeout(_))
    }

    /// `true` for [`FeedError::Decode`].
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// `true` for [`FeedError::Transport`].
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
