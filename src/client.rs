//! Core HTTP client for the OANDA v20 REST and streaming APIs.
//!
//! The [`OandaClient`] struct is the main entry point for interacting with
//! the v20 endpoints. It wraps [`reqwest::Client`] with the bearer token and
//! datetime-format headers and provides a typed `get` helper plus the request
//! that opens a long-lived streaming response.
//!
//! Endpoint methods are added to `OandaClient` via `impl` blocks in the
//! [`crate::api`] module.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::config::{Environment, FeedConfig};
use crate::constants::{ACCEPT_DATETIME_FORMAT, DATETIME_FORMAT_RFC3339};
use crate::error::{ApiErrorBody, OandaError, Result};

/// Core HTTP client for the OANDA v20 API.
///
/// Wraps [`reqwest::Client`] and injects the `Authorization` header into every
/// request. The header value is cached at construction time.
///
/// # Example
///
/// ```no_run
/// use oanda_rs::client::OandaClient;
/// use oanda_rs::config::Environment;
///
/// # #[tokio::main]
/// # async fn main() -> oanda_rs::error::Result<()> {
/// let client = OandaClient::new("your-api-token", Environment::Practice)?;
/// // client.get::<MyResponse>("/v3/accounts", &[]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OandaClient {
    http: reqwest::Client,
    /// Personal access token.
    token: String,
    /// Base URL for REST requests.
    api_url: String,
    /// Base URL for streaming requests.
    stream_url: String,
    /// Optional per-request timeout for one-shot REST calls.
    request_timeout: Option<Duration>,
    /// Default configuration of streaming feeds opened by this client.
    feed_config: FeedConfig,
    /// Pre-built `Authorization` header value.
    auth_header: HeaderValue,
}

impl OandaClient {
    /// Create a new `OandaClient` for the given environment.
    pub fn new(token: impl Into<String>, environment: Environment) -> Result<Self> {
        Self::with_base_urls(token, environment.api_url(), environment.stream_url())
    }

    /// Create a new `OandaClient` pointing at custom REST and stream base URLs.
    ///
    /// Useful for testing against a mock server. Fails with
    /// [`OandaError::Url`] if either base is not an absolute URL.
    pub fn with_base_urls(
        token: impl Into<String>,
        api_url: impl Into<String>,
        stream_url: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .build()?;

        let token = token.into();
        let auth_header = Self::bearer(&token)?;
        let api_url = base_url(api_url.into())?;
        let stream_url = base_url(stream_url.into())?;

        Ok(Self {
            http,
            token,
            api_url,
            stream_url,
            request_timeout: None,
            feed_config: FeedConfig::default(),
            auth_header,
        })
    }

    /// Apply a timeout to every one-shot REST request. Streaming requests are
    /// never subject to it.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Replace the default configuration used for streaming feeds.
    pub fn with_feed_config(mut self, config: FeedConfig) -> Self {
        self.feed_config = config;
        self
    }

    /// Returns a reference to the underlying `reqwest::Client`.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Returns the current access token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Replace the access token.
    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        self.auth_header = Self::bearer(&token)?;
        self.token = token;
        Ok(())
    }

    /// Returns the REST base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the streaming base URL.
    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }

    /// Returns the default streaming feed configuration.
    pub fn feed_config(&self) -> &FeedConfig {
        &self.feed_config
    }

    // -----------------------------------------------------------------------
    // Generic HTTP helpers
    // -----------------------------------------------------------------------

    /// Perform a GET request against the REST host and deserialize the JSON
    /// response.
    pub async fn get<R: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<R> {
        let url = join(&self.api_url, path);
        tracing::debug!(%url, "GET");

        let mut req = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, self.auth_header.clone())
            .query(query);
        if let Some(timeout) = self.request_timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    /// Open a streaming GET request against the stream host.
    ///
    /// Returns the response once a success status has been received; the
    /// body is left unread. A non-success status is mapped to an
    /// [`OandaError`] after reading the (finite) error body.
    pub(crate) async fn open_stream(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response> {
        let url = join(&self.stream_url, path);
        tracing::debug!(%url, "GET (stream)");

        let resp = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, self.auth_header.clone())
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(parse_error_body(status, &body))
        }
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Default headers applied to every request.
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            ACCEPT_DATETIME_FORMAT,
            HeaderValue::from_static(DATETIME_FORMAT_RFC3339),
        );
        headers
    }

    fn bearer(token: &str) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            OandaError::InvalidArgument("token contains invalid header characters".into())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Read a response, returning either the deserialized body or an
    /// `OandaError`.
    async fn handle_response<R: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<R> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if status.is_success() {
            serde_json::from_slice(&bytes).map_err(OandaError::Json)
        } else {
            let body = String::from_utf8_lossy(&bytes);
            Err(parse_error_body(status, &body))
        }
    }
}

/// Validate a base URL and strip its trailing slash.
fn base_url(raw: String) -> Result<String> {
    url::Url::parse(&raw)?;
    Ok(raw.trim_end_matches('/').to_owned())
}

/// Build the full URL from a base and a path segment.
fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Try to parse the API's JSON error structure; fall back to a raw HTTP
/// status error.
pub(crate) fn parse_error_body(status: reqwest::StatusCode, body: &str) -> OandaError {
    if let Ok(api_err) = serde_json::from_str::<ApiErrorBody>(body) {
        if api_err.error_code.is_some() || api_err.error_message.is_some() {
            return OandaError::Api {
                status,
                body: api_err,
            };
        }
    }
    OandaError::HttpStatus {
        status,
        body: body.to_owned(),
    }
}
